//! Display helpers for the activity feed.

use chrono::{DateTime, Utc};

use crate::model::ActivityLog;
use crate::store::DashboardStore;

/// Shown in place of the feed when it holds no entry.
pub const EMPTY_FEED_LABEL: &str = "Aucune activité";

/// `"<emoji> <name>"` of the entry's author, or `None` when the id matches no
/// agent (system notices, removed agents). The entry is still shown.
#[must_use]
pub fn author_label(store: &DashboardStore, entry: &ActivityLog) -> Option<String> {
    store
        .agent(&entry.agent_id)
        .map(|agent| format!("{} {}", agent.emoji, agent.name))
}

/// Coarse French age of `then` as seen at `now`, without suffix.
///
/// Future timestamps read as "moins d'une minute".
#[must_use]
pub fn relative_age(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    match minutes {
        i64::MIN..=0 => "moins d'une minute".to_string(),
        1 => "1 minute".to_string(),
        2..=44 => format!("{minutes} minutes"),
        45..=89 => "environ 1 heure".to_string(),
        90..=1439 => format!("environ {} heures", (minutes + 30) / 60),
        1440..=2879 => "1 jour".to_string(),
        _ => format!("{} jours", minutes / 1440),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActivityType, SYSTEM_AGENT_ID};
    use crate::seed::seeded_store;
    use chrono::Duration;

    #[test]
    fn author_resolves_known_agents_only() {
        let store = seeded_store();
        let now = store.now();
        let known = ActivityLog::new("a", "qa", ActivityType::Commit, "fix", now);
        let system = ActivityLog::new("b", SYSTEM_AGENT_ID, ActivityType::Message, "ok", now);
        assert_eq!(author_label(&store, &known).as_deref(), Some("🧪 Sentinel"));
        assert_eq!(author_label(&store, &system), None);
    }

    #[test]
    fn ages_round_like_a_human_would() {
        let t0 = DateTime::<Utc>::UNIX_EPOCH;
        let age = |mins: i64| relative_age(t0 + Duration::minutes(mins), t0);
        assert_eq!(age(0), "moins d'une minute");
        assert_eq!(age(1), "1 minute");
        assert_eq!(age(12), "12 minutes");
        assert_eq!(age(60), "environ 1 heure");
        assert_eq!(age(150), "environ 3 heures");
        assert_eq!(age(1500), "1 jour");
        assert_eq!(age(4 * 1440), "4 jours");
        assert_eq!(relative_age(t0, t0 + Duration::minutes(5)), "moins d'une minute");
    }
}
