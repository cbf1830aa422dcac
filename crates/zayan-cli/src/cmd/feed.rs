//! `zhq feed`: recent activity, newest first.

use crate::cmd::parse_enum_flag;
use crate::output::{OutputMode, pretty_section, render_mode};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use zayan_core::feed::{EMPTY_FEED_LABEL, author_label, relative_age};
use zayan_core::model::ActivityType;
use zayan_core::store::{ACTIVITY_CAP, DashboardStore};

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Maximum number of entries to show.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    /// Only show entries of this type (task_started, task_completed,
    /// task_failed, message, deploy, commit).
    #[arg(long = "type", short = 't')]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub id: String,
    pub agent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    pub age: String,
}

pub fn collect_feed(
    store: &DashboardStore,
    limit: usize,
    kind: Option<ActivityType>,
) -> Vec<FeedEntry> {
    let now = store.now();
    store
        .activities()
        .iter()
        .filter(|entry| kind.is_none_or(|k| entry.kind == k))
        .take(limit.min(ACTIVITY_CAP))
        .map(|entry| FeedEntry {
            id: entry.id.clone(),
            agent_id: entry.agent_id.clone(),
            author: author_label(store, entry),
            kind: entry.kind,
            message: entry.message.clone(),
            timestamp: entry.timestamp,
            age: relative_age(now, entry.timestamp),
        })
        .collect()
}

fn write_text(rows: &Vec<FeedEntry>, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "timestamp  type  agent  message")?;
    for row in rows {
        writeln!(
            w,
            "{}  {}  {}  {}",
            row.timestamp.to_rfc3339(),
            row.kind,
            row.agent_id,
            row.message
        )?;
    }
    Ok(())
}

fn write_pretty(rows: &Vec<FeedEntry>, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Activité récente")?;
    if rows.is_empty() {
        return writeln!(w, "{EMPTY_FEED_LABEL}");
    }
    for row in rows {
        let author = row.author.as_deref().unwrap_or("");
        writeln!(w, "[{}] {author}  ({})", row.kind.label(), row.age)?;
        writeln!(w, "    {}", row.message)?;
    }
    Ok(())
}

pub fn run_feed(args: &FeedArgs, output: OutputMode) -> anyhow::Result<()> {
    let kind = parse_enum_flag(args.kind.as_deref(), output)?;
    let store = zayan_core::seed::seeded_store();
    let rows = collect_feed(&store, args.limit, kind);
    render_mode(output, &rows, write_text, write_pretty)
}
