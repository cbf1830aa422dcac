use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};

/// Agent id used for notices that no agent authored.
pub const SYSTEM_AGENT_ID: &str = "system";

/// Kind of event shown in the activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    TaskStarted,
    TaskCompleted,
    TaskFailed,
    Message,
    Deploy,
    Commit,
}

impl ActivityType {
    pub const ALL: [Self; 6] = [
        Self::TaskStarted,
        Self::TaskCompleted,
        Self::TaskFailed,
        Self::Message,
        Self::Deploy,
        Self::Commit,
    ];

    const fn as_str(self) -> &'static str {
        match self {
            Self::TaskStarted => "task_started",
            Self::TaskCompleted => "task_completed",
            Self::TaskFailed => "task_failed",
            Self::Message => "message",
            Self::Deploy => "deploy",
            Self::Commit => "commit",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TaskStarted => "Démarré",
            Self::TaskCompleted => "Terminé",
            Self::TaskFailed => "Échec",
            Self::Message => "Message",
            Self::Deploy => "Déploiement",
            Self::Commit => "Commit",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "task_started" => Ok(Self::TaskStarted),
            "task_completed" => Ok(Self::TaskCompleted),
            "task_failed" => Ok(Self::TaskFailed),
            "message" => Ok(Self::Message),
            "deploy" => Ok(Self::Deploy),
            "commit" => Ok(Self::Commit),
            _ => Err(ParseEnumError {
                expected: "activity type",
                valid: "task_started, task_completed, task_failed, message, deploy, commit",
                got: s.to_string(),
            }),
        }
    }
}

/// One entry of the append-only activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    /// Author agent id, or [`SYSTEM_AGENT_ID`].
    pub agent_id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Opaque key/value bag; never interpreted by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ActivityLog {
    pub fn new(
        id: impl Into<String>,
        agent_id: impl Into<String>,
        kind: ActivityType,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            agent_id: agent_id.into(),
            kind,
            message: message.into(),
            timestamp,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.to_string(), value.into());
        self
    }
}
