use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};

/// What an agent is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Working,
    Done,
    Error,
}

impl AgentStatus {
    pub const ALL: [Self; 4] = [Self::Idle, Self::Working, Self::Done, Self::Error];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Working => "working",
            Self::Done => "done",
            Self::Error => "error",
        }
    }

    /// Label shown next to the agent in the sidebar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Disponible",
            Self::Working => "En cours",
            Self::Done => "Terminé",
            Self::Error => "Erreur",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "idle" => Ok(Self::Idle),
            "working" => Ok(Self::Working),
            "done" => Ok(Self::Done),
            "error" => Ok(Self::Error),
            _ => Err(ParseEnumError {
                expected: "agent status",
                valid: "idle, working, done, error",
                got: s.to_string(),
            }),
        }
    }
}

/// A named worker (human or automated) that tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub role: String,
    pub emoji: String,
    pub status: AgentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Display hint, usually a `#rrggbb` string.
    pub color: String,
}

/// Partial update merged into an [`Agent`] by `update_agent`.
///
/// `None` leaves a field untouched. For `current_task`, `Some(None)` clears
/// the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub emoji: Option<String>,
    pub status: Option<AgentStatus>,
    pub current_task: Option<Option<String>>,
    pub specialties: Option<Vec<String>>,
    pub color: Option<String>,
}

impl AgentUpdate {
    #[must_use]
    pub fn status(status: AgentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, agent: &mut Agent) {
        if let Some(name) = self.name {
            agent.name = name;
        }
        if let Some(role) = self.role {
            agent.role = role;
        }
        if let Some(emoji) = self.emoji {
            agent.emoji = emoji;
        }
        if let Some(status) = self.status {
            agent.status = status;
        }
        if let Some(current_task) = self.current_task {
            agent.current_task = current_task;
        }
        if let Some(specialties) = self.specialties {
            agent.specialties = specialties;
        }
        if let Some(color) = self.color {
            agent.color = color;
        }
    }
}
