//! Plain data records held by the dashboard store.
//!
//! All cross-references between records (`assigned_to`, `project_id`,
//! `agent_id`) are soft string ids resolved at read time; a miss is a valid
//! display state, never an error.

pub mod activity;
pub mod agent;
pub mod project;
pub mod task;

use std::fmt;

pub use activity::{ActivityLog, ActivityType, SYSTEM_AGENT_ID};
pub use agent::{Agent, AgentStatus, AgentUpdate};
pub use project::Project;
pub use task::{Priority, Task, TaskStatus, TaskUpdate};

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    /// Accepted values, comma separated.
    pub valid: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl ParseEnumError {
    #[must_use]
    pub const fn code(&self) -> crate::error::ErrorCode {
        crate::error::ErrorCode::InvalidEnumValue
    }
}

pub(crate) fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase().replace('-', "_")
}
