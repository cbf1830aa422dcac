use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};

/// The five workflow positions, in board order.
///
/// Ordering follows the kanban columns, so `Backlog < Todo < ... < Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// All statuses in column order.
    pub const ALL: [Self; 5] = [
        Self::Backlog,
        Self::Todo,
        Self::InProgress,
        Self::Review,
        Self::Done,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }
}

/// Task urgency as picked in the create dialog.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Basse",
            Self::Medium => "Moyenne",
            Self::High => "Haute",
            Self::Urgent => "Urgente",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "in_progress" | "inprogress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(ParseEnumError {
                expected: "task status",
                valid: "backlog, todo, in_progress, review, done",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseEnumError {
                expected: "priority",
                valid: "low, medium, high, urgent",
                got: s.to_string(),
            }),
        }
    }
}

/// A unit of work positioned in the kanban workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    /// Agent id; not validated against the agent collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Project id; not validated against the project collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update merged into a [`Task`] by `update_task`.
///
/// Nested options clear a value with `Some(None)`. `updated_at` is not part
/// of the update: the store always stamps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<Option<String>>,
    pub project_id: Option<Option<String>>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
    pub tags: Option<Vec<String>>,
}

impl TaskUpdate {
    pub(crate) fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(assigned_to) = self.assigned_to {
            task.assigned_to = assigned_to;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(completed_at) = self.completed_at {
            task.completed_at = completed_at;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Task {
        let at = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        Task {
            id: "3".into(),
            title: "API Authentication".into(),
            description: "Implémenter auth avec JWT et sessions".into(),
            status: TaskStatus::Backlog,
            priority: Priority::High,
            assigned_to: Some("backend".into()),
            project_id: Some("signlink".into()),
            created_at: at,
            updated_at: at,
            completed_at: None,
            tags: vec!["api".into(), "auth".into()],
        }
    }

    #[test]
    fn status_wire_values_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"review\"").unwrap(),
            TaskStatus::Review
        );
        assert_eq!(serde_json::to_string(&Priority::Urgent).unwrap(), "\"urgent\"");
    }

    #[test]
    fn status_parse_accepts_cli_spellings() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("InProgress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("archived".parse::<TaskStatus>().is_err());
        let err = "critical".parse::<Priority>().unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidEnumValue);
    }

    #[test]
    fn status_order_matches_columns() {
        let mut shuffled = vec![
            TaskStatus::Done,
            TaskStatus::Backlog,
            TaskStatus::Review,
            TaskStatus::Todo,
            TaskStatus::InProgress,
        ];
        shuffled.sort();
        assert_eq!(shuffled, TaskStatus::ALL);
    }

    #[test]
    fn task_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["assignedTo"], "backend");
        assert_eq!(json["projectId"], "signlink");
        assert_eq!(json["createdAt"], "2026-02-01T09:00:00Z");
        assert!(json.get("completedAt").is_none());

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn update_can_clear_assignee() {
        let mut task = sample();
        TaskUpdate {
            assigned_to: Some(None),
            priority: Some(Priority::Low),
            ..TaskUpdate::default()
        }
        .apply_to(&mut task);
        assert!(task.assigned_to.is_none());
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.project_id.as_deref(), Some("signlink"));
    }

    #[test]
    fn priority_labels() {
        let labels: Vec<_> = Priority::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["Basse", "Moyenne", "Haute", "Urgente"]);
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
