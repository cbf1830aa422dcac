//! Kanban columns and status transitions.
//!
//! The board has five fixed columns, one per [`TaskStatus`], in workflow
//! order. Moving a task forward or backward is a lookup of its neighbour in
//! that sequence; there is no other transition rule.

use serde::Serialize;

use crate::model::{Agent, AgentStatus, Task, TaskStatus};
use crate::store::DashboardStore;

/// Label shown for a task whose assignee does not resolve.
pub const UNASSIGNED_LABEL: &str = "Non assigné";

/// A board lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub status: TaskStatus,
    pub label: &'static str,
}

/// The board lanes, left to right.
pub const COLUMNS: [Column; 5] = [
    Column {
        status: TaskStatus::Backlog,
        label: "Backlog",
    },
    Column {
        status: TaskStatus::Todo,
        label: "À faire",
    },
    Column {
        status: TaskStatus::InProgress,
        label: "En cours",
    },
    Column {
        status: TaskStatus::Review,
        label: "Review",
    },
    Column {
        status: TaskStatus::Done,
        label: "Terminé",
    },
];

impl TaskStatus {
    /// Position of this status on the board.
    #[must_use]
    pub const fn column_index(self) -> usize {
        match self {
            Self::Backlog => 0,
            Self::Todo => 1,
            Self::InProgress => 2,
            Self::Review => 3,
            Self::Done => 4,
        }
    }

    #[must_use]
    pub const fn column(self) -> Column {
        COLUMNS[self.column_index()]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        self.column().label
    }

    /// Column to the right, or `None` from `done`.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        COLUMNS.get(self.column_index() + 1).map(|c| c.status)
    }

    /// Column to the left, or `None` from `backlog`.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.column_index()
            .checked_sub(1)
            .and_then(|idx| COLUMNS.get(idx))
            .map(|c| c.status)
    }
}

/// Tasks of one column, in the order given.
pub fn column_tasks<'a, I>(tasks: I, status: TaskStatus) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().filter(|t| t.status == status).collect()
}

/// Counters shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl BoardStats {
    pub fn from_tasks<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Done => stats.done += 1,
                _ => {}
            }
            stats
        })
    }

    /// Header line, e.g. `3 tâches · 1 en cours · 1 terminées`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} tâches · {} en cours · {} terminées",
            self.total, self.in_progress, self.done
        )
    }
}

/// Number of agents currently `working`.
#[must_use]
pub fn active_agent_count(agents: &[Agent]) -> usize {
    agents
        .iter()
        .filter(|a| a.status == AgentStatus::Working)
        .count()
}

/// The agent a task is assigned to, if the reference resolves.
#[must_use]
pub fn assignee<'a>(store: &'a DashboardStore, task: &Task) -> Option<&'a Agent> {
    task.assigned_to.as_deref().and_then(|id| store.agent(id))
}

/// `"<emoji> <name>"` of the assignee, or [`UNASSIGNED_LABEL`] when the task
/// has no assignee or its id matches no agent.
#[must_use]
pub fn assignee_label(store: &DashboardStore, task: &Task) -> String {
    assignee(store, task).map_or_else(
        || UNASSIGNED_LABEL.to_string(),
        |agent| format!("{} {}", agent.emoji, agent.name),
    )
}

/// Badge text for the working agents, e.g. `2 agents actifs`.
#[must_use]
pub fn active_agents_label(count: usize) -> String {
    let s = plural(count);
    format!("{count} agent{s} actif{s}")
}

/// French plural suffix used by the header counters.
#[must_use]
pub const fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
