//! User-facing dashboard actions.
//!
//! These helpers pair store commands with the activity feed entries and
//! deferred callbacks that the views expect, so the TUI and the tests share
//! one implementation. The store itself stays a dumb container: validation
//! (blank titles, blank chat messages) happens here, before it is touched.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::board::assignee;
use crate::clock::IdGenerator;
use crate::deferred::{DeferredEvent, DeferredQueue};
use crate::error::ErrorCode;
use crate::model::{ActivityLog, ActivityType, Priority, SYSTEM_AGENT_ID, Task, TaskStatus};
use crate::seed::MANAGER_AGENT_ID;
use crate::store::DashboardStore;

/// Notice appended once a manual refresh completes.
pub const REFRESH_NOTICE: &str = "Tableau actualisé";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("chat message must not be empty")]
    EmptyMessage,
    #[error("unknown agent '{0}'")]
    UnknownAgent(String),
}

impl ActionError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyTitle => ErrorCode::EmptyTitle,
            Self::EmptyMessage => ErrorCode::EmptyMessage,
            Self::UnknownAgent(_) => ErrorCode::UnknownAgent,
        }
    }
}

/// Fields collected by the task creation dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assigned_to: Option<String>,
    pub project_id: Option<String>,
    pub tags: Vec<String>,
}

impl NewTask {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Agent an activity about `task` is attributed to.
fn actor_for(task: &Task) -> String {
    task.assigned_to
        .clone()
        .unwrap_or_else(|| MANAGER_AGENT_ID.to_string())
}

fn log(
    store: &mut DashboardStore,
    ids: &mut IdGenerator,
    agent_id: impl Into<String>,
    kind: ActivityType,
    message: impl Into<String>,
) {
    let now = store.now();
    let id = ids.next_id(now);
    store.add_activity(ActivityLog::new(id, agent_id, kind, message, now));
}

/// Create a backlog task from dialog input and announce it in the feed.
///
/// # Errors
///
/// Returns [`ActionError::EmptyTitle`] when the title is blank after
/// trimming. The store is not modified in that case.
pub fn create_task(
    store: &mut DashboardStore,
    ids: &mut IdGenerator,
    input: NewTask,
) -> Result<String, ActionError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ActionError::EmptyTitle);
    }

    let now = store.now();
    let task = Task {
        id: ids.next_id(now),
        title: title.to_string(),
        description: input.description.trim().to_string(),
        status: TaskStatus::Backlog,
        priority: input.priority,
        assigned_to: input.assigned_to.filter(|a| !a.trim().is_empty()),
        project_id: input.project_id.filter(|p| !p.trim().is_empty()),
        created_at: now,
        updated_at: now,
        completed_at: None,
        tags: input
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    };
    let id = task.id.clone();
    let actor = actor_for(&task);
    let message = format!("Nouvelle tâche \"{}\" créée", task.title);
    store.add_task(task);
    log(store, ids, actor, ActivityType::Message, message);
    info!(task_id = %id, "task created");
    Ok(id)
}

/// Move a task one column to the right.
///
/// Logs `task_completed` when the task leaves `review` (i.e. lands in
/// `done`), `task_started` otherwise. Returns the new status, or `None` when
/// the task is unknown or already done.
pub fn advance_task(
    store: &mut DashboardStore,
    ids: &mut IdGenerator,
    task_id: &str,
) -> Option<TaskStatus> {
    let task = store.task(task_id)?;
    let from = task.status;
    let to = from.next()?;
    let actor = actor_for(task);
    let message = format!("Tâche \"{}\" → {}", task.title, to.label());
    let kind = if from == TaskStatus::Review {
        ActivityType::TaskCompleted
    } else {
        ActivityType::TaskStarted
    };

    store.move_task(task_id, to);
    log(store, ids, actor, kind, message);
    debug!(task_id, %from, %to, "task advanced");
    Some(to)
}

/// Move a task one column to the left. Returns the new status, or `None`
/// when the task is unknown or already in the backlog.
pub fn regress_task(
    store: &mut DashboardStore,
    ids: &mut IdGenerator,
    task_id: &str,
) -> Option<TaskStatus> {
    let task = store.task(task_id)?;
    let from = task.status;
    let to = from.previous()?;
    let actor = actor_for(task);
    let message = format!("Tâche \"{}\" ← {}", task.title, to.label());

    store.move_task(task_id, to);
    log(store, ids, actor, ActivityType::Message, message);
    debug!(task_id, %from, %to, "task moved back");
    Some(to)
}

/// Delete a task and note it in the feed. Returns `false` on an unknown id.
pub fn delete_task(store: &mut DashboardStore, ids: &mut IdGenerator, task_id: &str) -> bool {
    let Some(task) = store.task(task_id) else {
        return false;
    };
    let message = format!("Tâche \"{}\" supprimée", task.title);
    store.delete_task(task_id);
    log(store, ids, MANAGER_AGENT_ID, ActivityType::Message, message);
    true
}

/// Post a chat message to an agent and schedule its reply.
///
/// # Errors
///
/// [`ActionError::EmptyMessage`] for blank text, [`ActionError::UnknownAgent`]
/// when `agent_id` matches no agent. Nothing is logged or scheduled on error.
pub fn send_chat_message(
    store: &mut DashboardStore,
    ids: &mut IdGenerator,
    queue: &mut DeferredQueue,
    at: Instant,
    reply_delay: Duration,
    agent_id: &str,
    text: &str,
) -> Result<(), ActionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ActionError::EmptyMessage);
    }
    let Some(agent) = store.agent(agent_id) else {
        return Err(ActionError::UnknownAgent(agent_id.to_string()));
    };
    let message = format!("→ {} : {text}", agent.name);

    let now = store.now();
    let entry = ActivityLog::new(ids.next_id(now), agent_id, ActivityType::Message, message, now)
        .with_metadata("direction", "outgoing");
    store.add_activity(entry);
    queue.schedule(
        at,
        reply_delay,
        DeferredEvent::AgentReply {
            agent_id: agent_id.to_string(),
            prompt: text.to_string(),
        },
    );
    debug!(agent_id, pending = queue.len(), "agent reply scheduled");
    Ok(())
}

/// Schedule the refresh-complete notice.
pub fn request_refresh(queue: &mut DeferredQueue, at: Instant, notice_delay: Duration) {
    queue.schedule(at, notice_delay, DeferredEvent::RefreshComplete);
    debug!(pending = queue.len(), "refresh notice scheduled");
}

/// Apply a fired deferred event to the store.
///
/// Replies from an agent that was removed in the meantime are still logged
/// under its id; the feed renders the raw id in that case.
pub fn apply_deferred(store: &mut DashboardStore, ids: &mut IdGenerator, event: DeferredEvent) {
    match event {
        DeferredEvent::AgentReply { agent_id, prompt } => {
            let message = store.agent(&agent_id).map_or_else(
                || format!("Bien reçu : \"{prompt}\""),
                |agent| format!("{} : bien reçu, je m'occupe de \"{prompt}\"", agent.name),
            );
            let now = store.now();
            let entry =
                ActivityLog::new(ids.next_id(now), agent_id, ActivityType::Message, message, now)
                    .with_metadata("direction", "incoming");
            store.add_activity(entry);
        }
        DeferredEvent::RefreshComplete => {
            log(store, ids, SYSTEM_AGENT_ID, ActivityType::Message, REFRESH_NOTICE);
        }
    }
}

/// Drain every due event from `queue` and apply it. Returns how many fired.
pub fn apply_due(
    store: &mut DashboardStore,
    ids: &mut IdGenerator,
    queue: &mut DeferredQueue,
    now: Instant,
) -> usize {
    if queue.is_empty() {
        return 0;
    }
    let fired = queue.drain_due(now);
    let count = fired.len();
    for event in fired {
        apply_deferred(store, ids, event);
    }
    count
}

/// Agent currently assigned to `task_id`, for dialogs that preselect it.
#[must_use]
pub fn task_assignee_id(store: &DashboardStore, task_id: &str) -> Option<String> {
    let task = store.task(task_id)?;
    assignee(store, task).map(|a| a.id.clone())
}
