//! In-memory dashboard state.
//!
//! [`DashboardStore`] is the single source of truth for agents, tasks,
//! activities, projects and the selected project filter. It is owned by the
//! composition root and handed to views by reference; every mutation goes
//! through one of the command methods below. Commands are synchronous and
//! cannot fail: an unknown id is a silent no-op.
//!
//! The store performs no validation and never logs activity on its own.
//! Pairing a move with a feed entry, or rejecting an empty title, is the
//! caller's job (see [`crate::actions`]).

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::filter::filter_by_project;
use crate::model::{
    ActivityLog, Agent, AgentUpdate, Project, Task, TaskStatus, TaskUpdate,
};

/// Maximum number of entries kept in the activity feed.
pub const ACTIVITY_CAP: usize = 100;

pub struct DashboardStore {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    /// Newest first.
    activities: Vec<ActivityLog>,
    projects: Vec<Project>,
    selected_project: Option<String>,
    clock: Box<dyn Clock>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    /// Empty store on the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            agents: Vec::new(),
            tasks: Vec::new(),
            activities: Vec::new(),
            projects: Vec::new(),
            selected_project: None,
            clock,
        }
    }

    /// Current time as seen by this store.
    #[must_use]
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Activity feed, most recent first.
    #[must_use]
    pub fn activities(&self) -> &[ActivityLog] {
        &self.activities
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn selected_project(&self) -> Option<&str> {
        self.selected_project.as_deref()
    }

    #[must_use]
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Tasks under the current project filter, in store order.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_by_project(&self.tasks, self.selected_project())
    }

    // -----------------------------------------------------------------------
    // Wholesale replacement (start-up seeding)
    // -----------------------------------------------------------------------

    pub fn set_agents(&mut self, agents: Vec<Agent>) {
        debug!(count = agents.len(), "set agents");
        self.agents = agents;
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        debug!(count = tasks.len(), "set tasks");
        self.tasks = tasks;
    }

    /// Replace the feed. The list is taken as newest-first and is not
    /// truncated.
    pub fn set_activities(&mut self, activities: Vec<ActivityLog>) {
        debug!(count = activities.len(), "set activities");
        self.activities = activities;
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        debug!(count = projects.len(), "set projects");
        self.projects = projects;
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Merge `update` into the agent with `id`. Unknown ids are ignored.
    pub fn update_agent(&mut self, id: &str, update: AgentUpdate) {
        match self.agents.iter_mut().find(|a| a.id == id) {
            Some(agent) => {
                update.apply_to(agent);
                debug!(agent = id, status = %agent.status, "agent updated");
            }
            None => debug!(agent = id, "update_agent: no such agent"),
        }
    }

    /// Append `task` exactly as given.
    pub fn add_task(&mut self, task: Task) {
        debug!(task = %task.id, status = %task.status, "task added");
        self.tasks.push(task);
    }

    /// Merge `update` into the task with `id` and stamp `updated_at`.
    ///
    /// A status change made here does not touch `completed_at`; use
    /// [`Self::move_task`] for workflow moves.
    pub fn update_task(&mut self, id: &str, update: TaskUpdate) {
        let now = self.clock.now();
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                update.apply_to(task);
                task.updated_at = now;
                debug!(task = id, "task updated");
            }
            None => debug!(task = id, "update_task: no such task"),
        }
    }

    /// Set the workflow status of a task.
    ///
    /// `completed_at` is stamped when `status` is [`TaskStatus::Done`] and
    /// left as it was otherwise, including when a done task moves back.
    pub fn move_task(&mut self, id: &str, status: TaskStatus) {
        let now = self.clock.now();
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                let from = task.status;
                task.status = status;
                task.updated_at = now;
                if status == TaskStatus::Done {
                    task.completed_at = Some(now);
                }
                debug!(task = id, %from, to = %status, "task moved");
            }
            None => debug!(task = id, "move_task: no such task"),
        }
    }

    pub fn delete_task(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        debug!(task = id, removed = before - self.tasks.len(), "task deleted");
    }

    /// Prepend `entry` and keep only the newest [`ACTIVITY_CAP`] entries.
    ///
    /// Recency is insertion order; timestamps are never consulted, so a
    /// backdated entry still lands at the head.
    pub fn add_activity(&mut self, entry: ActivityLog) {
        debug!(activity = %entry.id, kind = %entry.kind, "activity added");
        self.activities.insert(0, entry);
        self.activities.truncate(ACTIVITY_CAP);
    }

    pub fn add_project(&mut self, project: Project) {
        debug!(project = %project.id, "project added");
        self.projects.push(project);
    }

    /// Set the board filter; `None` shows every project.
    pub fn select_project(&mut self, id: Option<String>) {
        debug!(project = ?id, "project selected");
        self.selected_project = id;
    }
}
