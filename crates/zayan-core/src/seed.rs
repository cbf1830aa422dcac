//! Built-in sample data installed at start-up.
//!
//! Every timestamp is the seeding instant. Seeding goes through the store's
//! wholesale `set_*` commands, so calling [`seed_store`] twice resets the
//! dashboard rather than duplicating rows.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::model::{
    ActivityLog, ActivityType, Agent, AgentStatus, Priority, Project, Task, TaskStatus,
};
use crate::store::DashboardStore;

/// Agent that fronts unattributed actions (deletions, unassigned moves).
pub const MANAGER_AGENT_ID: &str = "zayan";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn agent(id: &str, name: &str, role: &str, emoji: &str, specialties: &[&str], color: &str) -> Agent {
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        emoji: emoji.to_string(),
        status: AgentStatus::Idle,
        current_task: None,
        specialties: strings(specialties),
        color: color.to_string(),
    }
}

#[must_use]
pub fn default_agents() -> Vec<Agent> {
    vec![
        agent(
            MANAGER_AGENT_ID,
            "Zayan",
            "Manager / Architecte",
            "🦦",
            &["Architecture", "Coordination", "Review", "Specs"],
            "#3b82f6",
        ),
        agent(
            "frontend",
            "Nova",
            "Frontend Developer",
            "🎨",
            &["React", "Next.js", "Tailwind", "UI/UX"],
            "#ec4899",
        ),
        agent(
            "backend",
            "Atlas",
            "Backend Developer",
            "⚙️",
            &["Node.js", "Python", "APIs", "Database"],
            "#10b981",
        ),
        agent(
            "devops",
            "Bolt",
            "DevOps Engineer",
            "🚀",
            &["Deploy", "CI/CD", "Docker", "Monitoring"],
            "#f59e0b",
        ),
        agent(
            "qa",
            "Sentinel",
            "QA / Security",
            "🧪",
            &["Testing", "Security Audit", "Code Review", "Bugs"],
            "#8b5cf6",
        ),
    ]
}

#[must_use]
pub fn default_projects(now: DateTime<Utc>) -> Vec<Project> {
    vec![Project {
        id: "signlink".to_string(),
        name: "SignLink".to_string(),
        description: "Signature de documents en ligne".to_string(),
        created_at: now,
        color: "#3b82f6".to_string(),
    }]
}

fn sample_task(
    now: DateTime<Utc>,
    id: &str,
    title: &str,
    description: &str,
    status: TaskStatus,
    assigned_to: &str,
    tags: &[&str],
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        priority: Priority::High,
        assigned_to: Some(assigned_to.to_string()),
        project_id: Some("signlink".to_string()),
        created_at: now,
        updated_at: now,
        completed_at: None,
        tags: strings(tags),
    }
}

#[must_use]
pub fn sample_tasks(now: DateTime<Utc>) -> Vec<Task> {
    vec![
        sample_task(
            now,
            "1",
            "Setup projet Next.js",
            "Initialiser le projet avec la stack choisie",
            TaskStatus::Done,
            MANAGER_AGENT_ID,
            &["setup", "infra"],
        ),
        sample_task(
            now,
            "2",
            "Design système UI",
            "Créer les composants de base et le design system",
            TaskStatus::Todo,
            "frontend",
            &["ui", "design"],
        ),
        sample_task(
            now,
            "3",
            "API Authentication",
            "Implémenter auth avec JWT et sessions",
            TaskStatus::Backlog,
            "backend",
            &["api", "auth", "security"],
        ),
    ]
}

#[must_use]
pub fn sample_activities(now: DateTime<Utc>) -> Vec<ActivityLog> {
    vec![ActivityLog::new(
        "1",
        MANAGER_AGENT_ID,
        ActivityType::Message,
        "Dashboard Zayan HQ initialisé",
        now,
    )]
}

/// Replace the store contents with the sample dashboard.
pub fn seed_store(store: &mut DashboardStore) {
    let now = store.now();
    store.set_agents(default_agents());
    store.set_projects(default_projects(now));
    store.set_tasks(sample_tasks(now));
    store.set_activities(sample_activities(now));
    info!(
        agents = store.agents().len(),
        tasks = store.tasks().len(),
        "dashboard seeded"
    );
}

/// A freshly seeded store on the wall clock.
#[must_use]
pub fn seeded_store() -> DashboardStore {
    let mut store = DashboardStore::new();
    seed_store(&mut store);
    store
}
