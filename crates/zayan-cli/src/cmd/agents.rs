//! `zhq agents`: list agents with status, role and current load.

use crate::cmd::parse_enum_flag;
use crate::output::{OutputMode, pretty_section, render_mode};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use zayan_core::model::AgentStatus;
use zayan_core::store::DashboardStore;

#[derive(Args, Debug, Default)]
pub struct AgentsArgs {
    /// Only list agents in this status (idle, working, done, error).
    #[arg(long, short = 's')]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentInfo {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub role: String,
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    pub specialties: Vec<String>,
    /// Tasks assigned to this agent, any status.
    pub assigned: usize,
}

pub fn collect_agents(store: &DashboardStore, status: Option<AgentStatus>) -> Vec<AgentInfo> {
    store
        .agents()
        .iter()
        .filter(|agent| status.is_none_or(|s| agent.status == s))
        .map(|agent| AgentInfo {
            id: agent.id.clone(),
            name: agent.name.clone(),
            emoji: agent.emoji.clone(),
            role: agent.role.clone(),
            status: agent.status,
            current_task: agent.current_task.clone(),
            specialties: agent.specialties.clone(),
            assigned: store
                .tasks()
                .iter()
                .filter(|t| t.assigned_to.as_deref() == Some(agent.id.as_str()))
                .count(),
        })
        .collect()
}

fn write_text(rows: &Vec<AgentInfo>, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "id  name  status  assigned")?;
    for row in rows {
        writeln!(w, "{}  {}  {}  {}", row.id, row.name, row.status, row.assigned)?;
    }
    Ok(())
}

fn write_pretty(rows: &Vec<AgentInfo>, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Équipe")?;
    for row in rows {
        writeln!(
            w,
            "{} {:<10} {:<22} {}",
            row.emoji,
            row.name,
            row.role,
            row.status.label()
        )?;
        if let Some(task) = &row.current_task {
            writeln!(w, "     → {task}")?;
        }
        writeln!(w, "     {}", row.specialties.join(", "))?;
    }
    Ok(())
}

pub fn run_agents(args: &AgentsArgs, output: OutputMode) -> anyhow::Result<()> {
    let status = parse_enum_flag(args.status.as_deref(), output)?;
    let store = zayan_core::seed::seeded_store();
    let rows = collect_agents(&store, status);
    render_mode(output, &rows, write_text, write_pretty)
}
