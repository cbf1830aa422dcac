//! `zhq board`: the kanban board grouped by column.

use crate::cmd::parse_enum_flag;
use crate::output::{OutputMode, pretty_rule, render_mode};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use zayan_core::board::{BoardStats, COLUMNS, active_agent_count, assignee_label, column_tasks};
use zayan_core::model::{Priority, TaskStatus};
use zayan_core::store::DashboardStore;

#[derive(Args, Debug, Default)]
pub struct BoardArgs {
    /// Only show tasks of this project id.
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Only show this column (backlog, todo, in_progress, review, done).
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Only show tasks of this priority (low, medium, high, urgent).
    #[arg(long)]
    pub priority: Option<String>,
}

/// Narrowing applied on top of the project filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub assignee: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColumnReport {
    pub status: TaskStatus,
    pub label: &'static str,
    pub tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Counters over every task, whatever the filter.
    pub stats: BoardStats,
    pub active_agents: usize,
    pub columns: Vec<ColumnReport>,
}

/// Snapshot the board as the dashboard would draw it.
pub fn build_board(store: &DashboardStore, filter: BoardFilter) -> BoardReport {
    let visible: Vec<_> = store
        .visible_tasks()
        .into_iter()
        .filter(|task| filter.priority.is_none_or(|p| task.priority == p))
        .collect();
    let columns = COLUMNS
        .iter()
        .filter(|column| filter.status.is_none_or(|s| column.status == s))
        .map(|column| ColumnReport {
            status: column.status,
            label: column.label,
            tasks: column_tasks(visible.iter().copied(), column.status)
                .into_iter()
                .map(|task| TaskRow {
                    id: task.id.clone(),
                    title: task.title.clone(),
                    priority: task.priority,
                    assigned_to: task.assigned_to.clone(),
                    assignee: assignee_label(store, task),
                    tags: task.tags.clone(),
                })
                .collect(),
        })
        .collect();

    BoardReport {
        project: store.selected_project().map(str::to_string),
        stats: BoardStats::from_tasks(store.tasks()),
        active_agents: active_agent_count(store.agents()),
        columns,
    }
}

fn write_text(report: &BoardReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "status  id  priority  assignee  title")?;
    for column in &report.columns {
        for task in &column.tasks {
            writeln!(
                w,
                "{}  {}  {}  {}  {}",
                column.status,
                task.id,
                task.priority,
                task.assigned_to.as_deref().unwrap_or("-"),
                task.title
            )?;
        }
    }
    Ok(())
}

fn write_pretty(report: &BoardReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "Tableau  {}  ·  {}",
        report.stats.summary(),
        zayan_core::board::active_agents_label(report.active_agents)
    )?;
    if let Some(project) = &report.project {
        writeln!(w, "Projet : {project}")?;
    }
    pretty_rule(w)?;
    for column in &report.columns {
        writeln!(w, "{} ({})", column.label, column.tasks.len())?;
        if column.tasks.is_empty() {
            writeln!(w, "  Aucune tâche")?;
        }
        for task in &column.tasks {
            writeln!(w, "  [{}] {}", task.priority.label(), task.title)?;
            let tags = if task.tags.is_empty() {
                String::new()
            } else {
                format!("  #{}", task.tags.join(" #"))
            };
            writeln!(w, "      {}{tags}", task.assignee)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

pub fn run_board(args: &BoardArgs, output: OutputMode) -> anyhow::Result<()> {
    let filter = BoardFilter {
        status: parse_enum_flag(args.status.as_deref(), output)?,
        priority: parse_enum_flag(args.priority.as_deref(), output)?,
    };
    let mut store = zayan_core::seed::seeded_store();
    store.select_project(args.project.clone());
    let report = build_board(&store, filter);
    render_mode(output, &report, write_text, write_pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zayan_core::seed::seeded_store;

    #[test]
    fn seeded_board_has_five_columns() {
        let report = build_board(&seeded_store(), BoardFilter::default());
        let labels: Vec<_> = report.columns.iter().map(|c| c.label).collect();
        assert_eq!(labels, ["Backlog", "À faire", "En cours", "Review", "Terminé"]);
        assert_eq!(report.stats.total, 3);
        assert_eq!(report.columns[4].tasks[0].id, "1");
        assert_eq!(report.columns[1].tasks[0].assignee, "🎨 Nova");
    }

    #[test]
    fn unknown_project_empties_columns_but_not_stats() {
        let mut store = seeded_store();
        store.select_project(Some("nope".to_string()));
        let report = build_board(&store, BoardFilter::default());
        assert!(report.columns.iter().all(|c| c.tasks.is_empty()));
        assert_eq!(report.stats.total, 3);
        assert_eq!(report.project.as_deref(), Some("nope"));
    }

    #[test]
    fn text_rows_are_one_per_task() {
        let report = build_board(&seeded_store(), BoardFilter::default());
        let mut buf = Vec::new();
        write_text(&report, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("backlog  3  high  backend  API Authentication"));
    }

    #[test]
    fn pretty_shows_empty_columns() {
        let report = build_board(&seeded_store(), BoardFilter::default());
        let mut buf = Vec::new();
        write_pretty(&report, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("En cours (0)"));
        assert!(text.contains("Aucune tâche"));
        assert!(text.contains("0 agents actifs"));
    }

    #[test]
    fn status_filter_keeps_one_column() {
        let filter = BoardFilter {
            status: Some(TaskStatus::Done),
            ..BoardFilter::default()
        };
        let report = build_board(&seeded_store(), filter);
        assert_eq!(report.columns.len(), 1);
        assert_eq!(report.columns[0].status, TaskStatus::Done);
        assert_eq!(report.columns[0].tasks[0].id, "1");
        assert_eq!(report.stats.total, 3);
    }

    #[test]
    fn priority_filter_narrows_every_column() {
        let count = |priority| {
            let filter = BoardFilter {
                priority: Some(priority),
                ..BoardFilter::default()
            };
            let report = build_board(&seeded_store(), filter);
            assert_eq!(report.columns.len(), 5);
            report.columns.iter().map(|c| c.tasks.len()).sum::<usize>()
        };
        assert_eq!(count(Priority::High), 3);
        assert_eq!(count(Priority::Low), 0);
    }
}
