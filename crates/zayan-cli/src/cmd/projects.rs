//! `zhq projects`: list projects with their task counts.

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use zayan_core::filter::filter_by_project;
use zayan_core::store::DashboardStore;

#[derive(Args, Debug, Default)]
pub struct ProjectsArgs {}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub tasks: usize,
}

pub fn collect_projects(store: &DashboardStore) -> Vec<ProjectInfo> {
    store
        .projects()
        .iter()
        .map(|project| ProjectInfo {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            color: project.color.clone(),
            tasks: filter_by_project(store.tasks(), Some(&project.id)).len(),
        })
        .collect()
}

fn write_text(rows: &Vec<ProjectInfo>, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "id  name  tasks")?;
    for row in rows {
        writeln!(w, "{}  {}  {}", row.id, row.name, row.tasks)?;
    }
    Ok(())
}

fn write_pretty(rows: &Vec<ProjectInfo>, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Projets")?;
    if rows.is_empty() {
        return writeln!(w, "(aucun projet)");
    }
    for row in rows {
        pretty_kv(w, &row.name, format!("{} tâche(s)", row.tasks))?;
        if !row.description.is_empty() {
            writeln!(w, "{:<12} {}", "", row.description)?;
        }
    }
    Ok(())
}

pub fn run_projects(_args: &ProjectsArgs, output: OutputMode) -> anyhow::Result<()> {
    let store = zayan_core::seed::seeded_store();
    let rows = collect_projects(&store);
    render_mode(output, &rows, write_text, write_pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zayan_core::seed::seeded_store;

    #[test]
    fn seeded_project_owns_every_sample_task() {
        let rows = collect_projects(&seeded_store());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "signlink");
        assert_eq!(rows[0].tasks, 3);
    }

    #[test]
    fn text_output_lists_ids() {
        let rows = collect_projects(&seeded_store());
        let mut buf = Vec::new();
        write_text(&rows, &mut buf).expect("write");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "id  name  tasks\nsignlink  SignLink  3\n"
        );
    }
}
