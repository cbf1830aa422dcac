//! Project filter for the task board.
//!
//! Recomputed on every read; the collections are small enough that a cached
//! view would only add invalidation bugs.

use crate::model::Task;

/// Tasks visible under `project`: all of them for `None`, otherwise only
/// those whose `project_id` equals `project`. Relative order is preserved.
#[must_use]
pub fn filter_by_project<'a>(tasks: &'a [Task], project: Option<&str>) -> Vec<&'a Task> {
    match project {
        None => tasks.iter().collect(),
        Some(project) => tasks
            .iter()
            .filter(|task| task.project_id.as_deref() == Some(project))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TaskStatus};
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    fn task(id: &str, project: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            assigned_to: None,
            project_id: project.map(str::to_string),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            completed_at: None,
            tags: Vec::new(),
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn no_filter_returns_everything() {
        let tasks = vec![task("1", Some("signlink")), task("2", None), task("3", Some("other"))];
        assert_eq!(ids(&filter_by_project(&tasks, None)), ["1", "2", "3"]);
    }

    #[test]
    fn filter_keeps_only_matching_project() {
        let tasks = vec![
            task("1", Some("signlink")),
            task("2", None),
            task("3", Some("other")),
            task("4", Some("signlink")),
        ];
        assert_eq!(ids(&filter_by_project(&tasks, Some("signlink"))), ["1", "4"]);
        assert!(filter_by_project(&tasks, Some("missing")).is_empty());
    }

    #[test]
    fn unassigned_tasks_never_match_a_project() {
        let tasks = vec![task("1", None)];
        assert!(filter_by_project(&tasks, Some("")).is_empty());
    }

    proptest! {
        #[test]
        fn prop_filter_is_an_order_preserving_subsequence(
            projects in proptest::collection::vec(proptest::option::of(0u8..3), 0..40),
            wanted in proptest::option::of(0u8..3),
        ) {
            let tasks: Vec<Task> = projects
                .iter()
                .enumerate()
                .map(|(i, p)| task(&i.to_string(), p.map(|p| format!("p{p}")).as_deref()))
                .collect();
            let wanted = wanted.map(|p| format!("p{p}"));
            let visible = filter_by_project(&tasks, wanted.as_deref());

            match wanted.as_deref() {
                None => prop_assert_eq!(visible.len(), tasks.len()),
                Some(project) => {
                    let expected = tasks
                        .iter()
                        .filter(|t| t.project_id.as_deref() == Some(project))
                        .count();
                    prop_assert_eq!(visible.len(), expected);
                    for t in &visible {
                        prop_assert_eq!(t.project_id.as_deref(), Some(project));
                    }
                }
            }

            let positions: Vec<usize> = visible
                .iter()
                .map(|t| t.id.parse::<usize>().unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
