use crate::model::project::{Project, ProjectStatus};
use crate::model::subtask::Subtask;
use crate::model::task::{Task, TaskStatus};

/// A parent-entity transition produced by a cascade recomputation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeEvent {
    /// Every subtask of the task is complete; the task was completed locally
    TaskCompleted { task_id: String },
    /// Every task of the project is complete; the project was completed locally
    ProjectCompleted { project_id: String },
}

// ---------------------------------------------------------------------------
// Completion cascades
//
// Both rules are fire-forward only: children going incomplete again never
// revert an already-completed parent. Conditions are re-derived from the
// collections passed in, so callers can (and must) re-run these after every
// mutation rather than caching "about to complete" flags across awaits.
// ---------------------------------------------------------------------------

/// Re-evaluate the task auto-completion rule against the latest subtask
/// collection. Only subtasks owned by `task` count; a task with no subtasks
/// never auto-completes.
pub fn recompute_task_completion(task: &mut Task, subtasks: &[Subtask]) -> Option<CascadeEvent> {
    if task.is_complete() {
        return None;
    }
    let mut owned = subtasks.iter().filter(|s| s.task_id == task.id).peekable();
    if owned.peek().is_none() {
        return None;
    }
    if owned.all(|s| s.completed) {
        task.set_status(TaskStatus::Completed);
        return Some(CascadeEvent::TaskCompleted {
            task_id: task.id.clone(),
        });
    }
    None
}

/// Re-evaluate the project auto-completion rule against the latest task
/// list. A project with zero tasks never auto-completes.
pub fn recompute_project_completion(
    project: &mut Project,
    tasks: &[Task],
) -> Option<CascadeEvent> {
    if project.status.is_completed() {
        return None;
    }
    if tasks.is_empty() {
        return None;
    }
    if tasks.iter().all(|t| t.status == TaskStatus::Completed) {
        project.status = ProjectStatus::Completed;
        return Some(CascadeEvent::ProjectCompleted {
            project_id: project.id.clone(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtask(id: &str, task_id: &str, completed: bool) -> Subtask {
        let mut s = Subtask::new(id, format!("step {id}"), task_id);
        s.completed = completed;
        s
    }

    fn completed_task(id: &str) -> Task {
        let mut t = Task::new(id, format!("task {id}"), "prov-1");
        t.set_status(TaskStatus::Completed);
        t
    }

    // -----------------------------------------------------------------------
    // Task rule
    // -----------------------------------------------------------------------

    #[test]
    fn completes_task_when_all_subtasks_done() {
        let mut task = Task::new("t-1", "Design homepage", "prov-1");
        let subtasks = vec![
            subtask("s-1", "t-1", true),
            subtask("s-2", "t-1", true),
            subtask("s-3", "t-1", true),
        ];
        let event = recompute_task_completion(&mut task, &subtasks);
        assert_eq!(
            event,
            Some(CascadeEvent::TaskCompleted {
                task_id: "t-1".to_string()
            })
        );
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.completed);
    }

    #[test]
    fn does_not_fire_while_a_subtask_is_incomplete() {
        let mut task = Task::new("t-1", "Design homepage", "prov-1");
        let subtasks = vec![subtask("s-1", "t-1", true), subtask("s-2", "t-1", false)];
        assert_eq!(recompute_task_completion(&mut task, &subtasks), None);
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(!task.completed);
    }

    #[test]
    fn never_fires_for_a_task_with_no_subtasks() {
        let mut task = Task::new("t-1", "Lone task", "prov-1");
        assert_eq!(recompute_task_completion(&mut task, &[]), None);
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn ignores_subtasks_of_other_tasks() {
        let mut task = Task::new("t-1", "Design homepage", "prov-1");
        // All complete, but none of them belong to t-1.
        let subtasks = vec![subtask("s-1", "t-9", true), subtask("s-2", "t-9", true)];
        assert_eq!(recompute_task_completion(&mut task, &subtasks), None);
    }

    #[test]
    fn does_not_revert_a_completed_task() {
        let mut task = completed_task("t-1");
        let subtasks = vec![subtask("s-1", "t-1", false)];
        assert_eq!(recompute_task_completion(&mut task, &subtasks), None);
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.completed);
    }

    // -----------------------------------------------------------------------
    // Project rule
    // -----------------------------------------------------------------------

    #[test]
    fn completes_project_when_all_tasks_done() {
        let mut project = Project::new("pr-1", "Website Redesign", "prov-1");
        let tasks = vec![completed_task("t-1"), completed_task("t-2")];
        let event = recompute_project_completion(&mut project, &tasks);
        assert_eq!(
            event,
            Some(CascadeEvent::ProjectCompleted {
                project_id: "pr-1".to_string()
            })
        );
        assert_eq!(project.status, ProjectStatus::Completed);
    }

    #[test]
    fn does_not_fire_while_a_task_is_open() {
        let mut project = Project::new("pr-1", "Website Redesign", "prov-1");
        let mut open = Task::new("t-2", "QA pass", "prov-1");
        open.set_status(TaskStatus::InProgress);
        let tasks = vec![completed_task("t-1"), open];
        assert_eq!(recompute_project_completion(&mut project, &tasks), None);
        assert_eq!(project.status, ProjectStatus::InProgress);
    }

    #[test]
    fn empty_project_is_never_trivially_complete() {
        let mut project = Project::new("pr-1", "Empty", "prov-1");
        assert_eq!(recompute_project_completion(&mut project, &[]), None);
        assert_eq!(project.status, ProjectStatus::InProgress);
    }

    #[test]
    fn already_completed_project_is_left_alone() {
        let mut project = Project::new("pr-1", "Done deal", "prov-1");
        project.status = ProjectStatus::Completed;
        let mut open = Task::new("t-1", "Late addition", "prov-1");
        open.set_status(TaskStatus::Todo);
        // An open task showing up later does not revert the project.
        assert_eq!(recompute_project_completion(&mut project, &[open]), None);
        assert_eq!(project.status, ProjectStatus::Completed);
    }

    #[test]
    fn fires_from_free_text_status() {
        let mut project = Project::new("pr-1", "Carry-over", "prov-1");
        project.status = ProjectStatus::Other("On Hold".to_string());
        let tasks = vec![completed_task("t-1")];
        assert!(recompute_project_completion(&mut project, &tasks).is_some());
        assert_eq!(project.status, ProjectStatus::Completed);
    }
}
