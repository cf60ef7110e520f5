use indexmap::IndexMap;

use crate::model::client::Client;
use crate::model::project::Project;
use crate::model::task::{Task, TaskStatus};

/// Column bucket for tasks that belong to no project
pub const PERSONAL_COLUMN: &str = "Personal";
/// Column bucket for tasks whose project has no client
pub const NO_CLIENT_COLUMN: &str = "No client";

/// How board columns are keyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    Status,
    Project,
    Client,
}

/// Transient pointer state for a drag in progress.
///
/// Purely ephemeral UI state: reset unconditionally at drag end, whatever
/// the drop outcome was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    /// Task currently being dragged
    pub dragging: Option<String>,
    /// Column key currently hovered as a drop target
    pub hovered: Option<String>,
}

impl DragState {
    pub fn begin(&mut self, task_id: &str) {
        self.dragging = Some(task_id.to_string());
        self.hovered = None;
    }

    pub fn hover(&mut self, column: &str) {
        if self.dragging.is_some() {
            self.hovered = Some(column.to_string());
        }
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// Unconditional reset at drag end
    pub fn end(&mut self) {
        self.dragging = None;
        self.hovered = None;
    }
}

/// Group tasks into board columns, preserving collection order within each
/// column. Status grouping seeds every canonical column so empty ones still
/// render; project/client grouping seeds one column per known entity plus a
/// bucket for the unassigned.
pub fn columns<'a>(
    tasks: &'a [Task],
    group_by: GroupBy,
    projects: &[Project],
    clients: &[Client],
) -> IndexMap<String, Vec<&'a Task>> {
    let mut columns: IndexMap<String, Vec<&Task>> = IndexMap::new();
    match group_by {
        GroupBy::Status => {
            for status in TaskStatus::ALL {
                columns.insert(status.as_str().to_string(), Vec::new());
            }
            for task in tasks {
                columns
                    .entry(task.status.as_str().to_string())
                    .or_default()
                    .push(task);
            }
        }
        GroupBy::Project => {
            for project in projects {
                columns.insert(project.name.clone(), Vec::new());
            }
            for task in tasks {
                let key = match &task.project_id {
                    Some(pid) => projects
                        .iter()
                        .find(|p| p.id == *pid)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| pid.clone()),
                    None => PERSONAL_COLUMN.to_string(),
                };
                columns.entry(key).or_default().push(task);
            }
        }
        GroupBy::Client => {
            for client in clients {
                columns.insert(client.name.clone(), Vec::new());
            }
            for task in tasks {
                let key = task
                    .project_id
                    .as_ref()
                    .and_then(|pid| projects.iter().find(|p| p.id == *pid))
                    .and_then(|p| p.client_id.as_ref())
                    .and_then(|cid| clients.iter().find(|c| c.id == *cid))
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| NO_CLIENT_COLUMN.to_string());
                columns.entry(key).or_default().push(task);
            }
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_status(id: &str, status: TaskStatus) -> Task {
        let mut t = Task::new(id, format!("task {id}"), "prov-1");
        t.set_status(status);
        t
    }

    fn render(columns: &IndexMap<String, Vec<&Task>>) -> String {
        columns
            .iter()
            .map(|(key, tasks)| {
                let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
                format!("{key}: [{}]", ids.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn status_grouping_seeds_all_columns_in_order() {
        let tasks = vec![
            task_with_status("t-1", TaskStatus::InProgress),
            task_with_status("t-2", TaskStatus::Todo),
            task_with_status("t-3", TaskStatus::InProgress),
        ];
        let columns = columns(&tasks, GroupBy::Status, &[], &[]);
        insta::assert_snapshot!(render(&columns), @r"
        todo: [t-2]
        in-progress: [t-1, t-3]
        review: []
        completed: []
        ");
    }

    #[test]
    fn project_grouping_buckets_personal_tasks() {
        let mut assigned = task_with_status("t-1", TaskStatus::Todo);
        assigned.project_id = Some("pr-1".to_string());
        let personal = task_with_status("t-2", TaskStatus::Todo);

        let projects = vec![Project::new("pr-1", "Website Redesign", "prov-1")];
        let tasks = [assigned, personal];
        let columns = columns(&tasks, GroupBy::Project, &projects, &[]);

        assert_eq!(columns["Website Redesign"].len(), 1);
        assert_eq!(columns[PERSONAL_COLUMN].len(), 1);
    }

    #[test]
    fn client_grouping_follows_the_project_chain() {
        let mut task = task_with_status("t-1", TaskStatus::Todo);
        task.project_id = Some("pr-1".to_string());
        let mut orphan = task_with_status("t-2", TaskStatus::Todo);
        orphan.project_id = Some("pr-2".to_string());

        let mut project = Project::new("pr-1", "Website Redesign", "prov-1");
        project.client_id = Some("c-1".to_string());
        let unclaimed = Project::new("pr-2", "Internal Tools", "prov-1");
        let clients = vec![Client {
            id: "c-1".to_string(),
            name: "Acme Co".to_string(),
            provider_id: "prov-1".to_string(),
        }];

        let tasks = [task, orphan];
        let projects = [project, unclaimed];
        let columns = columns(&tasks, GroupBy::Client, &projects, &clients);
        assert_eq!(columns["Acme Co"].len(), 1);
        assert_eq!(columns[NO_CLIENT_COLUMN].len(), 1);
    }

    #[test]
    fn drag_state_resets_unconditionally() {
        let mut drag = DragState::default();
        drag.begin("t-1");
        drag.hover("in-progress");
        assert_eq!(drag.dragging.as_deref(), Some("t-1"));
        assert_eq!(drag.hovered.as_deref(), Some("in-progress"));

        drag.end();
        assert_eq!(drag, DragState::default());
    }

    #[test]
    fn hover_without_a_drag_is_ignored() {
        let mut drag = DragState::default();
        drag.hover("review");
        assert_eq!(drag.hovered, None);
    }
}
