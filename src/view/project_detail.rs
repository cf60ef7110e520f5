use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::ViewError;
use super::animation::CompletionAnimation;
use super::board::{self, DragState, GroupBy};
use crate::api::{Api, NewTask, ProjectPatch, TaskPatch};
use crate::model::project::{Project, ProjectStatus};
use crate::model::task::{Task, TaskStatus};
use crate::ops::cascade::{self, CascadeEvent};
use crate::ops::optimistic::OptimisticUpdate;

/// View state for the project detail surface: the project, its task list,
/// and the kanban board built over it.
///
/// The kanban drop is the one optimistic path in the engine: the task
/// moves locally before the server answers, and a rejection restores the
/// full pre-drop task list. Everything else is server-call-first.
pub struct ProjectDetailView {
    api: Arc<dyn Api>,
    pub project: Project,
    pub tasks: Vec<Task>,
    pub drag: DragState,
    /// Last UI-visible error; cleared by the next successful interaction
    pub error: Option<String>,
    pub animation: CompletionAnimation,
}

impl ProjectDetailView {
    pub fn new(api: Arc<dyn Api>, project: Project) -> Self {
        ProjectDetailView {
            api,
            project,
            tasks: Vec::new(),
            drag: DragState::default(),
            error: None,
            animation: CompletionAnimation::new(),
        }
    }

    /// Refetch the task list and the project from the backend, replacing
    /// local state, then re-run the completion cascade. This is where any
    /// unconfirmed optimistic state reconciles with the server.
    pub async fn refresh(&mut self) {
        match self.api.get_tasks(Some(&self.project.id)).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        }
        match self.api.get_project(&self.project.id).await {
            Ok(project) => self.project = project,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        }
        self.recompute().await;
    }

    /// The board columns for this project, keyed by status
    pub fn columns(&self) -> IndexMap<String, Vec<&Task>> {
        board::columns(&self.tasks, GroupBy::Status, &[], &[])
    }

    // -----------------------------------------------------------------------
    // Drag lifecycle
    // -----------------------------------------------------------------------

    pub fn begin_drag(&mut self, task_id: &str) {
        self.drag.begin(task_id);
    }

    pub fn hover_column(&mut self, column: &str) {
        self.drag.hover(column);
    }

    /// Drop the dragged task onto a status column.
    ///
    /// No-ops when nothing is dragged or the task already has that status.
    /// Otherwise: optimistic local move, then the server call; a rejection
    /// restores the full pre-drop task list and surfaces the error. Drag
    /// state resets unconditionally either way.
    pub async fn drop_on_status(&mut self, new_status: TaskStatus) -> Result<(), ViewError> {
        let Some(task_id) = self.drag.dragging.clone() else {
            self.drag.end();
            return Ok(());
        };
        self.drag.end();

        let Some(task) = self.tasks.iter().find(|t| t.id == task_id) else {
            return Err(ViewError::TaskNotFound(task_id));
        };
        if task.status == new_status {
            return Ok(());
        }
        let was_complete = task.completed;
        debug!(task_id = %task_id, status = %new_status, "kanban drop");

        let update = OptimisticUpdate::capture(&self.tasks);
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.set_status(new_status);
        }

        match self
            .api
            .update_task(&task_id, &TaskPatch::status(new_status))
            .await
        {
            Ok(_) => {
                // Optimistic state is authoritative on success; the
                // server's copy is not re-applied.
                update.commit();
                self.error = None;
                self.animation
                    .fire_on_transition(was_complete, new_status == TaskStatus::Completed);
                self.recompute().await;
                Ok(())
            }
            Err(e) => {
                update.rollback(&mut self.tasks);
                self.error = Some(e.to_string());
                warn!(task_id = %task_id, error = %e, "kanban drop rejected; rolled back");
                Err(e.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Task list operations
    // -----------------------------------------------------------------------

    /// Non-drag status change (e.g. the status dropdown on a task row).
    /// Server call first, then the local patch.
    pub async fn set_task_status(
        &mut self,
        task_id: &str,
        new_status: TaskStatus,
    ) -> Result<(), ViewError> {
        let (current_status, was_complete) = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| (t.status, t.completed))
            .ok_or_else(|| ViewError::TaskNotFound(task_id.to_string()))?;
        if current_status == new_status {
            return Ok(());
        }

        if let Err(e) = self
            .api
            .update_task(task_id, &TaskPatch::status(new_status))
            .await
        {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.set_status(new_status);
        }
        self.error = None;
        self.animation
            .fire_on_transition(was_complete, new_status == TaskStatus::Completed);
        self.recompute().await;
        Ok(())
    }

    /// Edit non-status task fields (title, priority, due date). Server
    /// call first; the updated task the backend returns replaces the
    /// local entry.
    pub async fn edit_task(&mut self, task_id: &str, patch: &TaskPatch) -> Result<(), ViewError> {
        if !self.tasks.iter().any(|t| t.id == task_id) {
            return Err(ViewError::TaskNotFound(task_id.to_string()));
        }
        match self.api.update_task(task_id, patch).await {
            Ok(updated) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                    *task = updated;
                }
                self.error = None;
                self.recompute().await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Create a task under this project
    pub async fn create_task(&mut self, title: &str) -> Result<(), ViewError> {
        let mut new_task = NewTask::new(title, self.project.provider_id.clone());
        new_task.project_id = Some(self.project.id.clone());

        match self.api.create_task(&new_task).await {
            Ok(task) => {
                self.tasks.push(task);
                self.error = None;
                self.recompute().await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Delete a task. Removing the last open task can complete the
    /// project via the cascade.
    pub async fn delete_task(&mut self, task_id: &str) -> Result<(), ViewError> {
        if !self.tasks.iter().any(|t| t.id == task_id) {
            return Err(ViewError::TaskNotFound(task_id.to_string()));
        }
        if let Err(e) = self.api.delete_task(task_id).await {
            self.error = Some(e.to_string());
            return Err(e.into());
        }
        self.tasks.retain(|t| t.id != task_id);
        self.error = None;
        self.recompute().await;
        Ok(())
    }

    /// Cascade watcher, run after every task list mutation. The local
    /// patch stands whatever the confirmation call says; a confirmation
    /// failure is deliberately not surfaced as a view error.
    async fn recompute(&mut self) {
        let was_complete = self.project.status.is_completed();
        if let Some(CascadeEvent::ProjectCompleted { project_id }) =
            cascade::recompute_project_completion(&mut self.project, &self.tasks)
        {
            self.animation.fire_on_transition(was_complete, true);
            let patch = ProjectPatch::status(ProjectStatus::Completed);
            if let Err(e) = self.api.update_project(&project_id, &patch).await {
                warn!(project_id = %project_id, error = %e, "project completion confirmation failed; keeping local state");
            }
        }
    }
}
