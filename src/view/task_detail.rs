use std::sync::Arc;

use tracing::{debug, warn};

use super::ViewError;
use super::animation::CompletionAnimation;
use crate::api::Api;
use crate::model::subtask::Subtask;
use crate::model::task::{Task, TaskStatus};
use crate::ops::cascade::{self, CascadeEvent};

/// View state for the task detail surface: one task plus its subtask
/// checklist.
///
/// Every mutation goes server-call-first, then patches the in-memory
/// collection by id against whatever it holds when the response lands, so
/// a failed call leaves local state untouched and interleaved mutations
/// are never clobbered by a stale snapshot.
pub struct TaskDetailView {
    api: Arc<dyn Api>,
    pub task: Task,
    pub subtasks: Vec<Subtask>,
    /// Last UI-visible error; cleared by the next successful interaction
    pub error: Option<String>,
    pub animation: CompletionAnimation,
}

impl TaskDetailView {
    pub fn new(api: Arc<dyn Api>, task: Task) -> Self {
        TaskDetailView {
            api,
            task,
            subtasks: Vec::new(),
            error: None,
            animation: CompletionAnimation::new(),
        }
    }

    /// Refetch the subtask checklist from the backend, replacing local
    /// state, then re-run the completion cascade.
    pub async fn refresh(&mut self) {
        match self.api.get_subtasks(&self.task.id).await {
            Ok(subtasks) => {
                self.subtasks = subtasks;
                self.error = None;
                self.recompute().await;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Toggle one subtask's completed flag.
    ///
    /// The server call precedes the local patch, so no rollback is needed:
    /// a failure surfaces the error and changes nothing locally.
    pub async fn toggle_subtask(&mut self, subtask_id: &str) -> Result<(), ViewError> {
        let current = self
            .subtasks
            .iter()
            .find(|s| s.id == subtask_id)
            .map(|s| s.completed)
            .ok_or_else(|| ViewError::SubtaskNotFound(subtask_id.to_string()))?;
        let desired = !current;

        if let Err(e) = self
            .api
            .toggle_subtask_completion(subtask_id, desired)
            .await
        {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        // Patch against the collection as it is now, not as it was when
        // the call went out.
        if let Some(subtask) = self.subtasks.iter_mut().find(|s| s.id == subtask_id) {
            subtask.completed = desired;
        }
        self.error = None;
        self.animation.fire_on_transition(current, desired);
        debug!(subtask_id, completed = desired, "subtask toggled");

        self.recompute().await;
        Ok(())
    }

    /// Manual "mark complete" button on the task itself. Also the only
    /// path that un-completes a task.
    pub async fn toggle_completion(&mut self) -> Result<(), ViewError> {
        let desired = !self.task.completed;

        if let Err(e) = self.api.toggle_task_completion(&self.task.id, desired).await {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        if desired {
            self.task.set_status(TaskStatus::Completed);
        } else {
            self.task.set_status(TaskStatus::Todo);
        }
        self.error = None;
        self.animation.fire_on_transition(!desired, desired);
        Ok(())
    }

    /// Add a subtask to the checklist
    pub async fn add_subtask(&mut self, title: &str) -> Result<(), ViewError> {
        match self.api.create_subtask(&self.task.id, title).await {
            Ok(subtask) => {
                self.subtasks.push(subtask);
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

    /// Remove a subtask from the checklist. Removing the last incomplete
    /// entry can complete the task via the cascade.
    pub async fn remove_subtask(&mut self, subtask_id: &str) -> Result<(), ViewError> {
        if !self.subtasks.iter().any(|s| s.id == subtask_id) {
            return Err(ViewError::SubtaskNotFound(subtask_id.to_string()));
        }
        if let Err(e) = self.api.delete_subtask(subtask_id).await {
            self.error = Some(e.to_string());
            return Err(e.into());
        }
        self.subtasks.retain(|s| s.id != subtask_id);
        self.error = None;
        self.recompute().await;
        Ok(())
    }

    /// Cascade watcher, run after every subtask mutation. The local patch
    /// stands whatever the confirmation call says; a confirmation failure
    /// is deliberately not surfaced as a view error.
    async fn recompute(&mut self) {
        let was_complete = self.task.completed;
        if let Some(CascadeEvent::TaskCompleted { task_id }) =
            cascade::recompute_task_completion(&mut self.task, &self.subtasks)
        {
            self.animation.fire_on_transition(was_complete, true);
            if let Err(e) = self.api.toggle_task_completion(&task_id, true).await {
                warn!(task_id = %task_id, error = %e, "task completion confirmation failed; keeping local state");
            }
        }
    }
}
