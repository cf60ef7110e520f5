pub mod http;
pub mod memory;

pub use http::HttpApi;
pub use memory::MemoryApi;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::model::client::Client;
use crate::model::project::{Project, ProjectStatus};
use crate::model::subtask::Subtask;
use crate::model::task::{Priority, Task, TaskStatus};

/// Error type for backend calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered and rejected the request
    #[error("{0}")]
    Server(String),
    /// The request never produced a usable server answer
    #[error("request failed: {0}")]
    Transport(String),
}

/// Partial task update. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    /// Status change with the completed projection kept in step, so the
    /// two server-side completion signals cannot drift apart.
    pub fn status(status: TaskStatus) -> Self {
        TaskPatch {
            status: Some(status),
            completed: Some(status == TaskStatus::Completed),
            ..Default::default()
        }
    }
}

/// Partial project update
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        ProjectPatch {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Payload for creating a task
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub provider_id: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, provider_id: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            project_id: None,
            priority: Priority::default(),
            due_date: None,
            provider_id: provider_id.into(),
        }
    }
}

/// The REST backend the dashboard talks to, as the view layer sees it.
///
/// Every operation is field-level idempotent: setting the same status or
/// completed flag twice is safe, which is what lets the cascade rules
/// re-issue confirmations without coordination.
#[async_trait]
pub trait Api: Send + Sync {
    // -- subtasks --
    async fn get_subtasks(&self, task_id: &str) -> Result<Vec<Subtask>, ApiError>;
    async fn create_subtask(&self, task_id: &str, title: &str) -> Result<Subtask, ApiError>;
    async fn delete_subtask(&self, subtask_id: &str) -> Result<(), ApiError>;
    async fn toggle_subtask_completion(
        &self,
        subtask_id: &str,
        completed: bool,
    ) -> Result<(), ApiError>;

    // -- tasks --
    async fn get_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>, ApiError>;
    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError>;
    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task, ApiError>;
    async fn toggle_task_completion(&self, task_id: &str, completed: bool)
    -> Result<(), ApiError>;
    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError>;

    // -- projects --
    async fn get_project(&self, project_id: &str) -> Result<Project, ApiError>;
    async fn update_project(&self, project_id: &str, patch: &ProjectPatch)
    -> Result<(), ApiError>;

    // -- clients --
    async fn get_clients(&self) -> Result<Vec<Client>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_patch_skips_absent_fields() {
        let patch = TaskPatch::status(TaskStatus::InProgress);
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"status":"in-progress","completed":false}"#);
    }

    #[test]
    fn status_patch_carries_the_completed_projection() {
        let patch = TaskPatch::status(TaskStatus::Completed);
        assert_eq!(patch.completed, Some(true));
        let patch = TaskPatch::status(TaskStatus::Review);
        assert_eq!(patch.completed, Some(false));
    }
}
