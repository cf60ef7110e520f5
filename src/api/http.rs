use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::{Api, ApiError, NewTask, ProjectPatch, TaskPatch};
use crate::model::client::Client;
use crate::model::config::DashboardConfig;
use crate::model::project::Project;
use crate::model::subtask::Subtask;
use crate::model::task::Task;

/// Response envelope used by every backend route
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// Thin request wrappers over the dashboard's REST backend.
///
/// This type does no state management of its own: it translates trait
/// calls into HTTP requests and the `{success, data?, error?}` envelope
/// back into `Result`s. Everything stateful lives in the view layer.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    provider_id: Option<String>,
}

impl HttpApi {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpApi {
            http,
            base_url: config.backend.base_url.trim_end_matches('/').to_string(),
            provider_id: config.provider.id.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let envelope: Envelope<T> = self.execute_raw(request).await?;
        envelope
            .data
            .ok_or_else(|| ApiError::Transport("response missing data".to_string()))
    }

    /// For routes whose success answer carries no payload
    async fn execute_unit(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let _: Envelope<serde_json::Value> = self.execute_raw(request).await?;
        Ok(())
    }

    async fn execute_raw<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if envelope.success {
            Ok(envelope)
        } else {
            Err(ApiError::Server(
                envelope
                    .error
                    .unwrap_or_else(|| "unknown server error".to_string()),
            ))
        }
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn get_subtasks(&self, task_id: &str) -> Result<Vec<Subtask>, ApiError> {
        self.execute(self.http.get(self.url(&format!("/tasks/{task_id}/subtasks"))))
            .await
    }

    async fn create_subtask(&self, task_id: &str, title: &str) -> Result<Subtask, ApiError> {
        self.execute(
            self.http
                .post(self.url(&format!("/tasks/{task_id}/subtasks")))
                .json(&json!({ "title": title })),
        )
        .await
    }

    async fn delete_subtask(&self, subtask_id: &str) -> Result<(), ApiError> {
        self.execute_unit(self.http.delete(self.url(&format!("/subtasks/{subtask_id}"))))
            .await
    }

    async fn toggle_subtask_completion(
        &self,
        subtask_id: &str,
        completed: bool,
    ) -> Result<(), ApiError> {
        debug!(subtask_id, completed, "toggle subtask");
        self.execute_unit(
            self.http
                .patch(self.url(&format!("/subtasks/{subtask_id}")))
                .json(&json!({ "completed": completed })),
        )
        .await
    }

    async fn get_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>, ApiError> {
        let mut request = self.http.get(self.url("/tasks"));
        if let Some(pid) = project_id {
            request = request.query(&[("projectId", pid)]);
        }
        if let Some(provider) = &self.provider_id {
            request = request.query(&[("providerId", provider.as_str())]);
        }
        self.execute(request).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.execute(self.http.post(self.url("/tasks")).json(task))
            .await
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task, ApiError> {
        debug!(task_id, "update task");
        self.execute(
            self.http
                .patch(self.url(&format!("/tasks/{task_id}")))
                .json(patch),
        )
        .await
    }

    async fn toggle_task_completion(
        &self,
        task_id: &str,
        completed: bool,
    ) -> Result<(), ApiError> {
        debug!(task_id, completed, "toggle task completion");
        self.execute_unit(
            self.http
                .patch(self.url(&format!("/tasks/{task_id}/completion")))
                .json(&json!({ "completed": completed })),
        )
        .await
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        self.execute_unit(self.http.delete(self.url(&format!("/tasks/{task_id}"))))
            .await
    }

    async fn get_project(&self, project_id: &str) -> Result<Project, ApiError> {
        self.execute(self.http.get(self.url(&format!("/projects/{project_id}"))))
            .await
    }

    async fn update_project(
        &self,
        project_id: &str,
        patch: &ProjectPatch,
    ) -> Result<(), ApiError> {
        debug!(project_id, "update project");
        self.execute_unit(
            self.http
                .patch(self.url(&format!("/projects/{project_id}")))
                .json(patch),
        )
        .await
    }

    async fn get_clients(&self) -> Result<Vec<Client>, ApiError> {
        let mut request = self.http.get(self.url("/clients"));
        if let Some(provider) = &self.provider_id {
            request = request.query(&[("providerId", provider.as_str())]);
        }
        self.execute(request).await
    }
}
