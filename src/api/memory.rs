use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Api, ApiError, NewTask, ProjectPatch, TaskPatch};
use crate::model::client::Client;
use crate::model::project::Project;
use crate::model::subtask::Subtask;
use crate::model::task::{Task, TaskStatus};

#[derive(Default)]
struct Store {
    tasks: Vec<Task>,
    subtasks: Vec<Subtask>,
    projects: Vec<Project>,
    clients: Vec<Client>,
    next_id: u64,
    calls: u64,
    fail_after: Option<(u64, String)>,
}

impl Store {
    /// Per-call bookkeeping: counts the call and pops a scripted failure
    /// when one is due.
    fn begin(&mut self) -> Result<(), ApiError> {
        self.calls += 1;
        match self.fail_after.take() {
            Some((0, message)) => Err(ApiError::Server(message)),
            Some((remaining, message)) => {
                self.fail_after = Some((remaining - 1, message));
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// In-memory backend: the full `Api` surface over plain vectors.
///
/// Used as the test double for the view layer and as a standalone backend
/// when embedding the engine without a server. Failures are scriptable so
/// the rollback paths can be exercised deterministically.
#[derive(Default)]
pub struct MemoryApi {
    store: Mutex<Store>,
}

impl MemoryApi {
    pub fn new() -> Self {
        MemoryApi::default()
    }

    // -- seeding --

    pub async fn seed_project(&self, project: Project) {
        self.store.lock().await.projects.push(project);
    }

    pub async fn seed_client(&self, client: Client) {
        self.store.lock().await.clients.push(client);
    }

    pub async fn seed_task(&self, task: Task) {
        self.store.lock().await.tasks.push(task);
    }

    pub async fn seed_subtask(&self, subtask: Subtask) {
        self.store.lock().await.subtasks.push(subtask);
    }

    // -- failure scripting --

    /// Fail the next incoming call with a server-style message.
    pub async fn fail_next(&self, message: &str) {
        self.fail_after(0, message).await;
    }

    /// Let `calls` further calls succeed, then fail the one after.
    pub async fn fail_after(&self, calls: u64, message: &str) {
        self.store.lock().await.fail_after = Some((calls, message.to_string()));
    }

    // -- inspection --

    /// Number of calls received, including any scripted failure
    pub async fn call_count(&self) -> u64 {
        self.store.lock().await.calls
    }

    pub async fn task(&self, task_id: &str) -> Option<Task> {
        self.store
            .lock()
            .await
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
    }

    pub async fn subtask(&self, subtask_id: &str) -> Option<Subtask> {
        self.store
            .lock()
            .await
            .subtasks
            .iter()
            .find(|s| s.id == subtask_id)
            .cloned()
    }

    pub async fn project(&self, project_id: &str) -> Option<Project> {
        self.store
            .lock()
            .await
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
    }
}

#[async_trait]
impl Api for MemoryApi {
    async fn get_subtasks(&self, task_id: &str) -> Result<Vec<Subtask>, ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        Ok(store
            .subtasks
            .iter()
            .filter(|s| s.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn create_subtask(&self, task_id: &str, title: &str) -> Result<Subtask, ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        if !store.tasks.iter().any(|t| t.id == task_id) {
            return Err(ApiError::Server(format!("task {task_id} not found")));
        }
        let id = store.fresh_id("st");
        let subtask = Subtask::new(id, title, task_id);
        store.subtasks.push(subtask.clone());
        Ok(subtask)
    }

    async fn delete_subtask(&self, subtask_id: &str) -> Result<(), ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        let before = store.subtasks.len();
        store.subtasks.retain(|s| s.id != subtask_id);
        if store.subtasks.len() == before {
            return Err(ApiError::Server(format!("subtask {subtask_id} not found")));
        }
        Ok(())
    }

    async fn toggle_subtask_completion(
        &self,
        subtask_id: &str,
        completed: bool,
    ) -> Result<(), ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        let subtask = store
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| ApiError::Server(format!("subtask {subtask_id} not found")))?;
        subtask.completed = completed;
        Ok(())
    }

    async fn get_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>, ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        Ok(store
            .tasks
            .iter()
            .filter(|t| match project_id {
                Some(pid) => t.project_id.as_deref() == Some(pid),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task, ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        let id = store.fresh_id("t");
        let mut task = Task::new(id, new_task.title.clone(), new_task.provider_id.clone());
        task.project_id = new_task.project_id.clone();
        task.priority = new_task.priority;
        task.due_date = new_task.due_date;
        store.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task, ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        let task = store
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| ApiError::Server(format!("task {task_id} not found")))?;
        // The backend stores the two completion signals as independent
        // columns; patches apply field by field, last write wins.
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        Ok(task.clone())
    }

    async fn toggle_task_completion(
        &self,
        task_id: &str,
        completed: bool,
    ) -> Result<(), ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        let task = store
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| ApiError::Server(format!("task {task_id} not found")))?;
        if completed {
            task.set_status(TaskStatus::Completed);
        } else if task.is_complete() {
            task.set_status(TaskStatus::Todo);
        }
        Ok(())
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        let before = store.tasks.len();
        store.tasks.retain(|t| t.id != task_id);
        if store.tasks.len() == before {
            return Err(ApiError::Server(format!("task {task_id} not found")));
        }
        store.subtasks.retain(|s| s.task_id != task_id);
        Ok(())
    }

    async fn get_project(&self, project_id: &str) -> Result<Project, ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        store
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| ApiError::Server(format!("project {project_id} not found")))
    }

    async fn update_project(
        &self,
        project_id: &str,
        patch: &ProjectPatch,
    ) -> Result<(), ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        let project = store
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| ApiError::Server(format!("project {project_id} not found")))?;
        if let Some(name) = &patch.name {
            project.name = name.clone();
        }
        if let Some(status) = &patch.status {
            project.status = status.clone();
        }
        Ok(())
    }

    async fn get_clients(&self) -> Result<Vec<Client>, ApiError> {
        let mut store = self.store.lock().await;
        store.begin()?;
        Ok(store.clients.clone())
    }
}
