use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Workflow status of a task — the kanban column it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
}

impl TaskStatus {
    /// Canonical board column order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Completed,
    ];

    /// The wire name used by the backend (also the column key)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parse a wire name into a status
    pub fn from_str(s: &str) -> Option<TaskStatus> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in-progress" => Some(TaskStatus::InProgress),
            "review" => Some(TaskStatus::Review),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A work item owned by a project, or standalone ("personal") when
/// `project_id` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    /// Cached projection of `status == Completed`. Written only by
    /// [`Task::set_status`]; never set independently.
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub project_id: Option<String>,
    pub provider_id: String,
}

impl Task {
    /// Create a new todo task with default priority and no due date
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        provider_id: impl Into<String>,
    ) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::Todo,
            completed: false,
            priority: Priority::default(),
            due_date: None,
            project_id: None,
            provider_id: provider_id.into(),
        }
    }

    /// The single transition point for the two completion signals:
    /// `completed` tracks `status == Completed` atomically.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.completed = status == TaskStatus::Completed;
    }

    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
