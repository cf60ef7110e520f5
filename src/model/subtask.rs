use serde::{Deserialize, Serialize};

/// A checklist entry owned by exactly one task. Subtasks have no
/// lifecycle outside their parent's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub task_id: String,
}

impl Subtask {
    /// Create a new incomplete subtask under a parent task
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        task_id: impl Into<String>,
    ) -> Self {
        Subtask {
            id: id.into(),
            title: title.into(),
            completed: false,
            task_id: task_id.into(),
        }
    }
}
