pub mod animation;
pub mod board;
pub mod project_detail;
pub mod task_detail;

pub use animation::CompletionAnimation;
pub use board::{DragState, GroupBy};
pub use project_detail::ProjectDetailView;
pub use task_detail::TaskDetailView;

use crate::api::ApiError;

/// Error type for detail-view interactions
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("task not found: {0}")]
    TaskNotFound(String),
    #[error("subtask not found: {0}")]
    SubtaskNotFound(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}
