pub mod cascade;
pub mod optimistic;

pub use cascade::{CascadeEvent, recompute_project_completion, recompute_task_completion};
pub use optimistic::OptimisticUpdate;
