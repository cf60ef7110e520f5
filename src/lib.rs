//! taskdeck — state engine for a client/project/task dashboard.
//!
//! The crate owns the in-memory collections behind the dashboard's detail
//! surfaces and the rules that keep them honest:
//!
//! - completion cascades: all subtasks done completes the task, all tasks
//!   done completes the project, fire-forward only ([`ops::cascade`]);
//! - optimistic sync: the kanban drop mutates locally first and rolls the
//!   whole collection back on server rejection ([`ops::optimistic`]);
//! - the two view surfaces that wire those rules to a backend
//!   ([`view::TaskDetailView`], [`view::ProjectDetailView`]).
//!
//! The backend itself is a collaborator behind the [`api::Api`] trait,
//! with a reqwest implementation for the REST service and an in-memory
//! one for tests and embedding.

pub mod api;
pub mod model;
pub mod ops;
pub mod view;
