//! Core types for the todo web app.
//!
//! This crate provides the shared task model used by every other crate in
//! the workspace:
//!
//! - [`Task`] / [`TaskCreate`] / [`TaskUpdate`] - the task record and its
//!   request payloads, serialized the way the REST backend expects them
//! - [`validation`] - client-side form validation (the only invariant
//!   enforcement; the backend is the source of truth)
//! - [`TaskListState`] / [`RowState`] - the optimistic list and row state
//!   machines, kept framework-free so they are directly unit-testable
//!
//! # Example
//!
//! ```rust
//! use task_core::{TaskCreate, validation};
//!
//! let input = TaskCreate::new("Buy milk");
//! assert!(validation::validate_create(&input, chrono::Utc::now()).is_ok());
//! ```

mod list;
mod task;
pub mod validation;

pub use list::{RowMode, RowState, TaskListState};
pub use task::{CompletionStatus, Task, TaskCreate, TaskPriority, TaskUpdate};
pub use validation::FieldError;
