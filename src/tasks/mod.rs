//! # Task abstractions.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for a deferred, one-shot computation
//! - [`TaskFn`] - closure-backed asynchronous task
//! - [`SyncFn`] - closure-backed immediate task
//! - [`TaskRef`] - owned, type-erased task (`Box<dyn Task>`)

mod task;
mod task_fn;

pub use task::{BoxTaskFuture, Task, TaskRef};
pub use task_fn::{SyncFn, TaskFn};
