//! # Task abstraction.
//!
//! A [`Task`] is a zero-argument, one-shot deferred computation. The runner owns it from
//! the moment it is enqueued and consumes it with [`Task::spawn`], which produces the
//! future the worker slot awaits.
//!
//! Whether the computation is asynchronous or immediate is invisible to the runner:
//! both shapes are boxed into the same [`BoxTaskFuture`].

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`Task::spawn`].
pub type BoxTaskFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// Owned handle to a type-erased task.
///
/// This is the element type of every batch handed to the runner.
pub type TaskRef<T, E> = Box<dyn Task<Output = T, Error = E>>;

/// # Deferred, one-shot computation.
///
/// `spawn` takes the boxed task by value: a task is started at most once, so there is
/// no shared state to guard between attempts.
///
/// # Example
/// ```
/// use taskclamp::{BoxTaskFuture, Task, TaskError, TaskRef};
///
/// struct Answer;
///
/// impl Task for Answer {
///     type Output = u32;
///     type Error = TaskError;
///
///     fn spawn(self: Box<Self>) -> BoxTaskFuture<u32, TaskError> {
///         Box::pin(async { Ok(42) })
///     }
/// }
///
/// let task: TaskRef<u32, TaskError> = Box::new(Answer);
/// # let _ = task;
/// ```
pub trait Task: Send + 'static {
    /// Value produced on success.
    type Output: Send + 'static;
    /// Failure reason produced on error.
    type Error: Send + 'static;

    /// Starts the computation.
    ///
    /// Nothing observable should happen before the returned future is first polled;
    /// the runner calls this only after the task's index has been claimed.
    fn spawn(self: Box<Self>) -> BoxTaskFuture<Self::Output, Self::Error>;
}
