//! Error types used by the runner and by tasks.
//!
//! This module defines two enums:
//!
//! - [`RunError`]: why a fail-fast run did not produce its full value list.
//! - [`TaskError`]: a ready-made failure reason for tasks that have no error type of their own.
//!
//! Both provide `as_label` for logging; [`TaskError`] also has `as_message`.

use thiserror::Error;

/// # Errors produced by a fail-fast run.
///
/// The settle-all policy never produces this type: failures are recorded per index
/// as [`Settled::Rejected`](crate::Settled::Rejected) instead.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunError<E> {
    /// The first task to fail, in completion order.
    #[error("task #{index} failed")]
    Task {
        /// Input position of the failed task.
        index: usize,
        /// Failure reason returned by the task.
        reason: E,
    },

    /// A slot drained without recording an outcome for `index`.
    #[error("task #{index} finished without an outcome")]
    Unsettled {
        /// Input position left without an outcome.
        index: usize,
    },
}

impl<E> RunError<E> {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use taskclamp::RunError;
    ///
    /// let err: RunError<&str> = RunError::Task { index: 2, reason: "two" };
    /// assert_eq!(err.as_label(), "run_task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::Task { .. } => "run_task_failed",
            RunError::Unsettled { .. } => "run_unsettled",
        }
    }

    /// Input position the error refers to.
    pub fn index(&self) -> usize {
        match self {
            RunError::Task { index, .. } | RunError::Unsettled { index } => *index,
        }
    }

    /// Returns the task's failure reason, if the run failed because of one.
    pub fn into_reason(self) -> Option<E> {
        match self {
            RunError::Task { reason, .. } => Some(reason),
            RunError::Unsettled { .. } => None,
        }
    }
}

/// # Opaque task failure reason.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
        }
    }

    /// Returns the bare failure message.
    ///
    /// # Example
    /// ```
    /// use taskclamp::TaskError;
    ///
    /// assert_eq!(TaskError::fail("two").as_message(), "two");
    /// ```
    pub fn as_message(&self) -> &str {
        match self {
            TaskError::Fail { error } => error,
        }
    }
}
