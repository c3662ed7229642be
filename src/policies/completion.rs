//! # Completion policies.
//!
//! [`CompletionPolicy`] decides what a task failure does to the rest of the run.
//!
//! ```text
//! CompletionPolicy::FailFast   → first failure ends the run with that reason
//! CompletionPolicy::SettleAll  → failure recorded at its index, run continues
//! ```
//!
//! Both policies share the same admission: at most `min(clamp, len)` tasks in flight,
//! claimed strictly in input order.

/// Policy controlling how a task failure affects the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Abort on the first failure (in completion order).
    ///
    /// Unclaimed tasks are never started; tasks already in flight finish
    /// but their outcomes are discarded.
    #[default]
    FailFast,

    /// Never abort; every task gets a recorded outcome.
    SettleAll,
}

impl CompletionPolicy {
    /// Returns `true` if a failure should end the run.
    #[inline]
    pub fn aborts_on_failure(self) -> bool {
        matches!(self, CompletionPolicy::FailFast)
    }

    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(self) -> &'static str {
        match self {
            CompletionPolicy::FailFast => "fail_fast",
            CompletionPolicy::SettleAll => "settle_all",
        }
    }
}
