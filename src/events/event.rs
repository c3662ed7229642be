//! # Runtime events emitted by runs and worker slots.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Run events**: a run starts, aborts, or settles
//! - **Task events**: a slot claims a task and records (or discards) its outcome
//!
//! The [`Event`] struct carries metadata such as the run id, task index and slot number.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use taskclamp::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskClaimed)
//!     .with_run(7)
//!     .with_index(3)
//!     .with_slot(1);
//!
//! assert_eq!(ev.kind, EventKind::TaskClaimed);
//! assert_eq!(ev.index, Some(3));
//! assert_eq!(ev.slot, Some(1));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Run events ===
    /// A run admitted its batch and is about to start its slots.
    ///
    /// Sets:
    /// - `run`: run id
    /// - `tasks`: batch length
    /// - `concurrency`: effective concurrency (number of slots)
    /// - `reason`: completion policy label
    RunStarted,

    /// A fail-fast run went terminal on its first failure.
    ///
    /// Sets:
    /// - `run`: run id
    /// - `index`: input position of the failed task
    /// - `slot`: slot that observed the failure
    RunAborted,

    /// Every slot of the run drained without the run being aborted.
    ///
    /// Sets:
    /// - `run`: run id
    /// - `tasks`: number of recorded outcomes
    RunSettled,

    // === Task events ===
    /// A slot claimed the next task.
    ///
    /// Sets:
    /// - `run`, `index`, `slot`
    TaskClaimed,

    /// Task produced a value which was stored at its index.
    ///
    /// Sets:
    /// - `run`, `index`, `slot`
    TaskFulfilled,

    /// Task failed and the failure was recorded.
    ///
    /// Sets:
    /// - `run`, `index`, `slot`
    TaskRejected,

    /// Task outcome was ignored: the run was already terminal, or the index
    /// already had an outcome.
    ///
    /// Sets:
    /// - `run`, `index`, `slot`
    /// - `reason`: "fulfilled" / "rejected" (late), "duplicate" (refused write)
    OutcomeDiscarded,

    /// A slot found no more work (queue drained or run terminal) and exited.
    ///
    /// Sets:
    /// - `run`, `slot`
    SlotDrained,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Id of the run that emitted the event.
    pub run: Option<u64>,
    /// Input position of the task.
    pub index: Option<usize>,
    /// Worker slot number (`0..concurrency`).
    pub slot: Option<usize>,
    /// Batch length or recorded outcome count.
    pub tasks: Option<usize>,
    /// Effective concurrency of the run.
    pub concurrency: Option<usize>,
    /// Human-readable reason (policy label, outcome label).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            run: None,
            index: None,
            slot: None,
            tasks: None,
            concurrency: None,
            reason: None,
        }
    }

    /// Attaches a run id.
    #[inline]
    pub fn with_run(mut self, run: u64) -> Self {
        self.run = Some(run);
        self
    }

    /// Attaches a task index.
    #[inline]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Attaches a slot number.
    #[inline]
    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Attaches a task count.
    #[inline]
    pub fn with_tasks(mut self, tasks: usize) -> Self {
        self.tasks = Some(tasks);
        self
    }

    /// Attaches the effective concurrency.
    #[inline]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True for events that end a run (`RunAborted`, `RunSettled`).
    #[inline]
    pub fn is_run_terminal(&self) -> bool {
        matches!(self.kind, EventKind::RunAborted | EventKind::RunSettled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::TaskClaimed);
        let b = Event::new(EventKind::TaskClaimed);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_run_terminal_kinds() {
        assert!(Event::new(EventKind::RunAborted).is_run_terminal());
        assert!(Event::new(EventKind::RunSettled).is_run_terminal());
        assert!(!Event::new(EventKind::SlotDrained).is_run_terminal());
    }
}
