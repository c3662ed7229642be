//! # Shared state of one run.
//!
//! [`RunState`] is the only thing worker slots share. It owns the claim queue, the
//! result slots, the counters, the terminal token and the first failure, and it
//! publishes one event per state change.
//!
//! ## Outcome handling
//! ```text
//! record(index, Ok(v))   ─► terminal? ─yes─► OutcomeDiscarded
//!                                     └no──► results[index] = Fulfilled(v), TaskFulfilled
//!
//! record(index, Err(e))  ─► SettleAll ─────► results[index] = Rejected(e), TaskRejected
//!
//! results[index] already set ─► refused: OutcomeDiscarded (reason "duplicate")
//!                        └► FailFast  ─► first failure? ─yes─► failure = (index, e),
//!                                                              cancel terminal token,
//!                                                              TaskRejected + RunAborted
//!                                                       └no──► OutcomeDiscarded
//! ```
//!
//! ## Rules
//! - Exactly one failure wins the race to make a fail-fast run terminal.
//! - Once terminal, no outcome is written and no index is claimed.
//! - The settle-all policy never goes terminal.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

use crate::{
    core::{queue::ClaimQueue, results::ResultSlots},
    error::RunError,
    events::{Bus, Event, EventKind},
    outcome::Settled,
    policies::CompletionPolicy,
    tasks::TaskRef,
};

/// Global counter for run ids.
static RUN_SEQ: AtomicU64 = AtomicU64::new(1);

/// Shared state of a single run.
pub(crate) struct RunState<T, E> {
    id: u64,
    policy: CompletionPolicy,
    queue: ClaimQueue<TaskRef<T, E>>,
    results: ResultSlots<Settled<T, E>>,
    completed: AtomicUsize,
    terminal: CancellationToken,
    failure: Mutex<Option<(usize, E)>>,
    bus: Bus,
}

impl<T, E> RunState<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates the state for a batch and allocates a fresh run id.
    pub(crate) fn new(tasks: Vec<TaskRef<T, E>>, policy: CompletionPolicy, bus: Bus) -> Self {
        let len = tasks.len();
        Self {
            id: RUN_SEQ.fetch_add(1, Ordering::Relaxed),
            policy,
            queue: ClaimQueue::new(tasks),
            results: ResultSlots::new(len),
            completed: AtomicUsize::new(0),
            terminal: CancellationToken::new(),
            failure: Mutex::new(None),
            bus,
        }
    }

    /// Run id attached to every event of this run.
    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Batch length.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    /// Claims the next task for `slot`, unless the run is terminal or drained.
    pub(crate) fn claim(&self, slot: usize) -> Option<(usize, TaskRef<T, E>)> {
        if self.is_terminal() {
            return None;
        }
        let (index, task) = self.queue.claim()?;
        self.publish(EventKind::TaskClaimed, |ev| ev.with_index(index).with_slot(slot));
        Some((index, task))
    }

    /// Records the outcome of the task at `index`, observed by `slot`.
    pub(crate) fn record(&self, slot: usize, index: usize, res: Result<T, E>) {
        self.completed.fetch_add(1, Ordering::AcqRel);
        match res {
            Ok(value) => self.fulfil(slot, index, value),
            Err(reason) if self.policy.aborts_on_failure() => self.abort(slot, index, reason),
            Err(reason) => self.store(slot, index, Settled::Rejected(reason)),
        }
    }

    fn fulfil(&self, slot: usize, index: usize, value: T) {
        if self.is_terminal() {
            self.discard(slot, index, "fulfilled");
            return;
        }
        self.store(slot, index, Settled::Fulfilled(value));
    }

    /// Writes the outcome once; a second write for the same index is refused.
    fn store(&self, slot: usize, index: usize, outcome: Settled<T, E>) {
        let kind = match outcome {
            Settled::Fulfilled(_) => EventKind::TaskFulfilled,
            Settled::Rejected(_) => EventKind::TaskRejected,
        };
        if self.results.set(index, outcome) {
            self.publish(kind, |ev| ev.with_index(index).with_slot(slot));
        } else {
            eprintln!("[taskclamp] run {}: task #{index} already has an outcome", self.id);
            self.discard(slot, index, "duplicate");
        }
    }

    fn abort(&self, slot: usize, index: usize, reason: E) {
        {
            let mut failure = self.lock_failure();
            if failure.is_some() {
                drop(failure);
                self.discard(slot, index, "rejected");
                return;
            }
            *failure = Some((index, reason));
        }
        self.terminal.cancel();
        self.publish(EventKind::TaskRejected, |ev| ev.with_index(index).with_slot(slot));
        self.publish(EventKind::RunAborted, |ev| ev.with_index(index).with_slot(slot));
    }

    fn discard(&self, slot: usize, index: usize, outcome: &'static str) {
        self.publish(EventKind::OutcomeDiscarded, |ev| {
            ev.with_index(index).with_slot(slot).with_reason(outcome)
        });
    }

    /// Reports that `slot` found no more work.
    pub(crate) fn slot_drained(&self, slot: usize) {
        self.publish(EventKind::SlotDrained, |ev| ev.with_slot(slot));
    }

    /// `true` once a fail-fast run has recorded its failure.
    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.terminal.is_cancelled()
    }

    /// Completes when the run goes terminal.
    pub(crate) async fn aborted(&self) {
        self.terminal.cancelled().await;
    }

    /// Number of tasks that reached an outcome (recorded or discarded).
    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// Number of tasks claimed so far.
    pub(crate) fn claimed(&self) -> usize {
        self.queue.claimed()
    }

    /// Resolves the run: the first failure if there was one, otherwise every outcome in order.
    ///
    /// Called once, by the runner, after the slots drained or the run went terminal.
    pub(crate) fn finish(&self) -> Result<Vec<Settled<T, E>>, RunError<E>> {
        if let Some((index, reason)) = self.lock_failure().take() {
            return Err(RunError::Task { index, reason });
        }
        let outcomes = self
            .results
            .drain()
            .map_err(|index| RunError::Unsettled { index })?;
        self.publish(EventKind::RunSettled, |ev| ev.with_tasks(outcomes.len()));
        Ok(outcomes)
    }

    pub(crate) fn publish(&self, kind: EventKind, build: impl FnOnce(Event) -> Event) {
        if self.bus.is_idle() {
            return;
        }
        self.bus.publish(build(Event::new(kind).with_run(self.id)));
    }

    fn lock_failure(&self) -> MutexGuard<'_, Option<(usize, E)>> {
        self.failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::SyncFn;

    fn batch(n: usize) -> Vec<TaskRef<usize, &'static str>> {
        (0..n).map(|i| SyncFn::boxed(move || Ok(i))).collect()
    }

    #[test]
    fn test_fail_fast_first_failure_wins() {
        let run = RunState::new(batch(3), CompletionPolicy::FailFast, Bus::new(8));
        run.record(0, 1, Err("first"));
        run.record(1, 0, Err("second"));
        assert!(run.is_terminal());
        assert_eq!(run.completed(), 2);

        match run.finish() {
            Err(RunError::Task { index, reason }) => {
                assert_eq!(index, 1);
                assert_eq!(reason, "first");
            }
            other => panic!("unexpected: {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_no_claims_after_terminal() {
        let run = RunState::new(batch(3), CompletionPolicy::FailFast, Bus::new(8));
        assert!(run.claim(0).is_some());
        run.record(0, 0, Err("boom"));
        assert!(run.claim(0).is_none());
        assert_eq!(run.claimed(), 1);
    }

    #[test]
    fn test_late_success_is_discarded() {
        let run = RunState::new(batch(2), CompletionPolicy::FailFast, Bus::new(8));
        run.record(0, 0, Err("boom"));
        run.record(1, 1, Ok(1));
        assert!(run.finish().is_err());
    }

    #[test]
    fn test_settle_all_never_goes_terminal() {
        let run = RunState::new(batch(2), CompletionPolicy::SettleAll, Bus::new(8));
        run.record(0, 1, Err("one"));
        run.record(1, 0, Ok(0));
        assert!(!run.is_terminal());
        assert_eq!(
            run.finish().ok(),
            Some(vec![Settled::Fulfilled(0), Settled::Rejected("one")])
        );
    }

    #[test]
    fn test_second_outcome_for_index_is_refused() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let run = RunState::new(batch(1), CompletionPolicy::SettleAll, bus);
        run.record(0, 0, Ok(10));
        run.record(1, 0, Err("late"));

        let first = rx.try_recv().unwrap();
        assert_eq!(first.kind, EventKind::TaskFulfilled);
        let refused = rx.try_recv().unwrap();
        assert_eq!(refused.kind, EventKind::OutcomeDiscarded);
        assert_eq!(refused.index, Some(0));
        assert_eq!(refused.reason.as_deref(), Some("duplicate"));

        assert_eq!(run.finish().ok(), Some(vec![Settled::Fulfilled(10)]));
    }

    #[test]
    fn test_missing_outcome_is_reported() {
        let run = RunState::new(batch(2), CompletionPolicy::SettleAll, Bus::new(8));
        run.record(0, 0, Ok(0));
        assert!(matches!(run.finish(), Err(RunError::Unsettled { index: 1 })));
    }

    #[test]
    fn test_run_ids_are_unique() {
        let a = RunState::new(batch(0), CompletionPolicy::SettleAll, Bus::new(1));
        let b = RunState::new(batch(0), CompletionPolicy::SettleAll, Bus::new(1));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.len(), 0);
    }
}
