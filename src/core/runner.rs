//! # Runner: admission, slot driving, and resolution.
//!
//! The [`Runner`] owns the configuration and the event bus. Each call to
//! [`Runner::run`] (or the [`Runner::all`] / [`Runner::all_settled`] shorthands)
//! executes one batch:
//!
//! ```text
//! run(tasks, policy)
//!   ├─► width = min(cfg.clamp, tasks.len())
//!   ├─► width == 0 ──► empty result, nothing executed, no events
//!   ├─► RunState::new(tasks) + publish RunStarted
//!   ├─► join_all(drive_slot(0) .. drive_slot(width-1))
//!   │       ├─ SettleAll: await every slot
//!   │       └─ FailFast:  await every slot OR the terminal token
//!   │                      └─ terminal first ──► detach remaining slots onto the
//!   │                                            current Tokio runtime, or drop them
//!   └─► RunState::finish() ──► first failure, or outcomes in input order
//! ```
//!
//! ## Rules
//! - Slots are joined on the caller's task; only a fail-fast abort moves the
//!   still-running slots onto the current Tokio runtime so in-flight tasks can finish.
//!   Outside Tokio they are dropped.
//! - Detached slots never claim again; their outcomes are discarded.
//! - Exactly one resolution per run.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::{
    config::Config,
    core::{slot::drive_slot, state::RunState},
    error::RunError,
    events::{Bus, Event, EventKind},
    outcome::Settled,
    policies::CompletionPolicy,
    subscribers::{Subscribe, SubscriberSet},
    tasks::TaskRef,
};

/// Result of one [`Runner::run`] call plus the run's counters at resolution time.
#[derive(Debug)]
pub struct RunOutcome<T, E> {
    /// Run id (matches `Event::run`); `0` for runs that short-circuited.
    pub run: u64,
    /// Tasks claimed when the run resolved.
    pub claimed: usize,
    /// Tasks that reached an outcome when the run resolved.
    pub completed: usize,
    /// First failure (fail-fast only) or one outcome per task in input order.
    pub result: Result<Vec<Settled<T, E>>, RunError<E>>,
}

impl<T, E> RunOutcome<T, E> {
    fn empty() -> Self {
        Self {
            run: 0,
            claimed: 0,
            completed: 0,
            result: Ok(Vec::new()),
        }
    }
}

/// Bounded-concurrency batch runner.
pub struct Runner {
    cfg: Config,
    bus: Bus,
    listener: Option<(JoinHandle<()>, Arc<SubscriberSet>)>,
}

impl Runner {
    /// Creates a runner without subscribers.
    pub fn new(cfg: Config) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg,
            bus,
            listener: None,
        }
    }

    /// Returns a builder for a runner with subscribers.
    pub fn builder(cfg: Config) -> RunnerBuilder {
        RunnerBuilder::new(cfg)
    }

    /// Runner configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Creates a receiver observing every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Executes `tasks` with at most `cfg.clamp` in flight under `policy`.
    ///
    /// Runs on any executor. When a [`CompletionPolicy::FailFast`] run aborts inside a
    /// Tokio runtime, the in-flight tasks are spawned onto it and finish in the
    /// background; elsewhere they are dropped unfinished.
    pub async fn run<T, E>(
        &self,
        tasks: impl IntoIterator<Item = TaskRef<T, E>>,
        policy: CompletionPolicy,
    ) -> RunOutcome<T, E>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let tasks: Vec<TaskRef<T, E>> = tasks.into_iter().collect();
        let width = self.cfg.effective_concurrency(tasks.len());
        if width == 0 {
            return RunOutcome::empty();
        }

        let run = Arc::new(RunState::new(tasks, policy, self.bus.clone()));
        run.publish(EventKind::RunStarted, |ev| {
            ev.with_tasks(run.len())
                .with_concurrency(width)
                .with_reason(policy.as_label())
        });

        let mut slots = Box::pin(join_all(
            (0..width).map(|slot| drive_slot(Arc::clone(&run), slot)),
        ));

        match policy {
            CompletionPolicy::SettleAll => {
                slots.await;
            }
            CompletionPolicy::FailFast => {
                let aborted = tokio::select! {
                    biased;
                    () = run.aborted() => true,
                    _ = &mut slots => false,
                };
                if aborted {
                    // Without a Tokio runtime the in-flight tasks are dropped instead.
                    if let Ok(handle) = tokio::runtime::Handle::try_current() {
                        handle.spawn(slots);
                    }
                }
            }
        }

        let result = run.finish();
        RunOutcome {
            run: run.id(),
            claimed: run.claimed(),
            completed: run.completed(),
            result,
        }
    }

    /// Fail-fast run: every value in input order, or the first failure.
    pub async fn all<T, E>(
        &self,
        tasks: impl IntoIterator<Item = TaskRef<T, E>>,
    ) -> Result<Vec<T>, RunError<E>>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let outcomes = self.run(tasks, CompletionPolicy::FailFast).await.result?;
        outcomes
            .into_iter()
            .enumerate()
            .map(|(index, outcome)| match outcome {
                Settled::Fulfilled(value) => Ok(value),
                Settled::Rejected(reason) => Err(RunError::Task { index, reason }),
            })
            .collect()
    }

    /// Settle-all run: one [`Settled`] per task in input order. Never fails.
    pub async fn all_settled<T, E>(
        &self,
        tasks: impl IntoIterator<Item = TaskRef<T, E>>,
    ) -> Vec<Settled<T, E>>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        match self.run(tasks, CompletionPolicy::SettleAll).await.result {
            Ok(outcomes) => outcomes,
            // Every slot records before it claims again, and all slots were joined.
            Err(err) => unreachable!("settle-all run resolved with {}", err.as_label()),
        }
    }

    /// Closes the bus and waits for subscribers to drain their queues.
    ///
    /// Slots detached by an aborted run keep the bus open until they finish.
    pub async fn shutdown(self) {
        let Self { bus, listener, .. } = self;
        drop(bus);
        if let Some((handle, set)) = listener {
            let _ = handle.await;
            if let Ok(set) = Arc::try_unwrap(set) {
                set.shutdown().await;
            }
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Builder for a [`Runner`] with event subscribers.
pub struct RunnerBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl RunnerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive run events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the runner.
    ///
    /// With subscribers this spawns the fan-out listener, so it must be called
    /// from within a Tokio runtime.
    pub fn build(self) -> Runner {
        let mut runner = Runner::new(self.cfg);
        if !self.subscribers.is_empty() {
            let set = Arc::new(SubscriberSet::new(self.subscribers));
            let handle = spawn_listener(&runner.bus, Arc::clone(&set));
            runner.listener = Some((handle, set));
        }
        runner
    }
}

/// Forwards bus events to the subscriber set until the bus closes.
fn spawn_listener(bus: &Bus, set: Arc<SubscriberSet>) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => set.emit(&ev),
                Err(RecvError::Lagged(skipped)) => {
                    eprintln!("[taskclamp] listener lagged; skipped {skipped} events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Runs `tasks` with at most `clamp` in flight; fails with the first task failure.
///
/// `clamp == 0` or an empty batch resolves to `Ok(vec![])` on the first poll without
/// running anything. Tasks still in flight when the run aborts finish on the current
/// Tokio runtime if there is one and are dropped otherwise.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskclamp::{TaskError, TaskFn, TaskRef, clamped_all};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tasks: Vec<TaskRef<&str, TaskError>> = vec![
///     TaskFn::boxed(|| async {
///         tokio::time::sleep(Duration::from_millis(20)).await;
///         Ok("zero")
///     }),
///     TaskFn::boxed(|| async { Ok("one") }),
/// ];
///
/// let values = clamped_all(tasks, 2).await.unwrap();
/// assert_eq!(values, ["zero", "one"]);
/// # }
/// ```
pub async fn clamped_all<T, E>(
    tasks: impl IntoIterator<Item = TaskRef<T, E>>,
    clamp: usize,
) -> Result<Vec<T>, RunError<E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    Runner::new(Config::with_clamp(clamp)).all(tasks).await
}

/// Runs `tasks` with at most `clamp` in flight; records every outcome.
///
/// `clamp == 0` or an empty batch resolves to an empty list on the first poll without
/// running anything.
///
/// # Example
/// ```
/// use taskclamp::{Settled, SyncFn, TaskError, TaskRef, clamped_all_settled};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tasks: Vec<TaskRef<u32, TaskError>> = vec![
///     SyncFn::boxed(|| Ok(1)),
///     SyncFn::boxed(|| Err(TaskError::fail("two"))),
/// ];
///
/// let outcomes = clamped_all_settled(tasks, 1).await;
/// assert_eq!(outcomes[0], Settled::Fulfilled(1));
/// assert!(outcomes[1].is_rejected());
/// # }
/// ```
pub async fn clamped_all_settled<T, E>(
    tasks: impl IntoIterator<Item = TaskRef<T, E>>,
    clamp: usize,
) -> Vec<Settled<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    Runner::new(Config::with_clamp(clamp))
        .all_settled(tasks)
        .await
}
