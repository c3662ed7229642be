//! # taskclamp
//!
//! **taskclamp** runs an ordered batch of deferred async computations with a fixed cap
//! on how many are in flight at once, and hands back one result per input in input
//! order, no matter which task finished first.
//!
//! Two completion policies share one admission algorithm:
//! - **fail-fast** ([`clamped_all`], [`Runner::all`]): the first failure (in completion
//!   order) ends the run;
//! - **settle-all** ([`clamped_all_settled`], [`Runner::all_settled`]): every task gets a
//!   [`Settled`] record, no failure aborts the run.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐
//!     │ TaskRef  │ │ TaskRef  │ │ TaskRef  │ │ TaskRef  │   ordered batch
//!     │   #0     │ │   #1     │ │   #2     │ │   #3     │
//!     └────┬─────┘ └────┬─────┘ └────┬─────┘ └────┬─────┘
//!          ▼            ▼            ▼            ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  RunState                                                     │
//! │  - ClaimQueue  (tasks + atomic claim cursor)                  │
//! │  - ResultSlots (write-once, index-addressed)                  │
//! │  - terminal token + first failure (fail-fast)                 │
//! └──────┬───────────────────────┬────────────────────────┬───────┘
//!        ▼                       ▼                        │
//!   ┌──────────┐            ┌──────────┐                  │
//!   │  slot 0  │    ...     │ slot W-1 │   W = min(clamp, len)
//!   │ (claim → │            │ (claim → │                  │
//!   │  await → │            │  await → │                  │
//!   │  record) │            │  record) │                  │
//!   └────┬─────┘            └────┬─────┘                  │
//!        │ TaskClaimed / TaskFulfilled / TaskRejected /   │
//!        │ OutcomeDiscarded / SlotDrained                 │ RunStarted / RunAborted / RunSettled
//!        ▼                       ▼                        ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     Bus (broadcast channel)                   │
//! └─────────────────────────────┬─────────────────────────────────┘
//!                               ▼
//!                   listener ──► SubscriberSet ──► LogWriter / custom
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                        |
//! |-------------------|-------------------------------------------------------------|-------------------------------------------|
//! | **Runs**          | Bounded-concurrency batch execution.                        | [`Runner`], [`clamped_all`], [`clamped_all_settled`] |
//! | **Policies**      | Fail-fast or settle-all completion.                         | [`CompletionPolicy`]                      |
//! | **Tasks**         | Deferred computations, async or immediate.                  | [`Task`], [`TaskFn`], [`SyncFn`], [`TaskRef`] |
//! | **Outcomes**      | Per-task tagged results.                                    | [`Settled`], [`RunOutcome`]               |
//! | **Errors**        | Typed errors for runs and tasks.                            | [`RunError`], [`TaskError`]               |
//! | **Subscriber API**| Observe run events (logging, metrics).                      | [`Subscribe`], [`Event`], [`EventKind`]   |
//! | **Configuration** | Concurrency cap and bus sizing.                             | [`Config`]                                |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use taskclamp::{Config, Runner, Settled, TaskError, TaskFn, TaskRef};
//!
//! fn delayed(value: &'static str, ms: u64, fail: bool) -> TaskRef<&'static str, TaskError> {
//!     TaskFn::boxed(move || async move {
//!         tokio::time::sleep(Duration::from_millis(ms)).await;
//!         if fail { Err(TaskError::fail(value)) } else { Ok(value) }
//!     })
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let runner = Runner::new(Config::with_clamp(2));
//!
//!     let values = runner
//!         .all(vec![delayed("zero", 20, false), delayed("one", 10, false)])
//!         .await
//!         .unwrap();
//!     assert_eq!(values, ["zero", "one"]);
//!
//!     let outcomes = runner
//!         .all_settled(vec![delayed("zero", 10, false), delayed("one", 5, true)])
//!         .await;
//!     assert_eq!(outcomes[0], Settled::Fulfilled("zero"));
//!     assert_eq!(outcomes[1], Settled::Rejected(TaskError::fail("one")));
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod outcome;
mod policies;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use config::Config;
pub use crate::core::{RunOutcome, Runner, RunnerBuilder, clamped_all, clamped_all_settled};
pub use error::{RunError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use outcome::Settled;
pub use policies::CompletionPolicy;
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{BoxTaskFuture, SyncFn, Task, TaskFn, TaskRef};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
