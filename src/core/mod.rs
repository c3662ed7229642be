//! Runtime core: admission, worker slots, and resolution.
//!
//! The public API from this module is [`Runner`] and the two free functions
//! [`clamped_all`] / [`clamped_all_settled`].
//!
//! Internal modules:
//! - [`queue`]: ordered tasks and the atomic claim cursor;
//! - [`results`]: index-addressed, write-once outcome buffer;
//! - [`state`]: shared per-run state, completion policy, event publishing;
//! - [`slot`]: the worker slot loop;
//! - [`runner`]: admission, slot driving, resolution, subscribers wiring.

mod queue;
mod results;
mod runner;
mod slot;
mod state;

pub use runner::{RunOutcome, Runner, RunnerBuilder, clamped_all, clamped_all_settled};
