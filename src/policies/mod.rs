//! Completion policies.
//!
//! ## Contents
//! - [`CompletionPolicy`] what a task failure does to the rest of the run
//!
//! ## Quick wiring
//! ```text
//! Runner::run(tasks, policy)
//!      └─► core::state::RunState uses:
//!           - policy.aborts_on_failure() to cancel the run on the first failure
//!           - SettleAll to store every failure as Settled::Rejected
//! ```

mod completion;

pub use completion::CompletionPolicy;
