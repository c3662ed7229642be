//! Run events and the bus that carries them.
//!
//! - [`EventKind`] / [`Event`]: what happened, to which run, task index and slot;
//! - [`Bus`]: broadcast channel shared by a runner and all of its runs.
//!
//! `core::state::RunState` publishes on behalf of the worker slots; the runner's
//! listener forwards to the `SubscriberSet`, and [`Runner::subscribe`](crate::Runner::subscribe)
//! hands out raw receivers.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
