//! # Run observers.
//!
//! Implement [`Subscribe`] to watch runs as they progress: claims, outcomes, aborts,
//! drained slots. Subscribers are attached with
//! [`RunnerBuilder::with_subscribers`](crate::RunnerBuilder::with_subscribers) and never
//! sit on the path of a worker slot: events reach them through their own queue and
//! worker task (see [`SubscriberSet`](crate::SubscriberSet)).
//!
//! ## Delivery
//! - In bus order, one event at a time, per subscriber.
//! - A full queue drops the event for that subscriber only (logged to stderr).
//! - A panic in `on_event` is logged and the worker moves on to the next event.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use async_trait::async_trait;
//! use taskclamp::{Event, EventKind, Subscribe};
//!
//! /// Counts tasks whose outcome arrived after their run was aborted.
//! #[derive(Default)]
//! struct Wasted(AtomicUsize);
//!
//! #[async_trait]
//! impl Subscribe for Wasted {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::OutcomeDiscarded {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "wasted"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Observer of run events.
///
/// Keep `on_event` short and non-blocking: while it runs, further events for this
/// subscriber wait in its queue.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event on the subscriber's worker task.
    async fn on_event(&self, event: &Event);

    /// Name printed in drop and panic diagnostics.
    ///
    /// Defaults to the type name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Queue length for this subscriber (at least 1). Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
