//! # Run event bus.
//!
//! [`Bus`] wraps a [`tokio::sync::broadcast`] sender. Every run of a [`Runner`](crate::Runner)
//! publishes through a clone of the runner's bus, so one receiver sees the events of
//! all runs interleaved; `Event::run` tells them apart.
//!
//! ```text
//!   run 7: slot 0 ─┐
//!   run 7: slot 1 ─┼──► Bus ──► listener ──► SubscriberSet
//!   run 8: slot 0 ─┘      └───► Runner::subscribe() receivers
//! ```
//!
//! Publishing never waits. The ring buffer holds `capacity` events; a receiver that
//! falls further behind gets `RecvError::Lagged(n)`. Events sent while nobody is
//! subscribed are gone.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for runtime events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Returns `true` if nobody would observe a published event.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.tx.receiver_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_reaches_receiver_in_order() {
        let bus = Bus::new(8);
        assert!(bus.is_idle());
        let mut rx = bus.subscribe();
        assert!(!bus.is_idle());

        bus.publish(Event::new(EventKind::TaskClaimed).with_index(0));
        bus.publish(Event::new(EventKind::TaskClaimed).with_index(1));

        assert_eq!(rx.recv().await.map(|e| e.index).ok(), Some(Some(0)));
        assert_eq!(rx.recv().await.map(|e| e.index).ok(), Some(Some(1)));
    }

    #[test]
    fn test_publish_without_receivers_is_noop() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::RunSettled));
    }
}
