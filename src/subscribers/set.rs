//! # Subscriber fan-out.
//!
//! [`SubscriberSet`] hands every run event to each attached [`Subscribe`] through that
//! subscriber's own bounded queue and worker task. The runner's bus listener calls
//! [`SubscriberSet::emit`]; it never waits on a subscriber.
//!
//! ```text
//!   bus listener ─► emit(&Event) ─► Arc<Event>
//!                                     ├─► queue "log"     ─► worker ─► on_event
//!                                     └─► queue "metrics" ─► worker ─► on_event
//! ```
//!
//! ## Rules
//! - Per-subscriber order matches bus order; there is no order across subscribers.
//! - A full or closed queue loses the event for that subscriber only.
//! - A panicking `on_event` is reported on stderr; the worker keeps draining.
//! - [`SubscriberSet::shutdown`] closes the queues and waits for every worker.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::events::Event;

use super::Subscribe;

/// Sending half of one subscriber's queue.
struct Lane {
    name: &'static str,
    tx: mpsc::Sender<Arc<Event>>,
}

/// Set of subscribers, each behind a bounded queue and a worker task.
pub struct SubscriberSet {
    lanes: Vec<Lane>,
    workers: Vec<JoinHandle<()>>,
}

impl SubscriberSet {
    /// Spawns one worker per subscriber.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let (lanes, workers) = subs
            .into_iter()
            .map(|sub| {
                let (tx, rx) = mpsc::channel(sub.queue_capacity().max(1));
                let lane = Lane {
                    name: sub.name(),
                    tx,
                };
                (lane, spawn_worker(sub, rx))
            })
            .unzip();
        Self { lanes, workers }
    }

    /// Queues `event` for every subscriber without waiting.
    pub fn emit(&self, event: &Event) {
        let shared = Arc::new(event.clone());
        for lane in &self.lanes {
            let why = match lane.tx.try_send(Arc::clone(&shared)) {
                Ok(()) => continue,
                Err(TrySendError::Full(_)) => "queue full",
                Err(TrySendError::Closed(_)) => "worker closed",
            };
            eprintln!(
                "[taskclamp] subscriber '{}' dropped {:?} (seq={}): {why}",
                lane.name, event.kind, event.seq
            );
        }
    }

    /// Closes every queue and waits until the workers have drained them.
    pub async fn shutdown(self) {
        drop(self.lanes);
        for worker in self.workers {
            let _ = worker.await;
        }
    }

    /// `true` if no subscriber is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Number of attached subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }
}

fn spawn_worker(sub: Arc<dyn Subscribe>, mut rx: mpsc::Receiver<Arc<Event>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let handled = std::panic::AssertUnwindSafe(sub.on_event(&ev))
                .catch_unwind()
                .await;
            if let Err(payload) = handled {
                eprintln!(
                    "[taskclamp] subscriber '{}' panicked on {:?}: {}",
                    sub.name(),
                    ev.kind,
                    panic_message(payload.as_ref()),
                );
            }
        }
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::events::EventKind;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, ev: &Event) {
            if let Some(i) = ev.index {
                self.seen.lock().unwrap().push(i);
            }
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    struct Exploder;

    #[async_trait]
    impl Subscribe for Exploder {
        async fn on_event(&self, _ev: &Event) {
            panic!("boom");
        }
    }

    #[tokio::test]
    async fn test_emit_delivers_fifo_and_survives_panicking_sibling() {
        let rec = Arc::new(Recorder::default());
        let subs: Vec<Arc<dyn Subscribe>> = vec![rec.clone(), Arc::new(Exploder)];
        let set = SubscriberSet::new(subs);
        assert_eq!(set.len(), 2);

        for i in 0..3 {
            set.emit(&Event::new(EventKind::TaskClaimed).with_index(i));
        }
        set.shutdown().await;

        assert_eq!(*rec.seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_empty_set() {
        let set = SubscriberSet::new(Vec::new());
        assert!(set.is_empty());
        set.emit(&Event::new(EventKind::RunSettled));
        set.shutdown().await;
    }
}
