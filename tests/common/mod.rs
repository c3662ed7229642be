#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use taskclamp::{TaskError, TaskFn, TaskRef};

/// Counts how many of its tasks are in flight and remembers the peak.
#[derive(Clone, Default)]
pub struct Gauge {
    inner: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl Gauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Task that resolves to `value` after `ms` milliseconds.
    pub fn fulfilled<T: Send + 'static>(&self, value: T, ms: u64) -> TaskRef<T, TaskError> {
        let gauge = self.clone();
        TaskFn::boxed(move || async move {
            gauge.enter();
            tokio::time::sleep(Duration::from_millis(ms)).await;
            gauge.leave();
            Ok(value)
        })
    }

    /// Task that fails with `message` after `ms` milliseconds.
    pub fn rejected<T: Send + 'static>(&self, message: &str, ms: u64) -> TaskRef<T, TaskError> {
        let gauge = self.clone();
        let err = TaskError::fail(message);
        TaskFn::boxed(move || async move {
            gauge.enter();
            tokio::time::sleep(Duration::from_millis(ms)).await;
            gauge.leave();
            Err(err)
        })
    }

    pub fn peak(&self) -> usize {
        self.inner.peak.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> usize {
        self.inner.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.inner.finished.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        self.inner.started.fetch_add(1, Ordering::SeqCst);
        let now = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner.finished.fetch_add(1, Ordering::SeqCst);
    }
}

/// `zero`(200ms) `one`(100ms) `two`(400ms) `three`(200ms).
pub fn all_fulfilled(gauge: &Gauge) -> Vec<TaskRef<&'static str, TaskError>> {
    vec![
        gauge.fulfilled("zero", 200),
        gauge.fulfilled("one", 100),
        gauge.fulfilled("two", 400),
        gauge.fulfilled("three", 200),
    ]
}

/// `zero`(200ms) `one`(100ms) fail `two`(300ms) `three`(400ms) `four`(200ms) fail `five`(350ms).
pub fn some_rejected(gauge: &Gauge) -> Vec<TaskRef<&'static str, TaskError>> {
    vec![
        gauge.fulfilled("zero", 200),
        gauge.fulfilled("one", 100),
        gauge.rejected("two", 300),
        gauge.fulfilled("three", 400),
        gauge.fulfilled("four", 200),
        gauge.rejected("five", 350),
    ]
}
