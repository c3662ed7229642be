//! # Example: settle_report
//!
//! Attaches the built-in [`LogWriter`] and a small counting subscriber to a
//! [`Runner`], then settles a batch of mixed immediate and async tasks.
//!
//! Demonstrates how to:
//! - Implement the [`Subscribe`] trait.
//! - Wire subscribers through [`Runner::builder`].
//! - Mix [`SyncFn`] and [`TaskFn`] in one batch.
//! - Flush subscribers with [`Runner::shutdown`].
//!
//! ## Run
//! Requires the `logging` feature to export [`LogWriter`].
//! ```bash
//! cargo run --example settle_report --features logging
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use taskclamp::{
    Config, Event, EventKind, LogWriter, Runner, Subscribe, SyncFn, TaskError, TaskFn, TaskRef,
};

/// Counts recorded outcomes per kind.
#[derive(Default)]
struct Tally {
    fulfilled: AtomicUsize,
    rejected: AtomicUsize,
}

#[async_trait::async_trait]
impl Subscribe for Tally {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::TaskFulfilled => {
                self.fulfilled.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::TaskRejected => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "tally"
    }
}

fn fetch(id: u32, ms: u64) -> TaskRef<u32, TaskError> {
    TaskFn::boxed(move || async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        if id % 3 == 0 {
            return Err(TaskError::fail(format!("id {id} unavailable")));
        }
        Ok(id * 10)
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let tally = Arc::new(Tally::default());
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new()), tally.clone()];

    let runner = Runner::builder(Config::with_clamp(3))
        .with_subscribers(subs)
        .build();

    let mut tasks: Vec<TaskRef<u32, TaskError>> = (1..=7)
        .map(|id| fetch(id, 50 * u64::from(id % 4)))
        .collect();
    tasks.push(SyncFn::boxed(|| Ok(0)));
    tasks.push(SyncFn::boxed(|| Err(TaskError::fail("parse error"))));

    let outcomes = runner.all_settled(tasks).await;
    runner.shutdown().await;

    println!();
    for (index, outcome) in outcomes.iter().enumerate() {
        println!("#{index}: {}", outcome.as_label());
    }
    println!(
        "fulfilled={} rejected={}",
        tally.fulfilled.load(Ordering::Relaxed),
        tally.rejected.load(Ordering::Relaxed)
    );
}
