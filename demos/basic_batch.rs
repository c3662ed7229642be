//! # Example: basic_batch
//!
//! Runs six delayed tasks two at a time, first with the fail-fast policy and then
//! with the settle-all policy.
//!
//! Demonstrates how to:
//! - Build tasks with [`TaskFn`].
//! - Call [`clamped_all`] and match on [`RunError`].
//! - Call [`clamped_all_settled`] and inspect each [`Settled`] record.
//!
//! ## Flow
//! ```text
//! tasks ──► clamped_all(tasks, 2)
//!     ├─► slot 0 / slot 1 claim #0, #1
//!     ├─► each slot claims the next index when its task finishes
//!     └─► first failure (#2) ──► Err(RunError::Task { index: 2, .. })
//!
//! tasks ──► clamped_all_settled(tasks, 2)
//!     └─► every task runs ──► [Fulfilled, Fulfilled, Rejected, ...]
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_batch
//! ```

use std::time::{Duration, Instant};

use taskclamp::{RunError, Settled, TaskError, TaskFn, TaskRef, clamped_all, clamped_all_settled};

fn delayed(name: &'static str, ms: u64, fails: bool) -> TaskRef<&'static str, TaskError> {
    TaskFn::boxed(move || async move {
        println!("[{name}] started");
        tokio::time::sleep(Duration::from_millis(ms)).await;
        if fails {
            println!("[{name}] failed");
            Err(TaskError::fail(name))
        } else {
            println!("[{name}] done");
            Ok(name)
        }
    })
}

fn batch() -> Vec<TaskRef<&'static str, TaskError>> {
    vec![
        delayed("zero", 200, false),
        delayed("one", 100, false),
        delayed("two", 300, true),
        delayed("three", 400, false),
        delayed("four", 200, false),
        delayed("five", 350, true),
    ]
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 1. Fail-fast: resolves as soon as "two" fails
    let started = Instant::now();
    match clamped_all(batch(), 2).await {
        Ok(values) => println!("all fulfilled: {values:?}"),
        Err(RunError::Task { index, reason }) => {
            println!("task #{index} failed: {}", reason.as_message());
        }
        Err(err) => println!("run failed: {err}"),
    }
    println!("fail-fast resolved after {:?}\n", started.elapsed());

    // 2. Settle-all: every task gets an outcome
    let started = Instant::now();
    for (index, outcome) in clamped_all_settled(batch(), 2).await.iter().enumerate() {
        match outcome {
            Settled::Fulfilled(value) => println!("#{index} fulfilled: {value}"),
            Settled::Rejected(reason) => println!("#{index} rejected: {reason}"),
        }
    }
    println!("settle-all resolved after {:?}", started.elapsed());
}
