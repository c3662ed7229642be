//! # LogWriter: prints one line per run event
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [run-started] run=3 tasks=6 concurrency=2 policy=fail_fast
//! [claimed] run=3 task=#0 slot=0
//! [fulfilled] run=3 task=#1 slot=1
//! [rejected] run=3 task=#2 slot=1
//! [aborted] run=3 task=#2 slot=1
//! [discarded] run=3 task=#3 slot=0 outcome=fulfilled
//! [slot-drained] run=3 slot=0
//! [settled] run=3 outcomes=6
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let run = e.run.unwrap_or_default();
        let index = e.index.unwrap_or_default();
        let slot = e.slot.unwrap_or_default();
        match e.kind {
            EventKind::RunStarted => {
                println!(
                    "[run-started] run={run} tasks={} concurrency={} policy={}",
                    e.tasks.unwrap_or_default(),
                    e.concurrency.unwrap_or_default(),
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
            EventKind::TaskClaimed => {
                println!("[claimed] run={run} task=#{index} slot={slot}");
            }
            EventKind::TaskFulfilled => {
                println!("[fulfilled] run={run} task=#{index} slot={slot}");
            }
            EventKind::TaskRejected => {
                println!("[rejected] run={run} task=#{index} slot={slot}");
            }
            EventKind::OutcomeDiscarded => {
                println!(
                    "[discarded] run={run} task=#{index} slot={slot} outcome={}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
            EventKind::RunAborted => {
                println!("[aborted] run={run} task=#{index} slot={slot}");
            }
            EventKind::SlotDrained => {
                println!("[slot-drained] run={run} slot={slot}");
            }
            EventKind::RunSettled => {
                println!("[settled] run={run} outcomes={}", e.tasks.unwrap_or_default());
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
