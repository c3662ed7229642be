//! # Worker slot loop.
//!
//! A slot claims the next unclaimed index, awaits that task, records its outcome and
//! immediately claims again. It never waits for sibling slots, so a slot that finishes
//! early picks up the next index while slower siblings are still busy.
//!
//! ```text
//! loop {
//!   ├─► claim() ── None (drained or terminal) ──► SlotDrained, exit
//!   ├─► task.spawn().await
//!   └─► record(index, outcome)
//! }
//! ```

use std::sync::Arc;

use crate::core::state::RunState;

/// Drives slot number `slot` until there is nothing left to claim.
pub(crate) async fn drive_slot<T, E>(run: Arc<RunState<T, E>>, slot: usize)
where
    T: Send + 'static,
    E: Send + 'static,
{
    while let Some((index, task)) = run.claim(slot) {
        let res = task.spawn().await;
        run.record(slot, index, res);
    }
    run.slot_drained(slot);
}
