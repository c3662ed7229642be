//! # Claim queue: ordered tasks plus an atomic claim cursor.
//!
//! ```text
//!  cursor ─┐
//!          ▼
//!   [ taken | taken | task 2 | task 3 | ... | task N-1 ]
//!      0       1       2        3              N-1
//! ```
//!
//! ## Rules
//! - The cursor only moves forward and never passes `len` (compare-and-swap loop).
//! - A successful advance hands out exactly one index; its task is taken in the same claim.
//! - Claims are handed out in strict index order, whichever slot asks.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ordered batch of tasks with a shared claim cursor.
pub(crate) struct ClaimQueue<T> {
    cursor: AtomicUsize,
    cells: Box<[Mutex<Option<T>>]>,
}

impl<T> ClaimQueue<T> {
    /// Builds a queue; index `i` holds the `i`-th item of `items`.
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            cursor: AtomicUsize::new(0),
            cells: items.into_iter().map(|t| Mutex::new(Some(t))).collect(),
        }
    }

    /// Claims the next unclaimed index and takes its task.
    ///
    /// Returns `None` once every index has been claimed.
    pub(crate) fn claim(&self) -> Option<(usize, T)> {
        let len = self.cells.len();
        let index = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| {
                (c < len).then_some(c + 1)
            })
            .ok()?;

        // Each index is handed out once, so this lock is never contended.
        let task = self.cells[index]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()?;
        Some((index, task))
    }

    /// Number of indices claimed so far.
    #[inline]
    pub(crate) fn claimed(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Total number of tasks.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }
}
