//! # Result slots: index-addressed outcome buffer.
//!
//! Filled out of order by worker slots, read back in input order by the runner.
//! Every write and the final drain happen inside one critical section.

use std::sync::{Mutex, MutexGuard};

/// Fixed-size, write-once buffer of outcomes.
pub(crate) struct ResultSlots<R> {
    slots: Mutex<Vec<Option<R>>>,
}

impl<R> ResultSlots<R> {
    /// Creates `len` unset slots.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: Mutex::new(std::iter::repeat_with(|| None).take(len).collect()),
        }
    }

    /// Stores `value` at `index` unless that slot is already set.
    ///
    /// Returns `false` (and drops `value`) if the slot was set or out of range.
    pub(crate) fn set(&self, index: usize, value: R) -> bool {
        match self.lock().get_mut(index) {
            Some(slot @ None) => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Takes every outcome in index order.
    ///
    /// Fails with the first index that was never set.
    pub(crate) fn drain(&self) -> Result<Vec<R>, usize> {
        let slots = std::mem::take(&mut *self.lock());
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(index))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Option<R>>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_order_writes_read_back_in_order() {
        let slots = ResultSlots::new(3);
        assert!(slots.set(2, "two"));
        assert!(slots.set(0, "zero"));
        assert!(slots.set(1, "one"));
        assert_eq!(slots.drain(), Ok(vec!["zero", "one", "two"]));
    }

    #[test]
    fn test_never_overwritten() {
        let slots = ResultSlots::new(1);
        assert!(slots.set(0, 1));
        assert!(!slots.set(0, 2));
        assert_eq!(slots.drain(), Ok(vec![1]));
    }

    #[test]
    fn test_out_of_range_is_refused() {
        let slots = ResultSlots::new(1);
        assert!(!slots.set(5, 1));
    }

    #[test]
    fn test_drain_reports_first_gap() {
        let slots = ResultSlots::new(3);
        slots.set(0, 'a');
        assert_eq!(slots.drain(), Err(1));
    }
}
