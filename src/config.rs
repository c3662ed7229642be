//! # Runner configuration.
//!
//! Provides [`Config`] centralized settings for a [`Runner`](crate::Runner).
//!
//! ## Sentinel values
//! - `clamp = 0` → every run returns an empty result without executing anything
//! - `bus_capacity = 0` → treated as 1 by the bus

use std::num::NonZero;

/// Configuration for a [`Runner`](crate::Runner).
///
/// ## Field semantics
/// - `clamp`: Maximum number of tasks in flight at once (`0` = run nothing)
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug)]
pub struct Config {
    /// Concurrency cap.
    ///
    /// The effective concurrency of a run is `min(clamp, task_count)`.
    pub clamp: usize,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events
    /// skip the older ones.
    pub bus_capacity: usize,
}

impl Config {
    /// Default configuration with an explicit concurrency cap.
    pub fn with_clamp(clamp: usize) -> Self {
        Self {
            clamp,
            ..Self::default()
        }
    }

    /// Number of worker slots a run over `task_count` tasks gets.
    ///
    /// # Example
    /// ```
    /// use taskclamp::Config;
    ///
    /// let cfg = Config::with_clamp(2);
    /// assert_eq!(cfg.effective_concurrency(4), 2);
    /// assert_eq!(cfg.effective_concurrency(1), 1);
    /// assert_eq!(Config::with_clamp(0).effective_concurrency(4), 0);
    /// ```
    #[inline]
    pub fn effective_concurrency(&self, task_count: usize) -> usize {
        self.clamp.min(task_count)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `clamp` = available parallelism of the machine (1 if unknown)
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            clamp: std::thread::available_parallelism()
                .map(NonZero::get)
                .unwrap_or(1),
            bus_capacity: 1024,
        }
    }
}
