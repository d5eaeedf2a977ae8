//! Throttle for periodic LOD re-evaluation.

use std::time::Duration;

/// Fires at most once per interval of accumulated frame time.
#[derive(Clone, Debug)]
pub struct LodCheckTimer {
    interval: Duration,
    elapsed: Duration,
}

impl LodCheckTimer {
    /// Creates a timer that first fires once `interval` has elapsed.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Adds `delta` of frame time; returns `true` when a check is due.
    ///
    /// Firing resets the accumulator to zero, so a long frame never causes
    /// a burst of back-to-back checks.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Interval between checks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated towards the next check.
    pub fn pending(&self) -> Duration {
        self.elapsed
    }
}

impl Default for LodCheckTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
