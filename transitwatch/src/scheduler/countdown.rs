//! Refresh countdown.
//!
//! One tick per second, driven by the controller's timer. The countdown
//! fires exactly once when it reaches zero, then pins there until a
//! successful fetch (or manual trigger) resets it. It never goes negative.

/// Default refresh interval in seconds.
pub const DEFAULT_INTERVAL_SECONDS: u32 = 60;

/// Tick-down refresh cycle.
#[derive(Debug, Clone)]
pub struct RefreshCycle {
    interval_seconds: u32,
    remaining_seconds: u32,
}

impl RefreshCycle {
    /// Create a cycle with the given interval, starting full.
    pub fn new(interval_seconds: u32) -> Self {
        Self {
            interval_seconds,
            remaining_seconds: interval_seconds,
        }
    }

    /// Advance one second. Returns `true` exactly on the tick that reaches
    /// zero; once pinned at zero, further ticks return `false`.
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        self.remaining_seconds == 0
    }

    /// Restart the countdown from the full interval.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.interval_seconds;
    }

    /// Seconds until the next countdown-driven refresh.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// The configured interval.
    pub fn interval_seconds(&self) -> u32 {
        self.interval_seconds
    }
}

impl Default for RefreshCycle {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_at_zero() {
        let mut cycle = RefreshCycle::new(3);
        assert!(!cycle.tick());
        assert!(!cycle.tick());
        assert!(cycle.tick());
        // Pinned: no repeat fire, never negative.
        assert!(!cycle.tick());
        assert!(!cycle.tick());
        assert_eq!(cycle.remaining_seconds(), 0);
    }

    #[test]
    fn test_reset_restores_full_interval() {
        let mut cycle = RefreshCycle::new(2);
        cycle.tick();
        cycle.tick();
        cycle.reset();
        assert_eq!(cycle.remaining_seconds(), 2);
        assert!(!cycle.tick());
        assert!(cycle.tick());
    }

    #[test]
    fn test_default_interval() {
        let cycle = RefreshCycle::default();
        assert_eq!(cycle.interval_seconds(), DEFAULT_INTERVAL_SECONDS);
        assert_eq!(cycle.remaining_seconds(), DEFAULT_INTERVAL_SECONDS);
    }
}
