//! Refresh scheduling: when to fetch, and how not to fetch twice.
//!
//! The scheduler combines the one-per-second countdown with a per-kind
//! in-flight gate and the stop-layer zoom gate. It decides *whether* a fetch
//! may start; the controller decides *what* to fetch and applies the
//! results.
//!
//! Failure policy: a failed fetch does not reset the countdown, so the next
//! countdown- or viewport-driven trigger retries naturally. There is no
//! dedicated retry or backoff beyond the fixed interval.

mod countdown;
mod gate;

pub use countdown::{RefreshCycle, DEFAULT_INTERVAL_SECONDS};
pub use gate::{FetchGate, FetchKind};

/// Zoom level at or above which the stop layer is fetched and shown.
/// Crossing below it removes all rendered stops immediately.
pub const STOP_ZOOM_THRESHOLD: u8 = 14;

/// Why a refresh was triggered. Logging/diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The countdown reached zero.
    Countdown,
    /// The viewport settled after a pan or zoom.
    ViewportSettled,
    /// The selection changed.
    SelectionChanged,
    /// Explicit user action.
    Manual,
}

/// Whether the stop layer is active at the given zoom.
pub fn stops_allowed(zoom: u8) -> bool {
    zoom >= STOP_ZOOM_THRESHOLD
}

/// Countdown plus per-kind gates.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    cycle: RefreshCycle,
    vehicles: FetchGate,
    stops: FetchGate,
}

impl RefreshScheduler {
    /// Create a scheduler with the given countdown interval.
    pub fn new(interval_seconds: u32) -> Self {
        Self {
            cycle: RefreshCycle::new(interval_seconds),
            vehicles: FetchGate::default(),
            stops: FetchGate::default(),
        }
    }

    /// Advance the countdown one second; `true` means a refresh is due.
    pub fn tick(&mut self) -> bool {
        self.cycle.tick()
    }

    /// Restart the countdown (successful fetch or manual trigger).
    pub fn reset_countdown(&mut self) {
        self.cycle.reset();
    }

    /// Seconds until the next countdown-driven refresh.
    pub fn remaining_seconds(&self) -> u32 {
        self.cycle.remaining_seconds()
    }

    /// The configured interval.
    pub fn interval_seconds(&self) -> u32 {
        self.cycle.interval_seconds()
    }

    /// Try to start a fetch of the given kind (see [`FetchGate::try_begin`]).
    pub fn try_begin(&mut self, kind: FetchKind) -> bool {
        self.gate_mut(kind).try_begin()
    }

    /// Finish a fetch of the given kind; `true` means a coalesced follow-up
    /// is owed.
    pub fn finish(&mut self, kind: FetchKind) -> bool {
        self.gate_mut(kind).finish()
    }

    /// Whether a fetch of the given kind is outstanding.
    pub fn is_in_flight(&self, kind: FetchKind) -> bool {
        self.gate(kind).is_in_flight()
    }

    fn gate(&self, kind: FetchKind) -> &FetchGate {
        match kind {
            FetchKind::Vehicles => &self.vehicles,
            FetchKind::Stops => &self.stops,
        }
    }

    fn gate_mut(&mut self, kind: FetchKind) -> &mut FetchGate {
        match kind {
            FetchKind::Vehicles => &mut self.vehicles,
            FetchKind::Stops => &mut self.stops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_gate_threshold() {
        assert!(!stops_allowed(13));
        assert!(stops_allowed(14));
        assert!(stops_allowed(18));
    }

    #[test]
    fn test_gates_are_independent_per_kind() {
        let mut scheduler = RefreshScheduler::new(60);
        assert!(scheduler.try_begin(FetchKind::Vehicles));
        // A vehicle fetch in flight must not block stops.
        assert!(scheduler.try_begin(FetchKind::Stops));
        assert!(!scheduler.try_begin(FetchKind::Vehicles));

        assert!(scheduler.finish(FetchKind::Vehicles));
        assert!(!scheduler.finish(FetchKind::Stops));
    }

    #[test]
    fn test_countdown_resets_to_interval() {
        let mut scheduler = RefreshScheduler::new(5);
        for _ in 0..5 {
            scheduler.tick();
        }
        assert_eq!(scheduler.remaining_seconds(), 0);
        scheduler.reset_countdown();
        assert_eq!(scheduler.remaining_seconds(), scheduler.interval_seconds());
    }
}
