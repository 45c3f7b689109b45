//! Per-kind in-flight gate with trailing-edge coalescing.
//!
//! At most one fetch per data kind may be outstanding. A trigger arriving
//! mid-flight does not spawn a second request; it marks one follow-up fetch
//! as owed, collapsing any number of triggers into a single trailing fetch.

/// One data kind the scheduler fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Vehicle positions.
    Vehicles,
    /// Stop info (zoom-gated secondary layer).
    Stops,
}

impl FetchKind {
    /// Short name for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchKind::Vehicles => "vehicles",
            FetchKind::Stops => "stops",
        }
    }
}

/// In-flight/owed state for one fetch kind.
#[derive(Debug, Default, Clone)]
pub struct FetchGate {
    in_flight: bool,
    owed: bool,
}

impl FetchGate {
    /// Try to start a fetch. Returns `true` when the caller may issue the
    /// request; `false` when one is already in flight — the trigger is then
    /// coalesced into a single owed follow-up.
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            self.owed = true;
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Mark the in-flight fetch as finished. Returns `true` when a
    /// coalesced trigger is owed a follow-up fetch.
    pub fn finish(&mut self) -> bool {
        self.in_flight = false;
        std::mem::take(&mut self.owed)
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
