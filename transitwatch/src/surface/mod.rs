//! Abstract map surface.
//!
//! The rendering library (tiles, markers, gestures) lives outside this
//! crate. The controller and reconciler talk to it through [`MapSurface`]:
//! a capability to move the view, read the current bounds and zoom, and add
//! or remove visuals by handle. Pan/zoom-end notification travels the other
//! way, as a [`crate::controller::ControllerEvent::ViewportSettled`] on the
//! controller's event channel.

mod recording;

pub use recording::{RecordingSurface, SurfaceOp};

use crate::geo::{LatLon, Viewport};

/// Opaque handle to one visual added to the surface.
///
/// Handles are minted by the surface and are only meaningful to it. The
/// reconciler tracks them per entity and is the only component that removes
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u64);

/// How a marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerStyle {
    /// Arrow rotated to the given whole-degree bearing.
    Directional {
        /// Rotation in degrees, rounded from the reported bearing.
        bearing_deg: i32,
    },
    /// Non-directional dot, for vehicles with unknown heading.
    Dot,
    /// Stop pin.
    Stop,
}

/// A visual the reconciler asks the surface to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Positional marker.
    Marker {
        /// Anchor position.
        position: LatLon,
        /// Drawing style.
        style: MarkerStyle,
    },
    /// Text annotation anchored next to a marker.
    Label {
        /// Anchor position.
        position: LatLon,
        /// Label text.
        text: String,
        /// Optional hover tooltip.
        tooltip: Option<String>,
    },
}

/// Capability contract for the external rendering/mapping library.
pub trait MapSurface {
    /// Move the view to a center and zoom level.
    fn set_view(&mut self, center: LatLon, zoom: u8);

    /// Current visible bounds.
    fn viewport(&self) -> Viewport;

    /// Current zoom level.
    fn zoom(&self) -> u8;

    /// Add a visual; the returned handle identifies it for removal.
    fn add_visual(&mut self, visual: Visual) -> VisualHandle;

    /// Remove a previously added visual. Unknown handles are ignored.
    fn remove_visual(&mut self, handle: VisualHandle);

    /// Enable or disable user map gestures (suppressed while a selector
    /// overlay is open).
    fn set_interactive(&mut self, interactive: bool);
}
