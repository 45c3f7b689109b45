//! Headless map surface that records every operation.
//!
//! Stands in for a real rendering library in tests and headless runs: it
//! keeps the set of live visuals, an append-only operation log, and a
//! scriptable viewport/zoom.

use std::collections::BTreeMap;

use crate::geo::{LatLon, Viewport};

use super::{MapSurface, Visual, VisualHandle};

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    /// A visual was added.
    Added(VisualHandle),
    /// A visual was removed.
    Removed(VisualHandle),
    /// The view was recentered.
    ViewSet {
        /// New center.
        center: LatLon,
        /// New zoom level.
        zoom: u8,
    },
    /// User gestures were toggled.
    InteractiveSet(bool),
}

/// Recording [`MapSurface`] implementation.
#[derive(Debug)]
pub struct RecordingSurface {
    next_handle: u64,
    live: BTreeMap<VisualHandle, Visual>,
    ops: Vec<SurfaceOp>,
    viewport: Viewport,
    zoom: u8,
}

impl RecordingSurface {
    /// Create a surface showing the given bounds at the given zoom.
    pub fn new(viewport: Viewport, zoom: u8) -> Self {
        Self {
            next_handle: 1,
            live: BTreeMap::new(),
            ops: Vec::new(),
            viewport,
            zoom,
        }
    }

    /// Script a pan/zoom: the next `viewport()`/`zoom()` reads see these.
    pub fn move_view(&mut self, viewport: Viewport, zoom: u8) {
        self.viewport = viewport;
        self.zoom = zoom;
    }

    /// Visuals currently on the surface.
    pub fn live_visuals(&self) -> impl Iterator<Item = (&VisualHandle, &Visual)> {
        self.live.iter()
    }

    /// Number of visuals currently on the surface.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// The full operation log, in order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Clear the operation log (live visuals are kept).
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        // Rome at city zoom, matching the client's fallback view.
        Self::new(Viewport::new(42.0, 41.8, 12.6, 12.4), 12)
    }
}

impl MapSurface for RecordingSurface {
    fn set_view(&mut self, center: LatLon, zoom: u8) {
        self.zoom = zoom;
        self.ops.push(SurfaceOp::ViewSet { center, zoom });
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn add_visual(&mut self, visual: Visual) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, visual);
        self.ops.push(SurfaceOp::Added(handle));
        handle
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_some() {
            self.ops.push(SurfaceOp::Removed(handle));
        }
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.ops.push(SurfaceOp::InteractiveSet(interactive));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MarkerStyle;

    fn marker() -> Visual {
        Visual::Marker {
            position: LatLon::new(41.9, 12.5),
            style: MarkerStyle::Dot,
        }
    }

    #[test]
    fn test_handles_are_unique() {
        let mut surface = RecordingSurface::default();
        let a = surface.add_visual(marker());
        let b = surface.add_visual(marker());
        assert_ne!(a, b);
        assert_eq!(surface.live_count(), 2);
    }

    #[test]
    fn test_remove_unknown_handle_is_ignored() {
        let mut surface = RecordingSurface::default();
        surface.remove_visual(VisualHandle(99));
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_ops_record_order() {
        let mut surface = RecordingSurface::default();
        let a = surface.add_visual(marker());
        surface.remove_visual(a);
        assert_eq!(
            surface.ops(),
            &[SurfaceOp::Added(a), SurfaceOp::Removed(a)]
        );
    }
}
