//! Log-backed map surface for terminal use.
//!
//! There is no map in a terminal, so the surface reports what a map would
//! show: view changes at info level, each rendered label as a log line.
//! Viewport and zoom are fixed at startup from the command line; the
//! countdown-driven refresh does the rest.

use tracing::{debug, info};
use transitwatch::geo::{LatLon, Viewport};
use transitwatch::surface::{MapSurface, Visual, VisualHandle};

/// [`MapSurface`] that logs instead of drawing.
pub struct LogSurface {
    viewport: Viewport,
    zoom: u8,
    next_handle: u64,
}

impl LogSurface {
    /// Create a surface showing the given bounds at the given zoom.
    pub fn new(viewport: Viewport, zoom: u8) -> Self {
        Self {
            viewport,
            zoom,
            next_handle: 1,
        }
    }
}

impl MapSurface for LogSurface {
    fn set_view(&mut self, center: LatLon, zoom: u8) {
        self.zoom = zoom;
        info!(center = %center, zoom, "View recentered");
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
        if let Visual::Label {
            position,
            text,
            tooltip,
        } = visual
        {
            match tooltip {
                Some(stop) => info!(position = %position, last_stop = %stop, "{}", text),
                None => info!(position = %position, "{}", text),
            }
        }
        handle
    }

    fn remove_visual(&mut self, _handle: VisualHandle) {}

    fn set_interactive(&mut self, interactive: bool) {
        debug!(interactive, "Interactivity toggled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut surface = LogSurface::new(Viewport::new(42.0, 41.8, 12.6, 12.4), 12);
        let a = surface.add_visual(Visual::Label {
            position: LatLon::new(41.9, 12.5),
            text: "64".to_string(),
            tooltip: None,
        });
        let b = surface.add_visual(Visual::Label {
            position: LatLon::new(41.9, 12.5),
            text: "64".to_string(),
            tooltip: None,
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_view_updates_zoom() {
        let mut surface = LogSurface::new(Viewport::new(42.0, 41.8, 12.6, 12.4), 12);
        surface.set_view(LatLon::new(41.9, 12.5), 15);
        assert_eq!(surface.zoom(), 15);
    }
}
