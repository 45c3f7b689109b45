//! Geographic primitives shared across the crate.
//!
//! Coordinates are WGS84 degrees throughout. The map surface owns the actual
//! projection; this module only carries values between the surface, the data
//! service, and the reconciler.

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl LatLon {
    /// Create a new position.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// The visible map bounds, as reported by the map surface.
///
/// Invariant: `north > south`. `east` may wrap the antimeridian; the value is
/// treated as opaque and passed through to the data service verbatim, so no
/// normalization happens here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Northern edge latitude.
    pub north: f64,
    /// Southern edge latitude.
    pub south: f64,
    /// Eastern edge longitude (opaque, may wrap).
    pub east: f64,
    /// Western edge longitude.
    pub west: f64,
}

impl Viewport {
    /// Create a new viewport from its four edges.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }
}

/// Minimum bounding rectangle of a dataset's routes.
///
/// Returned by the data service's route-info call and used to center the
/// initial view on a freshly selected dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum (southernmost) latitude.
    pub min_lat: f64,
    /// Maximum (northernmost) latitude.
    pub max_lat: f64,
    /// Minimum (westernmost) longitude.
    pub min_lon: f64,
    /// Maximum (easternmost) longitude.
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Get the centroid of the box.
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}
