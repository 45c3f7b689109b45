//! Snapshot types fetched from the transit data service.
//!
//! Field names follow the backend's wire format: vehicle and stop records use
//! snake_case keys, while the envelope keys of the route-info and
//! vehicle-positions responses are camelCase.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::geo::BoundingBox;

/// A city/feed entry in a country's dataset list.
///
/// `name` is the display name; backends join alternate spellings with commas
/// (e.g. `"Roma, Rome"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityInfo {
    /// Opaque dataset id.
    pub id: String,
    /// Comma-joined display aliases.
    pub name: String,
}

/// Route metadata for one dataset.
///
/// Produced once per dataset change. `route_ids` arrive in backend order;
/// the selector sorts them with [`super::sort_route_ids`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// All route ids the dataset serves, in fetch order.
    #[serde(rename = "routeIds")]
    pub route_ids: Vec<String>,
    #[serde(rename = "minLat")]
    pub min_lat: f64,
    #[serde(rename = "maxLat")]
    pub max_lat: f64,
    #[serde(rename = "minLon")]
    pub min_lon: f64,
    #[serde(rename = "maxLon")]
    pub max_lon: f64,
}

impl RouteInfo {
    /// The minimum bounding rectangle of the dataset's routes.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.min_lat, self.max_lat, self.min_lon, self.max_lon)
    }
}

/// One vehicle position report.
///
/// Identity is `vehicle_id`: two snapshots with the same id are the same
/// logical vehicle at different moments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    /// Stable vehicle identity.
    pub vehicle_id: String,
    /// Route the vehicle is serving.
    pub route_id: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Heading in degrees `[0, 360)`. `0` means unknown or stationary.
    #[serde(default)]
    pub bearing: f64,
    /// Ground speed in km/h, never negative.
    #[serde(rename = "speed", default)]
    pub speed_kmh: f64,
    /// Name of the last stop served, when the feed reports it.
    #[serde(default)]
    pub last_stop_name: Option<String>,
}

/// One stop record. Identity is `stop_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSnapshot {
    /// Stable stop identity.
    pub stop_id: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Display name of the stop.
    pub stop_name: String,
}

/// A successful vehicle-positions payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFeed {
    /// Vehicles currently reported by the feed.
    pub vehicles: Vec<VehicleSnapshot>,
    /// Epoch seconds when the upstream feed was created.
    #[serde(rename = "createdDate", default)]
    pub created_date: i64,
    /// Epoch seconds of the feed's last update.
    #[serde(rename = "lastUpdate", default)]
    pub last_update: i64,
}

impl VehicleFeed {
    /// Human-readable `last_update`, for display and logs only.
    pub fn last_update_display(&self) -> String {
        match DateTime::from_timestamp(self.last_update, 0) {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => "unknown".to_string(),
        }
    }
}

/// Outcome of a vehicle-positions fetch.
///
/// The backend answers with an empty JSON object while its own upstream poll
/// has not completed yet. That is distinct from a feed that happens to carry
/// zero vehicles, so the two cases are kept apart instead of overloading an
/// empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum VehiclePositionsResult {
    /// The backend has no feed contents yet.
    NoDataYet,
    /// A feed snapshot, possibly with zero vehicles.
    Feed(VehicleFeed),
}
