//! Data model for the live-map client.
//!
//! Types here mirror what the transit backend actually serves: vehicle and
//! stop snapshots keyed by stable ids, per-dataset route info, and the city
//! list behind the dataset selector. Geographic interpretation lives in
//! [`crate::geo`]; rendering decisions live in [`crate::reconcile`].

mod routes;
mod snapshot;

pub use routes::{compare_route_ids, sort_route_ids};
pub use snapshot::{
    CityInfo, RouteInfo, StopSnapshot, VehicleFeed, VehiclePositionsResult, VehicleSnapshot,
};
