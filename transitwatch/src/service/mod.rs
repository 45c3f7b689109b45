//! Transit data service abstraction.
//!
//! The backend that serves countries, city datasets, route info, vehicle
//! positions, and stop info is an external collaborator. The controller
//! depends on this trait; [`HttpTransitService`] is the production
//! implementation, and tests substitute their own.
//!
//! Methods return boxed futures so the trait stays object-safe: the
//! controller holds an `Arc<dyn TransitDataService>` and spawns fetches
//! that outlive the call site.

mod http;

pub use http::HttpTransitService;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::geo::Viewport;
use crate::model::{CityInfo, RouteInfo, StopSnapshot, VehiclePositionsResult};

/// Errors from the transit data service.
///
/// All of them are transient from the client's point of view: the caller
/// logs and lets the next scheduled trigger retry.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The request failed (connection, timeout, non-2xx status).
    #[error("request failed: {0}")]
    Http(String),

    /// The response body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Contract for the backend serving transit data.
pub trait TransitDataService: Send + Sync {
    /// Countries with at least one dataset.
    fn list_countries(&self) -> BoxFuture<'_, Result<Vec<String>, ServiceError>>;

    /// City datasets available in a country.
    fn list_cities<'a>(
        &'a self,
        country: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CityInfo>, ServiceError>>;

    /// Route ids and bounding box for a dataset.
    fn route_info<'a>(
        &'a self,
        dataset_id: &'a str,
    ) -> BoxFuture<'a, Result<RouteInfo, ServiceError>>;

    /// Vehicle positions within the viewport, filtered to the given routes
    /// (empty slice means all routes).
    fn vehicle_positions<'a>(
        &'a self,
        dataset_id: &'a str,
        viewport: Viewport,
        route_ids: &'a [String],
    ) -> BoxFuture<'a, Result<VehiclePositionsResult, ServiceError>>;

    /// Stops within the viewport, filtered like vehicle positions.
    fn stops_info<'a>(
        &'a self,
        dataset_id: &'a str,
        viewport: Viewport,
        route_ids: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<StopSnapshot>, ServiceError>>;
}
