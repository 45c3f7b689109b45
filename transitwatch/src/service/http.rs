//! HTTP implementation of the transit data service.
//!
//! Talks JSON to the backend's query endpoints. Viewport bounds and the
//! comma-joined route filter are passed through as query parameters exactly
//! as read; the backend does the geographic filtering.

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::geo::Viewport;
use crate::model::{CityInfo, RouteInfo, StopSnapshot, VehicleFeed, VehiclePositionsResult};

use super::{ServiceError, TransitDataService};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Reqwest-backed [`TransitDataService`].
pub struct HttpTransitService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransitService {
    /// Create a client for the backend at `base_url` with the default
    /// request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ServiceError::Http(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let value = self.get_value(path, query).await?;
        serde_json::from_value(value).map_err(|e| ServiceError::Malformed(e.to_string()))
    }

    async fn get_value(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ServiceError::Http(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Http(format!("HTTP {} from {}", status, url)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))
    }
}

fn viewport_query(viewport: Viewport) -> [(&'static str, String); 4] {
    [
        ("north", viewport.north.to_string()),
        ("south", viewport.south.to_string()),
        ("east", viewport.east.to_string()),
        ("west", viewport.west.to_string()),
    ]
}

fn joined_routes(route_ids: &[String]) -> String {
    route_ids.join(",")
}

/// Decode the tri-state vehicle-positions payload: an empty JSON object
/// means the backend has no feed yet; anything else must be a feed.
fn decode_vehicle_positions(value: Value) -> Result<VehiclePositionsResult, ServiceError> {
    if let Value::Object(map) = &value {
        if map.is_empty() {
            return Ok(VehiclePositionsResult::NoDataYet);
        }
    }
    let feed: VehicleFeed =
        serde_json::from_value(value).map_err(|e| ServiceError::Malformed(e.to_string()))?;
    Ok(VehiclePositionsResult::Feed(feed))
}

impl TransitDataService for HttpTransitService {
    fn list_countries(&self) -> BoxFuture<'_, Result<Vec<String>, ServiceError>> {
        Box::pin(async move { self.get_json("/get_available_countries", &[]).await })
    }

    fn list_cities<'a>(
        &'a self,
        country: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CityInfo>, ServiceError>> {
        Box::pin(async move {
            self.get_json(
                "/get_available_datasets",
                &[("country", country.to_string())],
            )
            .await
        })
    }

    fn route_info<'a>(
        &'a self,
        dataset_id: &'a str,
    ) -> BoxFuture<'a, Result<RouteInfo, ServiceError>> {
        Box::pin(async move {
            self.get_json("/get_route_info", &[("datasetId", dataset_id.to_string())])
                .await
        })
    }

    fn vehicle_positions<'a>(
        &'a self,
        dataset_id: &'a str,
        viewport: Viewport,
        route_ids: &'a [String],
    ) -> BoxFuture<'a, Result<VehiclePositionsResult, ServiceError>> {
        Box::pin(async move {
            let mut query = vec![
                ("datasetId", dataset_id.to_string()),
                ("routes", joined_routes(route_ids)),
            ];
            query.extend(viewport_query(viewport));
            let value = self.get_value("/get_vehicle_positions", &query).await?;
            decode_vehicle_positions(value)
        })
    }

    fn stops_info<'a>(
        &'a self,
        dataset_id: &'a str,
        viewport: Viewport,
        route_ids: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<StopSnapshot>, ServiceError>> {
        Box::pin(async move {
            let mut query = vec![
                ("datasetId", dataset_id.to_string()),
                ("routes", joined_routes(route_ids)),
            ];
            query.extend(viewport_query(viewport));
            self.get_json("/get_stops_info", &query).await
        })
    }
}
