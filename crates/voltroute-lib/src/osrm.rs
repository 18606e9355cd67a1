//! OSRM routing provider client.
//!
//! Implements [`RouteSource`] against the OSRM HTTP `route` service,
//! requesting full-overview GeoJSON geometry and keeping only the first
//! (best) route of each response, as the frontends expect.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geo::{Coordinate, LineString};
use crate::sources::{RouteMetrics, RouteSource};

/// Public OSRM demo server, used when no override is configured.
pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";

/// HTTP client for an OSRM `route` service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: Client,
    base_url: String,
}

impl OsrmClient {
    /// Build a client against `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("voltroute/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RouteEnvelope {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: LineString,
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
}

impl From<OsrmRoute> for RouteMetrics {
    fn from(route: OsrmRoute) -> Self {
        Self {
            geometry: route.geometry,
            distance_m: route.distance,
            duration_s: route.duration,
        }
    }
}

#[async_trait]
impl RouteSource for OsrmClient {
    async fn route(&self, waypoints: &[Coordinate]) -> Result<RouteMetrics> {
        let path = waypoints
            .iter()
            .map(Coordinate::to_string)
            .collect::<Vec<_>>()
            .join(";");
        let url = format!("{}/route/v1/driving/{}", self.base_url, path);

        tracing::debug!(waypoints = waypoints.len(), "querying routing provider");
        let envelope: RouteEnvelope = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        envelope
            .routes
            .into_iter()
            .next()
            .map(RouteMetrics::from)
            .ok_or(Error::EmptyRoute)
    }
}
