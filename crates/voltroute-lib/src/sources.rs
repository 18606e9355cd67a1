//! Collaborator ports consumed by the charging-stop planner.
//!
//! The planner reaches the outside world only through these traits so it can
//! be exercised with deterministic fakes in tests. Production
//! implementations live in [`crate::osrm`] and [`crate::irve`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::{Coordinate, LineString};

/// A charging-station candidate returned by the station directory.
///
/// Read-only to the planner; `attributes` carries the provider's raw fields
/// untouched for API consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station position.
    pub coordinate: Coordinate,
    /// Straight-line distance from the query point, in meters.
    pub distance_m: f64,
    /// Maximum charging power, in kW.
    pub power_kw: f64,
    /// Raw provider fields.
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Metrics for a best-effort route visiting an ordered coordinate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Path geometry visiting the waypoints in order.
    pub geometry: LineString,
    /// Total distance in meters.
    pub distance_m: f64,
    /// Total driving duration in seconds.
    pub duration_s: f64,
}

/// Directory of charging stations near a point.
#[async_trait]
pub trait StationSource: Send + Sync {
    /// Stations within `radius_km` of `center`, each carrying its own
    /// straight-line distance from `center`.
    async fn stations_near(&self, center: Coordinate, radius_km: f64) -> Result<Vec<Station>>;
}

/// Routing provider producing geometry and totals for ordered waypoints.
#[async_trait]
pub trait RouteSource: Send + Sync {
    /// Best-effort route visiting `waypoints` in order.
    async fn route(&self, waypoints: &[Coordinate]) -> Result<RouteMetrics>;
}
