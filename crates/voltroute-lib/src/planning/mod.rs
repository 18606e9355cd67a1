//! Charging-stop planning for range-limited electric vehicles.
//!
//! This module provides:
//! - [`PlanRequest`] - High-level planning request
//! - [`ChargingPlan`] - Planned waypoints, stations, and baseline metrics
//! - [`plan_charging_stops`] - Main entry point
//!
//! The planner issues one routing query for the direct distance, then
//! iteratively selects the farthest unvisited station aligned with the
//! destination until the remaining distance fits within the vehicle range.
//! The greedy farthest-aligned choice maximizes distance covered per stop
//! while keeping detours roughly on-heading; it does not guarantee a
//! globally optimal trip, which is acceptable given that candidate data
//! carries no routing-cost model.

mod planner;

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::geo::Coordinate;
use crate::sources::{RouteMetrics, RouteSource, Station, StationSource};

use planner::StopPlanner;

/// Vehicle range (km) applied when a request does not carry a usable one.
pub const DEFAULT_RANGE_KM: f64 = 100.0;

/// High-level charging-route planning request.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    /// Vehicle range in kilometers.
    pub range_km: f64,
}

impl PlanRequest {
    pub fn new(start: Coordinate, end: Coordinate, range_km: f64) -> Self {
        Self {
            start,
            end,
            range_km,
        }
    }
}

/// Planned charging route returned by the library.
#[derive(Debug, Clone)]
pub struct ChargingPlan {
    /// Ordered stops: start, the selected stations, end.
    pub waypoints: Vec<Coordinate>,
    /// Stations backing the interior waypoints, in visit order.
    pub stations: Vec<Station>,
    /// Metrics of the direct start-to-end route.
    pub direct: RouteMetrics,
}

impl ChargingPlan {
    /// Number of charging stops inserted into the route.
    pub fn stop_count(&self) -> usize {
        self.waypoints.len().saturating_sub(2)
    }
}

/// Plan charging stops between `request.start` and `request.end`.
///
/// State for one invocation is owned by that invocation alone; concurrent
/// plans share nothing. Cancellation is observed at the top of each
/// iteration and surfaces as [`crate::Error::Cancelled`]. Upstream failures
/// are returned immediately without retries.
///
/// The remaining distance is decremented with the straight-line
/// distance-from-query-point values supplied by the station directory, not
/// recomputed road distances; the loop's threshold is therefore an
/// approximation of the real remaining driving distance.
pub async fn plan_charging_stops(
    routes: &dyn RouteSource,
    stations: &dyn StationSource,
    request: &PlanRequest,
    cancel: &CancellationToken,
) -> Result<ChargingPlan> {
    let direct = routes.route(&[request.start, request.end]).await?;
    tracing::debug!(
        distance_m = direct.distance_m,
        duration_s = direct.duration_s,
        range_km = request.range_km,
        "direct route resolved"
    );

    StopPlanner::new(request, direct).run(stations, cancel).await
}
