//! Final route assembly over a planned waypoint sequence.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::LineString;
use crate::planning::ChargingPlan;
use crate::sources::{RouteSource, Station};

/// A waypoint labeled with the role it plays in the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledWaypoint {
    /// `departure`, `station N` (1-indexed), or `arrival`.
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

/// Response shape for a planned charging route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedRoute {
    /// Multi-leg geometry visiting every waypoint in order.
    pub geometry: LineString,
    /// Labeled stops in travel order.
    pub waypoints: Vec<LabeledWaypoint>,
    /// Driving time in seconds, charging pauses excluded.
    pub time: f64,
    /// Trip distance in meters.
    pub distance: f64,
    /// Stations selected for the interior waypoints.
    pub stations: Vec<Station>,
}

/// Merge a charging plan with the final multi-leg route geometry.
///
/// Issues exactly one routing call over the full waypoint list. The
/// top-level `time` and `distance` report the direct route's metrics, not
/// the multi-stop route's: consumers treat them as the baseline drive
/// without charging detours, and changing that is a product decision.
pub async fn assemble(routes: &dyn RouteSource, plan: ChargingPlan) -> Result<PlannedRoute> {
    let full = routes.route(&plan.waypoints).await?;

    let last = plan.waypoints.len().saturating_sub(1);
    let waypoints = plan
        .waypoints
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let label = if index == 0 {
                "departure".to_string()
            } else if index == last {
                "arrival".to_string()
            } else {
                format!("station {}", index)
            };
            LabeledWaypoint {
                label,
                lat: point.lat,
                lon: point.lon,
            }
        })
        .collect();

    Ok(PlannedRoute {
        geometry: full.geometry,
        waypoints,
        time: plan.direct.duration_s,
        distance: plan.direct.distance_m,
        stations: plan.stations,
    })
}
