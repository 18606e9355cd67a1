//! Greedy farthest-aligned charging-stop selection loop.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::geo::{CoordKey, Coordinate};
use crate::heading::is_aligned;
use crate::sources::{RouteMetrics, Station, StationSource};

use super::{ChargingPlan, PlanRequest};

/// State for a single planning invocation.
///
/// The loop walks SEARCHING -> SELECTING -> ADVANCING until the remaining
/// distance fits within the vehicle range, then finishes the waypoint list,
/// or fails with a typed error. Every successful iteration strictly shrinks
/// `remaining_m` and strictly grows `visited`, so the loop cannot cycle.
pub(super) struct StopPlanner {
    end: Coordinate,
    range_km: f64,
    current: Coordinate,
    /// Straight-line approximation of the distance still to cover, seeded
    /// from the direct route and decremented per selected station.
    remaining_m: f64,
    visited: HashSet<CoordKey>,
    waypoints: Vec<Coordinate>,
    stations: Vec<Station>,
    direct: RouteMetrics,
}

impl StopPlanner {
    pub(super) fn new(request: &PlanRequest, direct: RouteMetrics) -> Self {
        Self {
            end: request.end,
            range_km: request.range_km,
            current: request.start,
            remaining_m: direct.distance_m,
            visited: HashSet::new(),
            waypoints: vec![request.start],
            stations: Vec::new(),
            direct,
        }
    }

    pub(super) async fn run(
        mut self,
        stations: &dyn StationSource,
        cancel: &CancellationToken,
    ) -> Result<ChargingPlan> {
        while self.remaining_m > self.range_km * 1000.0 {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let candidates = stations.stations_near(self.current, self.range_km).await?;
            tracing::debug!(
                candidates = candidates.len(),
                remaining_m = self.remaining_m,
                "searching for a charging stop"
            );
            if candidates.is_empty() {
                return Err(Error::NoStationsNearby {
                    lat: self.current.lat,
                    lon: self.current.lon,
                    radius_km: self.range_km,
                });
            }

            let chosen = self.select(candidates)?;
            self.advance(chosen);
        }

        self.waypoints.push(self.end);
        tracing::info!(stops = self.stations.len(), "charging plan complete");
        Ok(ChargingPlan {
            waypoints: self.waypoints,
            stations: self.stations,
            direct: self.direct,
        })
    }

    /// Farthest unvisited candidate aligned with the destination.
    fn select(&self, mut candidates: Vec<Station>) -> Result<Station> {
        candidates.sort_by(|a, b| b.distance_m.total_cmp(&a.distance_m));

        candidates
            .into_iter()
            .find(|station| {
                // Non-positive distances would stall the loop.
                station.distance_m > 0.0
                    && !self.visited.contains(&station.coordinate.key())
                    && is_aligned(self.current, station.coordinate, self.end)
            })
            .ok_or(Error::NoAlignedStation {
                lat: self.current.lat,
                lon: self.current.lon,
            })
    }

    fn advance(&mut self, station: Station) {
        self.remaining_m -= station.distance_m;
        self.current = station.coordinate;
        self.visited.insert(station.coordinate.key());
        self.waypoints.push(station.coordinate);
        tracing::debug!(
            lat = station.coordinate.lat,
            lon = station.coordinate.lon,
            advanced_m = station.distance_m,
            remaining_m = self.remaining_m,
            "selected charging stop"
        );
        self.stations.push(station);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LineString;

    fn request() -> PlanRequest {
        PlanRequest::new(
            Coordinate::new(48.8535, 2.3484),
            Coordinate::new(43.2962, 5.37),
            450.0,
        )
    }

    fn direct(distance_m: f64) -> RouteMetrics {
        RouteMetrics {
            geometry: LineString::new(vec![]),
            distance_m,
            duration_s: 3600.0,
        }
    }

    fn station(lat: f64, lon: f64, distance_m: f64) -> Station {
        Station {
            coordinate: Coordinate::new(lat, lon),
            distance_m,
            power_kw: 50.0,
            attributes: serde_json::Map::new(),
        }
    }

    #[test]
    fn select_prefers_farthest_aligned_candidate() {
        let planner = StopPlanner::new(&request(), direct(660_000.0));
        // On-heading at 300 km beats the off-heading 350 km candidate.
        let aligned = station(46.352715, 3.70812, 300_000.0);
        let misaligned = station(49.9, 0.8, 350_000.0);

        let chosen = planner
            .select(vec![misaligned, aligned.clone()])
            .expect("aligned candidate exists");
        assert_eq!(chosen.coordinate, aligned.coordinate);
    }

    #[test]
    fn select_skips_visited_candidates() {
        let mut planner = StopPlanner::new(&request(), direct(660_000.0));
        let near = station(47.18631, 3.25488, 250_000.0);
        let far = station(46.352715, 3.70812, 300_000.0);
        planner.advance(far.clone());

        let chosen = planner
            .select(vec![far, near.clone()])
            .expect("unvisited candidate exists");
        assert_eq!(chosen.coordinate, near.coordinate);
    }

    #[test]
    fn select_rejects_zero_distance_candidates() {
        let planner = StopPlanner::new(&request(), direct(660_000.0));
        let stalled = station(46.352715, 3.70812, 0.0);

        let error = planner.select(vec![stalled]).expect_err("no progress");
        assert!(matches!(error, Error::NoAlignedStation { .. }));
    }

    #[test]
    fn advance_shrinks_remaining_distance() {
        let mut planner = StopPlanner::new(&request(), direct(660_000.0));
        planner.advance(station(46.352715, 3.70812, 300_000.0));

        assert_eq!(planner.remaining_m, 360_000.0);
        assert_eq!(planner.waypoints.len(), 2);
        assert_eq!(planner.stations.len(), 1);
        assert_eq!(planner.current, Coordinate::new(46.352715, 3.70812));
    }
}
