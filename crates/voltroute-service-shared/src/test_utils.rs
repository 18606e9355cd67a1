//! Test fixtures and mock state for handler testing.
//!
//! Enable the `test-utils` feature to use these from dependent crates.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use voltroute_lib::chargetrip::{Vehicle, VehicleCatalog};
use voltroute_lib::estimator::{CarProfile, TripEstimator};
use voltroute_lib::nominatim::{Geocoder, Place};
use voltroute_lib::{
    Coordinate, LineString, Result, RouteMetrics, RouteSource, Station, StationSource,
};

use crate::AppState;

/// Route source returning fixed totals with geometry echoing the waypoints.
pub struct StaticRoutes {
    pub distance_m: f64,
    pub duration_s: f64,
}

#[async_trait]
impl RouteSource for StaticRoutes {
    async fn route(&self, waypoints: &[Coordinate]) -> Result<RouteMetrics> {
        let coordinates = waypoints.iter().map(|c| [c.lon, c.lat]).collect();
        Ok(RouteMetrics {
            geometry: LineString::new(coordinates),
            distance_m: self.distance_m,
            duration_s: self.duration_s,
        })
    }
}

/// Station source replaying scripted batches, one per query.
///
/// Returns an empty batch once the script runs out, which fails a plan with
/// `NoStationsNearby`.
pub struct ScriptedStations {
    batches: Mutex<VecDeque<Vec<Station>>>,
}

impl ScriptedStations {
    pub fn new(batches: Vec<Vec<Station>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
        }
    }
}

#[async_trait]
impl StationSource for ScriptedStations {
    async fn stations_near(&self, _center: Coordinate, _radius_km: f64) -> Result<Vec<Station>> {
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Geocoder returning a fixed place list.
pub struct StaticGeocoder {
    pub places: Vec<Place>,
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn search(&self, _query: &str) -> Result<Vec<Place>> {
        Ok(self.places.clone())
    }
}

/// Vehicle catalog returning a fixed vehicle list.
pub struct StaticVehicles {
    pub vehicles: Vec<Vehicle>,
}

#[async_trait]
impl VehicleCatalog for StaticVehicles {
    async fn vehicles(&self) -> Result<Vec<Vehicle>> {
        Ok(self.vehicles.clone())
    }
}

/// Estimator returning a fixed value for both estimates.
pub struct StaticEstimator {
    pub value: f64,
}

#[async_trait]
impl TripEstimator for StaticEstimator {
    async fn total_time(
        &self,
        _station_power_kw: &[f64],
        _car: &CarProfile,
        _drive_time_min: f64,
    ) -> Result<f64> {
        Ok(self.value)
    }

    async fn total_price(&self, _station_power_kw: &[f64], _car: &CarProfile) -> Result<f64> {
        Ok(self.value)
    }
}

/// Station fixture with the given position and distance-from-query-point.
pub fn station(lat: f64, lon: f64, distance_m: f64) -> Station {
    Station {
        coordinate: Coordinate::new(lat, lon),
        distance_m,
        power_kw: 50.0,
        attributes: serde_json::Map::new(),
    }
}

/// Mock application state wired with deterministic fakes.
///
/// The route source reports `distance_m`/`duration_s` for every query; the
/// station source replays `station_batches` in order. Geocoder, vehicle
/// catalog, and estimator return empty/zero fixtures.
pub fn mock_state(distance_m: f64, duration_s: f64, station_batches: Vec<Vec<Station>>) -> AppState {
    AppState::from_sources(
        Arc::new(StaticRoutes {
            distance_m,
            duration_s,
        }),
        Arc::new(ScriptedStations::new(station_batches)),
        Arc::new(StaticGeocoder { places: Vec::new() }),
        Arc::new(StaticVehicles {
            vehicles: Vec::new(),
        }),
        Arc::new(StaticEstimator { value: 0.0 }),
    )
}
