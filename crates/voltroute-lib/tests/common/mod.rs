//! Deterministic fake collaborators for planner tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use voltroute_lib::{
    Coordinate, LineString, Result, RouteMetrics, RouteSource, Station, StationSource,
};

pub const PARIS: Coordinate = Coordinate {
    lat: 48.8535,
    lon: 2.3484,
};

pub const MARSEILLE: Coordinate = Coordinate {
    lat: 43.2962,
    lon: 5.37,
};

/// Route source returning fixed totals and counting calls.
pub struct FixedRoutes {
    pub distance_m: f64,
    pub duration_s: f64,
    calls: AtomicUsize,
}

impl FixedRoutes {
    pub fn new(distance_m: f64, duration_s: f64) -> Self {
        Self {
            distance_m,
            duration_s,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteSource for FixedRoutes {
    async fn route(&self, waypoints: &[Coordinate]) -> Result<RouteMetrics> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let coordinates = waypoints.iter().map(|c| [c.lon, c.lat]).collect();
        Ok(RouteMetrics {
            geometry: LineString::new(coordinates),
            distance_m: self.distance_m,
            duration_s: self.duration_s,
        })
    }
}

/// Station source replaying scripted batches, one per query.
pub struct ScriptedStations {
    batches: Mutex<VecDeque<Vec<Station>>>,
    queries: AtomicUsize,
}

impl ScriptedStations {
    pub fn new(batches: Vec<Vec<Station>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StationSource for ScriptedStations {
    async fn stations_near(&self, _center: Coordinate, _radius_km: f64) -> Result<Vec<Station>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }
}

pub fn station(lat: f64, lon: f64, distance_m: f64) -> Station {
    Station {
        coordinate: Coordinate::new(lat, lon),
        distance_m,
        power_kw: 50.0,
        attributes: serde_json::Map::new(),
    }
}
