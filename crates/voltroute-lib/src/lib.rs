//! voltroute library entry points.
//!
//! This crate plans driving routes for electric vehicles, inserting charging
//! stops when the vehicle's range cannot cover the direct distance. It
//! exposes the charging-stop planner together with the collaborator ports it
//! consumes (station directory, routing provider, geocoder, vehicle catalog,
//! trip estimator) and their production HTTP clients. Higher-level consumers
//! (HTTP services) should only depend on the items exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod assembler;
pub mod chargetrip;
pub mod error;
pub mod estimator;
pub mod geo;
pub mod heading;
pub mod irve;
pub mod nominatim;
pub mod osrm;
pub mod planning;
pub mod sources;

pub use assembler::{assemble, LabeledWaypoint, PlannedRoute};
pub use chargetrip::{ChargetripClient, Vehicle, VehicleCatalog};
pub use error::{Error, Result};
pub use estimator::{CarProfile, EstimatorClient, TripEstimator};
pub use geo::{CoordKey, Coordinate, LineString};
pub use heading::{heading_angle, is_aligned};
pub use irve::IrveClient;
pub use nominatim::{Geocoder, NominatimClient, Place};
pub use osrm::OsrmClient;
pub use planning::{plan_charging_stops, ChargingPlan, PlanRequest, DEFAULT_RANGE_KM};
pub use sources::{RouteMetrics, RouteSource, Station, StationSource};
