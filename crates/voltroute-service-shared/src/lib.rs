//! Shared infrastructure for voltroute HTTP services.
//!
//! This crate provides common functionality used by the service containers:
//!
//! - [`AppState`]: Pre-built upstream provider clients behind their ports
//! - [`health`]: Health check handlers for liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and telemetry middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! The services follow a thin-handler pattern where all planning logic
//! resides in `voltroute-lib`. This crate provides only HTTP glue: parse
//! and validate the request, call the library through the ports held in
//! [`AppState`], and format the response.
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides deterministic fake collaborators and
//! a mock application state for handler testing. Enable the `test-utils`
//! feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    failure_reason, init_metrics, metrics_handler, record_plan_calculated, record_plan_failed,
    record_upstream_call, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, RequestId, TelemetryLayer};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_CHARGING_ROUTE_NOT_FOUND, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_UPSTREAM_UNAVAILABLE,
};
pub use request::{
    ChargingRouteParams, DirectRouteParams, GeocodeParams, StationsParams, TripEstimateBody,
    Validate,
};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError, UpstreamConfig};
