//! voltroute charging-route planning HTTP service.
//!
//! This service plans driving routes for electric vehicles, inserting
//! charging stops when the vehicle's range cannot cover the direct
//! distance, and proxies the supporting providers the frontend needs.
//!
//! # Endpoints
//!
//! - `GET /api/v1/route/charging` - Plan a route with charging stops
//! - `GET /api/v1/route` - Direct route without range constraints
//! - `GET /api/v1/stations` - Charging stations near a point
//! - `GET /api/v1/geocode` - Place-name search
//! - `GET /api/v1/vehicles` - Electric vehicle catalog
//! - `POST /api/v1/trip/time` - Total trip time estimate
//! - `POST /api/v1/trip/price` - Total trip price estimate
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe

#![deny(warnings)]

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use voltroute_service_shared::{
    health_live, health_ready, metrics_handler, AppState, TelemetryLayer,
};

/// Build the service router over the given application state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/route", get(handlers::direct_route))
        .route("/api/v1/route/charging", get(handlers::charging_route))
        .route("/api/v1/stations", get(handlers::stations))
        .route("/api/v1/geocode", get(handlers::geocode))
        .route("/api/v1/vehicles", get(handlers::vehicles))
        .route("/api/v1/trip/time", post(handlers::trip_time))
        .route("/api/v1/trip/price", post(handlers::trip_price))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TelemetryLayer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
