//! Prometheus metrics infrastructure for voltroute services.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for the `/metrics` endpoint
//! - Business metric helpers for the planning service
//!
//! # Example
//!
//! ```no_run
//! use voltroute_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! // Initialize metrics at startup
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! // Add metrics endpoint to router
//! let app: Router = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use voltroute_lib::Error as LibError;

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// This must be called once at application startup before any metrics are
/// recorded. Subsequent calls will return an error.
///
/// # Errors
///
/// Returns an error if:
/// - Metrics are disabled in configuration
/// - The recorder has already been installed
/// - The Prometheus builder fails to install
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Axum handler for the `/metrics` endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    Disabled,
    /// The recorder has already been installed.
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Record a successfully planned charging route.
///
/// Increments `voltroute_plans_calculated_total` and records the number of
/// inserted stops in the `voltroute_plan_stops` histogram.
pub fn record_plan_calculated(stops: usize) {
    metrics::counter!("voltroute_plans_calculated_total").increment(1);
    metrics::histogram!("voltroute_plan_stops").record(stops as f64);
}

/// Record a failed planning attempt.
///
/// Increments `voltroute_plans_failed_total` labeled by failure reason.
pub fn record_plan_failed(reason: &str) {
    metrics::counter!(
        "voltroute_plans_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record a call to an upstream provider.
///
/// Increments `voltroute_upstream_requests_total` labeled by provider and
/// outcome ("ok" or "error").
pub fn record_upstream_call(provider: &str, outcome: &str) {
    metrics::counter!(
        "voltroute_upstream_requests_total",
        "provider" => provider.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Stable failure-reason label for a library error.
pub fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::InvalidCoordinate { .. } => "validation_error",
        LibError::NoStationsNearby { .. } => "no_stations_nearby",
        LibError::NoAlignedStation { .. } => "no_aligned_station",
        LibError::EmptyRoute => "empty_route",
        LibError::DegenerateHeading => "geometry_error",
        LibError::Cancelled => "cancelled",
        LibError::Http(_) => "upstream_error",
    }
}
