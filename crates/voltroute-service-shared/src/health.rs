//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Configured upstream base URLs (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstreams: Option<Vec<String>>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            upstreams: None,
        }
    }

    /// Create a ready status listing the configured upstreams.
    pub fn ready(service: &str, version: &str, upstreams: Vec<String>) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            upstreams: Some(upstreams),
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK if the service is running. This is a simple check that
/// does not depend on external resources.
///
/// # Example
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"plan","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// The upstream clients are constructed at startup, so readiness reduces to
/// the state being present; the response lists the configured upstream base
/// URLs so operators can confirm which providers a pod is wired against.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let status = HealthStatus::ready(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        state.upstreams().to_vec(),
    );
    (StatusCode::OK, Json(status)).into_response()
}
