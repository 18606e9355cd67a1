//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details
//! standard. See: <https://www.rfc-editor.org/rfc/rfc9457.html>
//!
//! Planner and upstream failures are mapped to deliberately generic
//! messages: provider error payloads never reach API consumers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use voltroute_lib::Error as LibError;

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for trips with no viable charging path.
pub const PROBLEM_CHARGING_ROUTE_NOT_FOUND: &str = "/problems/charging-route-not-found";

/// Problem type URI for upstream provider failures.
pub const PROBLEM_UPSTREAM_UNAVAILABLE: &str = "/problems/upstream-unavailable";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
///
/// Provides a consistent format for error responses across all endpoints.
///
/// # Example
///
/// ```
/// use voltroute_service_shared::{ProblemDetails, PROBLEM_INVALID_REQUEST};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_INVALID_REQUEST,
///     "Invalid Request",
///     StatusCode::BAD_REQUEST,
/// )
/// .with_detail("The 'start' parameter is required")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for trips without a viable charging
    /// path. The detail is intentionally generic.
    pub fn charging_route_not_found(request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_CHARGING_ROUTE_NOT_FOUND,
            "Charging Route Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail("No route with charging stations could be found between the requested points")
        .with_request_id(request_id)
    }

    /// Create a 502 Bad Gateway problem for upstream provider failures.
    /// The detail is intentionally generic and never carries the provider's
    /// error payload.
    pub fn upstream_unavailable(request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_UPSTREAM_UNAVAILABLE,
            "Upstream Provider Unavailable",
            StatusCode::BAD_GATEWAY,
        )
        .with_detail("Could not retrieve routing or charging-station data")
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.detail.as_deref().unwrap_or(""))
    }
}

impl std::error::Error for ProblemDetails {}

/// Implement IntoResponse for axum to return ProblemDetails as HTTP responses.
impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Set the content-type header to application/problem+json
        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// Validation failures keep their message; every other failure maps to a
/// generic, non-leaking problem. The `request_id` must be provided
/// separately since library errors don't carry one.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::InvalidCoordinate { .. } => {
            ProblemDetails::bad_request(error.to_string(), request_id)
        }
        LibError::NoStationsNearby { .. } | LibError::NoAlignedStation { .. } => {
            ProblemDetails::charging_route_not_found(request_id)
        }
        LibError::EmptyRoute | LibError::Http(_) => {
            ProblemDetails::upstream_unavailable(request_id)
        }
        LibError::Cancelled => {
            ProblemDetails::internal_error("planning was cancelled", request_id)
        }
        LibError::DegenerateHeading => {
            ProblemDetails::internal_error("route geometry could not be evaluated", request_id)
        }
    }
}
