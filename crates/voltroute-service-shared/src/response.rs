//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Wrapper for successful responses with content type metadata.
///
/// This provides symmetry with `ProblemDetails` by including content type
/// information in the response body. The payload's fields are flattened to
/// the top level, so the wrapper never changes the wire shape consumers
/// already depend on.
///
/// # Example
///
/// ```
/// use voltroute_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct DirectRoute {
///     distance: f64,
///     duration: f64,
/// }
///
/// let result = DirectRoute { distance: 660_000.0, duration: 23_760.0 };
/// let response = ServiceResponse::new(result);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    /// Create a new successful response with the default content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

/// Implement IntoResponse for axum to return ServiceResponse as HTTP responses.
impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
