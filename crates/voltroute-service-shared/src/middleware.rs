//! HTTP middleware for voltroute services.
//!
//! This module provides:
//! - [`RequestId`]: Newtype for correlation ID extraction/generation
//! - [`extract_or_generate_request_id`]: Extract X-Request-ID header or generate UUID v7
//! - [`TelemetryLayer`]: Tower middleware recording request metrics
//!
//! # Request ID Propagation
//!
//! Handlers extract the `X-Request-ID` header if present, otherwise
//! generate a new UUID v7 (time-sortable). The ID is injected into tracing
//! spans for correlation across log entries.
//!
//! # Metrics Recording
//!
//! The `TelemetryLayer` records:
//! - `http_requests_total`: Counter by method, path, status bucket
//! - `http_request_duration_seconds`: Histogram by method, path

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{HeaderMap, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Newtype wrapper for request correlation IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Create a new request ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new UUID v7 request ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the request ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Extract the request ID from headers or generate a new UUID v7.
///
/// Looks for the `X-Request-ID` header (case-insensitive). If not present
/// or empty, generates a new UUID v7 (time-sortable).
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Normalize a request path for metric labels.
///
/// Strips query parameters to prevent cardinality explosion in metrics.
fn normalize_path(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

/// Convert an HTTP status code to a bucket label.
fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Tower layer recording per-request telemetry.
#[derive(Debug, Clone)]
pub struct TelemetryLayer;

impl<S> Layer<S> for TelemetryLayer {
    type Service = TelemetryMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TelemetryMiddleware { inner }
    }
}

/// Middleware service that records request metrics and spans.
#[derive(Debug, Clone)]
pub struct TelemetryMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for TelemetryMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: http_body::Body + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = TelemetryFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();

        let method = req.method().to_string();
        let path = normalize_path(req.uri().path()).to_string();
        let request_id = extract_or_generate_request_id(req.headers());

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        {
            let _enter = span.enter();
            tracing::info!("handling request");
        }

        let future = self.inner.call(req);

        TelemetryFuture {
            inner: future,
            start,
            method,
            path,
            span,
        }
    }
}

pin_project! {
    /// Future wrapper that records metrics on completion.
    pub struct TelemetryFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        method: String,
        path: String,
        span: Span,
    }
}

impl<F, ResBody, E> Future for TelemetryFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    ResBody: http_body::Body,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        match this.inner.poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(result) => {
                let duration_secs = this.start.elapsed().as_secs_f64();
                let latency_ms = duration_secs * 1000.0;

                let status_label = match &result {
                    Ok(response) => status_bucket(response.status().as_u16()),
                    Err(_) => "5xx",
                };

                metrics::counter!(
                    "http_requests_total",
                    "method" => this.method.clone(),
                    "path" => this.path.clone(),
                    "status" => status_label
                )
                .increment(1);

                metrics::histogram!(
                    "http_request_duration_seconds",
                    "method" => this.method.clone(),
                    "path" => this.path.clone()
                )
                .record(duration_secs);

                match &result {
                    Ok(response) => tracing::info!(
                        status = response.status().as_u16(),
                        latency_ms = latency_ms,
                        "request completed"
                    ),
                    Err(_) => tracing::error!(latency_ms = latency_ms, "request failed"),
                }

                Poll::Ready(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_generate() {
        let id1 = RequestId::generate();
        let id2 = RequestId::generate();

        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 36);
        assert!(id1.as_str().contains('-'));
    }

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("test-123"));

        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str(), "test-123");
    }

    #[test]
    fn test_extract_request_id_generates_when_missing() {
        let headers = HeaderMap::new();
        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_extract_request_id_generates_when_empty() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static(""));

        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/api/v1/route/charging"),
            "/api/v1/route/charging"
        );
        assert_eq!(
            normalize_path("/api/v1/route/charging?start=2.34,48.85"),
            "/api/v1/route/charging"
        );
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_status_bucket() {
        assert_eq!(status_bucket(200), "2xx");
        assert_eq!(status_bucket(302), "3xx");
        assert_eq!(status_bucket(400), "4xx");
        assert_eq!(status_bucket(404), "4xx");
        assert_eq!(status_bucket(502), "5xx");
    }
}
