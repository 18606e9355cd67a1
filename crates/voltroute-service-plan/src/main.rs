//! Service entry point for the voltroute planning microservice.
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `VOLTROUTE_*` - Upstream provider base URLs and timeout; see
//!   [`voltroute_service_shared::UpstreamConfig::from_env`]

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, warn};

use voltroute_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, UpstreamConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service("plan");
    init_logging(&logging_config);

    // Initialize metrics
    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Log but don't fail - metrics are optional
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let upstreams = UpstreamConfig::from_env();
    info!(
        osrm = %upstreams.osrm_url,
        stations = %upstreams.stations_url,
        port = port,
        "starting plan service"
    );

    let state = AppState::from_config(&upstreams).map_err(|e| {
        error!(error = %e, "failed to build upstream clients");
        e
    })?;

    let app = voltroute_service_plan::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
