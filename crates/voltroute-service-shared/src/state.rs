//! Application state for the voltroute HTTP services.
//!
//! This module builds the upstream provider clients once at startup and
//! hands them to axum handlers behind their collaborator ports, so handlers
//! stay testable with deterministic fakes.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use voltroute_lib::chargetrip::{ChargetripClient, VehicleCatalog, DEFAULT_VEHICLES_URL};
use voltroute_lib::estimator::{EstimatorClient, TripEstimator, DEFAULT_ESTIMATOR_URL};
use voltroute_lib::irve::{IrveClient, DEFAULT_STATIONS_URL};
use voltroute_lib::nominatim::{Geocoder, NominatimClient, DEFAULT_GEOCODER_URL};
use voltroute_lib::osrm::{OsrmClient, DEFAULT_OSRM_URL};
use voltroute_lib::{Error as LibError, RouteSource, StationSource};

/// Default per-request timeout for upstream calls, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upstream provider configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub osrm_url: String,
    pub stations_url: String,
    pub geocoder_url: String,
    pub vehicles_url: String,
    pub estimator_url: String,
    pub chargetrip_client_id: String,
    pub chargetrip_app_id: String,
    /// Per-request timeout applied to every upstream call.
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            vehicles_url: DEFAULT_VEHICLES_URL.to_string(),
            estimator_url: DEFAULT_ESTIMATOR_URL.to_string(),
            chargetrip_client_id: String::new(),
            chargetrip_app_id: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl UpstreamConfig {
    /// Read configuration from `VOLTROUTE_*` environment variables, falling
    /// back to the public provider endpoints.
    ///
    /// - `VOLTROUTE_OSRM_URL` - OSRM routing provider
    /// - `VOLTROUTE_STATIONS_URL` - OpenDataSoft IRVE station directory
    /// - `VOLTROUTE_GEOCODER_URL` - Nominatim geocoder
    /// - `VOLTROUTE_VEHICLES_URL` - Chargetrip vehicle catalog
    /// - `VOLTROUTE_ESTIMATOR_URL` - trip estimation service
    /// - `VOLTROUTE_CHARGETRIP_CLIENT_ID` / `VOLTROUTE_CHARGETRIP_APP_ID`
    /// - `VOLTROUTE_UPSTREAM_TIMEOUT_SECS` - per-request timeout (default 10)
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| env::var(name).unwrap_or_else(|_| default.to_string());

        let timeout_secs = env::var("VOLTROUTE_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            osrm_url: var("VOLTROUTE_OSRM_URL", DEFAULT_OSRM_URL),
            stations_url: var("VOLTROUTE_STATIONS_URL", DEFAULT_STATIONS_URL),
            geocoder_url: var("VOLTROUTE_GEOCODER_URL", DEFAULT_GEOCODER_URL),
            vehicles_url: var("VOLTROUTE_VEHICLES_URL", DEFAULT_VEHICLES_URL),
            estimator_url: var("VOLTROUTE_ESTIMATOR_URL", DEFAULT_ESTIMATOR_URL),
            chargetrip_client_id: var("VOLTROUTE_CHARGETRIP_CLIENT_ID", ""),
            chargetrip_app_id: var("VOLTROUTE_CHARGETRIP_APP_ID", ""),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// An upstream HTTP client could not be constructed.
    ClientBuild(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClientBuild(e) => write!(f, "failed to build upstream client: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ClientBuild(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::ClientBuild(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); share it via axum's `State`
/// extractor. Handlers only see the collaborator ports, never the concrete
/// clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    routes: Arc<dyn RouteSource>,
    stations: Arc<dyn StationSource>,
    geocoder: Arc<dyn Geocoder>,
    vehicles: Arc<dyn VehicleCatalog>,
    estimator: Arc<dyn TripEstimator>,
    /// Configured upstream base URLs, for readiness reporting.
    upstreams: Vec<String>,
}

impl AppState {
    /// Build all upstream clients from the given configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, AppStateError> {
        tracing::info!(
            osrm = %config.osrm_url,
            stations = %config.stations_url,
            geocoder = %config.geocoder_url,
            "building upstream clients"
        );

        let routes = OsrmClient::new(config.osrm_url.as_str(), config.timeout)?;
        let stations = IrveClient::new(config.stations_url.as_str(), config.timeout)?;
        let geocoder = NominatimClient::new(config.geocoder_url.as_str(), config.timeout)?;
        let vehicles = ChargetripClient::new(
            config.vehicles_url.as_str(),
            config.chargetrip_client_id.as_str(),
            config.chargetrip_app_id.as_str(),
            config.timeout,
        )?;
        let estimator = EstimatorClient::new(config.estimator_url.as_str(), config.timeout)?;

        let upstreams = vec![
            config.osrm_url.clone(),
            config.stations_url.clone(),
            config.geocoder_url.clone(),
            config.vehicles_url.clone(),
            config.estimator_url.clone(),
        ];

        Ok(Self {
            inner: Arc::new(AppStateInner {
                routes: Arc::new(routes),
                stations: Arc::new(stations),
                geocoder: Arc::new(geocoder),
                vehicles: Arc::new(vehicles),
                estimator: Arc::new(estimator),
                upstreams,
            }),
        })
    }

    /// Assemble state from pre-built collaborators.
    ///
    /// This is the seam used by handler tests to inject deterministic fakes.
    pub fn from_sources(
        routes: Arc<dyn RouteSource>,
        stations: Arc<dyn StationSource>,
        geocoder: Arc<dyn Geocoder>,
        vehicles: Arc<dyn VehicleCatalog>,
        estimator: Arc<dyn TripEstimator>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                routes,
                stations,
                geocoder,
                vehicles,
                estimator,
                upstreams: Vec::new(),
            }),
        }
    }

    pub fn routes(&self) -> &dyn RouteSource {
        self.inner.routes.as_ref()
    }

    pub fn stations(&self) -> &dyn StationSource {
        self.inner.stations.as_ref()
    }

    pub fn geocoder(&self) -> &dyn Geocoder {
        self.inner.geocoder.as_ref()
    }

    pub fn vehicles(&self) -> &dyn VehicleCatalog {
        self.inner.vehicles.as_ref()
    }

    pub fn estimator(&self) -> &dyn TripEstimator {
        self.inner.estimator.as_ref()
    }

    /// Configured upstream base URLs, in provider order.
    pub fn upstreams(&self) -> &[String] {
        &self.inner.upstreams
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("upstreams", &self.inner.upstreams)
            .finish()
    }
}
