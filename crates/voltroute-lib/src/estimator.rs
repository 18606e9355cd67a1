//! Remote trip time/price estimation client.
//!
//! The estimator is an opaque post-processing collaborator: it receives the
//! selected stations' power ratings and the car's charging profile and
//! returns a single number. The planner never consults it; only the HTTP
//! layer forwards requests here after a plan is produced.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default estimation service host, used when no override is configured.
pub const DEFAULT_ESTIMATOR_URL: &str = "https://itineraire-estimator.azurewebsites.net";

/// Charging profile of the car being estimated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarProfile {
    /// Full-recharge time in minutes.
    #[serde(rename = "rechargeTime")]
    pub recharge_time_min: f64,
    /// Vehicle range in kilometers.
    #[serde(rename = "range")]
    pub range_km: f64,
}

/// Trip estimation port.
#[async_trait]
pub trait TripEstimator: Send + Sync {
    /// Total trip time in minutes, charging pauses included.
    async fn total_time(
        &self,
        station_power_kw: &[f64],
        car: &CarProfile,
        drive_time_min: f64,
    ) -> Result<f64>;

    /// Total charging price for the trip.
    async fn total_price(&self, station_power_kw: &[f64], car: &CarProfile) -> Result<f64>;
}

/// HTTP client for the estimation service.
#[derive(Debug, Clone)]
pub struct EstimatorClient {
    http: Client,
    base_url: String,
}

impl EstimatorClient {
    /// Build a client against `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("voltroute/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post_estimate<B: Serialize>(&self, path: &str, body: &B) -> Result<f64> {
        let url = format!("{}{}", self.base_url, path);
        let envelope: EstimateEnvelope = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.value)
    }
}

#[derive(Debug, Serialize)]
struct TimeRequest<'a> {
    stations: &'a [f64],
    car: &'a CarProfile,
    #[serde(rename = "driveTime")]
    drive_time_min: f64,
}

#[derive(Debug, Serialize)]
struct PriceRequest<'a> {
    stations: &'a [f64],
    car: &'a CarProfile,
}

#[derive(Debug, Deserialize)]
struct EstimateEnvelope {
    value: f64,
}

#[async_trait]
impl TripEstimator for EstimatorClient {
    async fn total_time(
        &self,
        station_power_kw: &[f64],
        car: &CarProfile,
        drive_time_min: f64,
    ) -> Result<f64> {
        self.post_estimate(
            "/time",
            &TimeRequest {
                stations: station_power_kw,
                car,
                drive_time_min,
            },
        )
        .await
    }

    async fn total_price(&self, station_power_kw: &[f64], car: &CarProfile) -> Result<f64> {
        self.post_estimate(
            "/price",
            &PriceRequest {
                stations: station_power_kw,
                car,
            },
        )
        .await
    }
}
