//! Nominatim place-name geocoding client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Public Nominatim instance, used when no override is configured.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// A geocoded place candidate.
///
/// The provider returns coordinates as strings; they are passed through
/// untouched since consumers feed them straight back into route queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresstype: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub address: serde_json::Value,
}

/// Place-name search port.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidate places matching a free-text query, best first.
    async fn search(&self, query: &str) -> Result<Vec<Place>>;
}

/// HTTP client for a Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: Client,
    base_url: String,
}

impl NominatimClient {
    /// Build a client against `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        // Nominatim's usage policy requires an identifying user agent.
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("voltroute/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<Place>> {
        let url = format!("{}/search", self.base_url);

        let places: Vec<Place> = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("addressdetails", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(query, matches = places.len(), "geocoder query complete");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_provider_response() {
        let json = r#"[{
            "place_id": 75345615,
            "lat": "43.2961743",
            "lon": "5.3699525",
            "name": "Marseille",
            "display_name": "Marseille, Bouches-du-Rhône, France",
            "addresstype": "city",
            "address": {"city": "Marseille", "country_code": "fr"}
        }]"#;

        let places: Vec<Place> = serde_json::from_str(json).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].lat, "43.2961743");
        assert_eq!(places[0].addresstype.as_deref(), Some("city"));
        assert_eq!(places[0].address["country_code"], "fr");
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let places: Vec<Place> = serde_json::from_str(
            r#"[{"display_name": "Somewhere", "lat": "1.0", "lon": "2.0"}]"#,
        )
        .unwrap();
        assert!(places[0].name.is_none());
        assert!(places[0].address.is_null());
    }
}
