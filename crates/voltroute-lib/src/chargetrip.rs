//! Chargetrip vehicle catalog client (GraphQL).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Public Chargetrip API host, used when no override is configured.
pub const DEFAULT_VEHICLES_URL: &str = "https://api.chargetrip.io";

/// Fixed catalog query: the frontend needs naming, worst-case range,
/// connector charge times, and a thumbnail per vehicle.
const VEHICLE_LIST_QUERY: &str = r#"
query {
  vehicleList(page: 0, size: 50, search: "") {
    id
    naming {
      make
      model
      chargetrip_version
    }
    range {
      chargetrip_range {
        worst
      }
    }
    connectors {
      time
    }
    media {
      image {
        thumbnail_url
      }
    }
  }
}
"#;

/// An electric vehicle as described by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub naming: VehicleNaming,
    pub range: VehicleRange,
    #[serde(default)]
    pub connectors: Vec<VehicleConnector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<VehicleMedia>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleNaming {
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chargetrip_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRange {
    pub chargetrip_range: WorstCaseRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorstCaseRange {
    /// Worst-case range in kilometers.
    pub worst: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConnector {
    /// Full-charge time in minutes on this connector.
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<VehicleImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Vehicle catalog port.
#[async_trait]
pub trait VehicleCatalog: Send + Sync {
    /// The catalog's current vehicle list.
    async fn vehicles(&self) -> Result<Vec<Vehicle>>;
}

/// HTTP client for the Chargetrip GraphQL API.
#[derive(Debug, Clone)]
pub struct ChargetripClient {
    http: Client,
    base_url: String,
    client_id: String,
    app_id: String,
}

impl ChargetripClient {
    /// Build a client against `base_url` authenticating with the given
    /// Chargetrip client and app identifiers.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        app_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("voltroute/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            app_id: app_id.into(),
        })
    }
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    data: VehicleListData,
}

#[derive(Debug, Deserialize)]
struct VehicleListData {
    #[serde(rename = "vehicleList", default)]
    vehicle_list: Vec<Vehicle>,
}

#[async_trait]
impl VehicleCatalog for ChargetripClient {
    async fn vehicles(&self) -> Result<Vec<Vehicle>> {
        let url = format!("{}/graphql", self.base_url);

        let envelope: GraphqlEnvelope = self
            .http
            .post(&url)
            .header("x-client-id", &self.client_id)
            .header("x-app-id", &self.app_id)
            .json(&GraphqlRequest {
                query: VEHICLE_LIST_QUERY,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(envelope.data.vehicle_list)
    }
}
