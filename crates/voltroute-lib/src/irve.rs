//! OpenDataSoft IRVE charging-station directory client.
//!
//! Implements [`StationSource`] against the public IRVE dataset
//! (`bornes-irve`) search API. The provider mixes numeric and string
//! encodings for its numeric fields, so decoding goes through the raw field
//! map; records without usable coordinates or distance are dropped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::geo::Coordinate;
use crate::sources::{Station, StationSource};

/// Public OpenDataSoft portal hosting the IRVE dataset.
pub const DEFAULT_STATIONS_URL: &str = "https://odre.opendatasoft.com";

const STATIONS_DATASET: &str = "bornes-irve";
const MAX_ROWS: &str = "10000";

/// HTTP client for the IRVE station directory.
#[derive(Debug, Clone)]
pub struct IrveClient {
    http: Client,
    base_url: String,
}

impl IrveClient {
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
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    records: Vec<IrveRecord>,
}

#[derive(Debug, Deserialize)]
struct IrveRecord {
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Read a numeric field that the provider may encode as number or string.
fn numeric_field(fields: &Map<String, Value>, name: &str) -> Option<f64> {
    match fields.get(name)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn station_from_record(record: IrveRecord) -> Option<Station> {
    let fields = record.fields;
    let lat = numeric_field(&fields, "ylatitude")?;
    let lon = numeric_field(&fields, "xlongitude")?;
    let distance_m = numeric_field(&fields, "dist")?;
    let power_kw = numeric_field(&fields, "puiss_max").unwrap_or(0.0);

    Some(Station {
        coordinate: Coordinate::new(lat, lon),
        distance_m,
        power_kw,
        attributes: fields,
    })
}

#[async_trait]
impl StationSource for IrveClient {
    async fn stations_near(&self, center: Coordinate, radius_km: f64) -> Result<Vec<Station>> {
        let url = format!("{}/api/records/1.0/search/", self.base_url);
        let geofilter = format!("{},{},{}", center.lat, center.lon, radius_km * 1000.0);

        let envelope: SearchEnvelope = self
            .http
            .get(&url)
            .query(&[
                ("dataset", STATIONS_DATASET),
                ("geofilter.distance", geofilter.as_str()),
                ("rows", MAX_ROWS),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let total = envelope.records.len();
        let stations: Vec<Station> = envelope
            .records
            .into_iter()
            .filter_map(station_from_record)
            .collect();
        if stations.len() < total {
            tracing::debug!(
                dropped = total - stations.len(),
                "dropped station records without usable coordinates"
            );
        }

        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> IrveRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_string_encoded_fields() {
        let station = station_from_record(record(
            r#"{"fields": {
                "ylatitude": "43.2961743",
                "xlongitude": "5.3699525",
                "dist": "128432.5",
                "puiss_max": "22.0",
                "n_station": "PARKING DU PORT"
            }}"#,
        ))
        .expect("usable record");

        assert_eq!(station.coordinate.lat, 43.2961743);
        assert_eq!(station.distance_m, 128432.5);
        assert_eq!(station.power_kw, 22.0);
        assert_eq!(
            station.attributes.get("n_station").and_then(Value::as_str),
            Some("PARKING DU PORT")
        );
    }

    #[test]
    fn decodes_numeric_fields() {
        let station = station_from_record(record(
            r#"{"fields": {"ylatitude": 43.29, "xlongitude": 5.36, "dist": 1000, "puiss_max": 50}}"#,
        ))
        .expect("usable record");

        assert_eq!(station.distance_m, 1000.0);
        assert_eq!(station.power_kw, 50.0);
    }

    #[test]
    fn drops_records_without_coordinates() {
        assert!(station_from_record(record(r#"{"fields": {"dist": "1000"}}"#)).is_none());
        assert!(station_from_record(record(
            r#"{"fields": {"ylatitude": "abc", "xlongitude": "5.36", "dist": "1000"}}"#
        ))
        .is_none());
    }

    #[test]
    fn missing_power_defaults_to_zero() {
        let station = station_from_record(record(
            r#"{"fields": {"ylatitude": 43.29, "xlongitude": 5.36, "dist": 1000}}"#,
        ))
        .expect("usable record");
        assert_eq!(station.power_kw, 0.0);
    }
}
