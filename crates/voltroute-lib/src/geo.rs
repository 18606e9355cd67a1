//! Geographic value types shared by the planner and the provider clients.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Micro-degree scale used when rounding coordinates into [`CoordKey`]s.
const KEY_SCALE: f64 = 1_000_000.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse the `lon,lat` wire format used by the HTTP API and by OSRM.
    pub fn parse_lon_lat(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate {
            value: value.to_string(),
        };

        let (lon, lat) = value.split_once(',').ok_or_else(invalid)?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;

        if !lon.is_finite() || !lat.is_finite() || lon.abs() > 180.0 || lat.abs() > 90.0 {
            return Err(invalid());
        }

        Ok(Self { lat, lon })
    }

    /// Rounded key for visited-set membership.
    ///
    /// Micro-degree rounding (~0.1 m) deduplicates stations whose
    /// coordinates differ only by provider formatting noise.
    pub fn key(self) -> CoordKey {
        CoordKey {
            lat_udeg: (self.lat * KEY_SCALE).round() as i64,
            lon_udeg: (self.lon * KEY_SCALE).round() as i64,
        }
    }

    /// `(lon, lat)` in radians, for flat-plane heading math.
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.lon.to_radians(), self.lat.to_radians())
    }
}

impl fmt::Display for Coordinate {
    /// Formats as `lon,lat`, matching [`Coordinate::parse_lon_lat`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// Structured, rounded coordinate key.
///
/// Replaces string-concatenated keys so that set membership cannot be
/// defeated by formatting differences between provider responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat_udeg: i64,
    lon_udeg: i64,
}

/// GeoJSON-shaped line geometry as returned by the routing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lon, lat]` pairs in path order.
    pub coordinates: Vec<[f64; 2]>,
}

impl LineString {
    pub fn new(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            kind: "LineString".to_string(),
            coordinates,
        }
    }
}
