//! Request types and validation for the HTTP endpoints.
//!
//! Query parameters arrive as raw strings in the original wire format
//! (`lon,lat` coordinates); validation happens here, before any upstream
//! collaborator is contacted.

use serde::{Deserialize, Serialize};

use voltroute_lib::{CarProfile, Coordinate, DEFAULT_RANGE_KM};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Parse a required numeric query parameter.
fn parse_numeric(
    field: &str,
    value: Option<&str>,
    request_id: &str,
) -> Result<f64, Box<ProblemDetails>> {
    let raw = value.ok_or_else(|| {
        Box::new(ProblemDetails::bad_request(
            format!("The '{}' parameter is required", field),
            request_id,
        ))
    })?;

    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            Box::new(ProblemDetails::bad_request(
                format!("The '{}' parameter must be a number", field),
                request_id,
            ))
        })
}

/// Parse a required `lon,lat` query parameter.
fn parse_coordinate(
    field: &str,
    value: Option<&str>,
    request_id: &str,
) -> Result<Coordinate, Box<ProblemDetails>> {
    let raw = value.ok_or_else(|| {
        Box::new(ProblemDetails::bad_request(
            format!("The '{}' parameter is required", field),
            request_id,
        ))
    })?;

    Coordinate::parse_lon_lat(raw).map_err(|e| {
        Box::new(ProblemDetails::bad_request(
            format!("The '{}' parameter is invalid: {}", field, e),
            request_id,
        ))
    })
}

/// Query parameters for the charging-route planning endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingRouteParams {
    /// Start position as `lon,lat`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    /// End position as `lon,lat`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    /// Vehicle range in kilometers.
    #[serde(
        default,
        rename = "carRange",
        skip_serializing_if = "Option::is_none"
    )]
    pub car_range: Option<String>,
}

impl ChargingRouteParams {
    /// Parsed start and end coordinates.
    pub fn coordinates(
        &self,
        request_id: &str,
    ) -> Result<(Coordinate, Coordinate), Box<ProblemDetails>> {
        let start = parse_coordinate("start", self.start.as_deref(), request_id)?;
        let end = parse_coordinate("end", self.end.as_deref(), request_id)?;
        Ok((start, end))
    }

    /// Vehicle range, falling back to the documented default when the
    /// parameter is absent or not a usable number.
    pub fn range_km(&self) -> f64 {
        self.car_range
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(DEFAULT_RANGE_KM)
    }
}

impl Validate for ChargingRouteParams {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.coordinates(request_id).map(|_| ())
    }
}

/// Query parameters for the direct-route endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectRouteParams {
    /// Start position as `lon,lat`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    /// End position as `lon,lat`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl DirectRouteParams {
    /// Parsed start and end coordinates.
    pub fn coordinates(
        &self,
        request_id: &str,
    ) -> Result<(Coordinate, Coordinate), Box<ProblemDetails>> {
        let start = parse_coordinate("start", self.start.as_deref(), request_id)?;
        let end = parse_coordinate("end", self.end.as_deref(), request_id)?;
        Ok((start, end))
    }
}

impl Validate for DirectRouteParams {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.coordinates(request_id).map(|_| ())
    }
}

/// Query parameters for the station-directory endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<String>,

    /// Search radius in kilometers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl StationsParams {
    /// Parsed search center and radius.
    pub fn query(&self, request_id: &str) -> Result<(Coordinate, f64), Box<ProblemDetails>> {
        let lat = parse_numeric("lat", self.lat.as_deref(), request_id)?;
        let lon = parse_numeric("lon", self.lon.as_deref(), request_id)?;
        let range = parse_numeric("range", self.range.as_deref(), request_id)?;

        if range <= 0.0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'range' parameter must be a positive number",
                request_id,
            )));
        }

        Ok((Coordinate::new(lat, lon), range))
    }
}

impl Validate for StationsParams {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.query(request_id).map(|_| ())
    }
}

/// Query parameters for the geocoding endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeParams {
    /// Free-text place query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl GeocodeParams {
    /// The validated query text.
    pub fn query(&self, request_id: &str) -> Result<&str, Box<ProblemDetails>> {
        match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => Ok(q),
            _ => Err(Box::new(ProblemDetails::bad_request(
                "The 'q' parameter is required and cannot be empty",
                request_id,
            ))),
        }
    }
}

impl Validate for GeocodeParams {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.query(request_id).map(|_| ())
    }
}

/// JSON body for the trip time/price estimation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripEstimateBody {
    /// Power ratings (kW) of the charging stations along the trip.
    #[serde(default)]
    pub stations: Vec<f64>,

    /// Charging profile of the car.
    pub car: CarProfile,

    /// Driving time in minutes; required by the time estimate only.
    #[serde(
        default,
        rename = "driveTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub drive_time: Option<f64>,
}

impl TripEstimateBody {
    /// The driving time, required by the time-estimation endpoint.
    pub fn drive_time(&self, request_id: &str) -> Result<f64, Box<ProblemDetails>> {
        self.drive_time
            .filter(|t| t.is_finite() && *t >= 0.0)
            .ok_or_else(|| {
                Box::new(ProblemDetails::bad_request(
                    "The 'driveTime' field is required and must be a non-negative number",
                    request_id,
                ))
            })
    }
}

impl Validate for TripEstimateBody {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if !self.car.range_km.is_finite() || self.car.range_km <= 0.0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'car.range' field must be a positive number",
                request_id,
            )));
        }

        if !self.car.recharge_time_min.is_finite() || self.car.recharge_time_min < 0.0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'car.rechargeTime' field must be a non-negative number",
                request_id,
            )));
        }

        Ok(())
    }
}
