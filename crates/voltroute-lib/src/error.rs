use thiserror::Error;

/// Convenient result alias for the voltroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a coordinate string does not parse as `lon,lat`.
    #[error("invalid coordinate {value:?}; expected \"lon,lat\" in decimal degrees")]
    InvalidCoordinate { value: String },

    /// Raised when the station directory returns no stations near a waypoint.
    #[error("no charging stations within {radius_km} km of {lon},{lat}")]
    NoStationsNearby { lat: f64, lon: f64, radius_km: f64 },

    /// Raised when candidates exist but none is unvisited and aligned with
    /// the destination.
    #[error("no unvisited charging station aligned with the destination near {lon},{lat}")]
    NoAlignedStation { lat: f64, lon: f64 },

    /// Raised when the routing provider returns an empty route list.
    #[error("routing provider returned no route")]
    EmptyRoute,

    /// Raised when both travel vectors of a heading computation collapse to
    /// zero length and no angle is defined.
    #[error("degenerate travel vectors; heading angle is undefined")]
    DegenerateHeading,

    /// Raised when the caller cancels a plan in flight.
    #[error("route planning was cancelled")]
    Cancelled,

    /// Wrapper for HTTP client errors (transport, status, or decode).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
