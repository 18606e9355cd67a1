//! Request handlers: thin HTTP glue over `voltroute-lib`.
//!
//! Every handler follows the same shape: extract a request ID, validate the
//! input before contacting any collaborator, call the library through the
//! ports held in [`AppState`], and map failures to RFC 9457 problems.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use voltroute_lib::{
    assemble, plan_charging_stops, LineString, Place, PlanRequest, PlannedRoute, Station, Vehicle,
};
use voltroute_service_shared::{
    extract_or_generate_request_id, failure_reason, from_lib_error, record_plan_calculated,
    record_plan_failed, AppState, ChargingRouteParams, DirectRouteParams, GeocodeParams,
    ProblemDetails, ServiceResponse, StationsParams, TripEstimateBody, Validate,
};

/// HTTP response - either success or RFC 9457 error.
pub(crate) enum Response<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

/// Handle `GET /api/v1/route/charging` requests.
pub(crate) async fn charging_route(
    State(state): State<AppState>,
    Query(params): Query<ChargingRouteParams>,
    headers: HeaderMap,
) -> Response<PlannedRoute> {
    let request_id = extract_or_generate_request_id(&headers);

    info!(
        request_id = %request_id,
        start = ?params.start,
        end = ?params.end,
        car_range = ?params.car_range,
        "handling charging-route request"
    );

    let (start, end) = match params.coordinates(request_id.as_str()) {
        Ok(coordinates) => coordinates,
        Err(problem) => {
            record_plan_failed("validation_error");
            return Response::Error(*problem);
        }
    };
    let request = PlanRequest::new(start, end, params.range_km());

    // The planner polls the token at each iteration; dropping this handler
    // future abandons the plan either way.
    let cancel = CancellationToken::new();

    let plan = match plan_charging_stops(state.routes(), state.stations(), &request, &cancel).await
    {
        Ok(plan) => plan,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "charging-route planning failed");
            record_plan_failed(failure_reason(&e));
            return Response::Error(from_lib_error(&e, request_id.as_str()));
        }
    };

    let stops = plan.stop_count();
    let route = match assemble(state.routes(), plan).await {
        Ok(route) => route,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "final route assembly failed");
            record_plan_failed(failure_reason(&e));
            return Response::Error(from_lib_error(&e, request_id.as_str()));
        }
    };

    record_plan_calculated(stops);
    info!(
        request_id = %request_id,
        stops,
        distance_m = route.distance,
        "charging route computed"
    );

    Response::Success(ServiceResponse::new(route))
}

/// Direct route response returned to the caller.
#[derive(Debug, Serialize)]
pub(crate) struct DirectRouteResponse {
    /// Route geometry.
    geometry: LineString,
    /// Total distance in meters.
    distance: f64,
    /// Total driving duration in seconds.
    duration: f64,
}

/// Handle `GET /api/v1/route` requests.
pub(crate) async fn direct_route(
    State(state): State<AppState>,
    Query(params): Query<DirectRouteParams>,
    headers: HeaderMap,
) -> Response<DirectRouteResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let (start, end) = match params.coordinates(request_id.as_str()) {
        Ok(coordinates) => coordinates,
        Err(problem) => return Response::Error(*problem),
    };

    match state.routes().route(&[start, end]).await {
        Ok(metrics) => Response::Success(ServiceResponse::new(DirectRouteResponse {
            geometry: metrics.geometry,
            distance: metrics.distance_m,
            duration: metrics.duration_s,
        })),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "direct route query failed");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Station directory response returned to the caller.
#[derive(Debug, Serialize)]
pub(crate) struct StationsResponse {
    stations: Vec<Station>,
}

/// Handle `GET /api/v1/stations` requests.
pub(crate) async fn stations(
    State(state): State<AppState>,
    Query(params): Query<StationsParams>,
    headers: HeaderMap,
) -> Response<StationsResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let (center, range_km) = match params.query(request_id.as_str()) {
        Ok(query) => query,
        Err(problem) => return Response::Error(*problem),
    };

    match state.stations().stations_near(center, range_km).await {
        Ok(stations) => Response::Success(ServiceResponse::new(StationsResponse { stations })),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "station directory query failed");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Geocoding response returned to the caller.
#[derive(Debug, Serialize)]
pub(crate) struct GeocodeResponse {
    places: Vec<Place>,
}

/// Handle `GET /api/v1/geocode` requests.
pub(crate) async fn geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
    headers: HeaderMap,
) -> Response<GeocodeResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let query = match params.query(request_id.as_str()) {
        Ok(query) => query,
        Err(problem) => return Response::Error(*problem),
    };

    match state.geocoder().search(query).await {
        Ok(places) => Response::Success(ServiceResponse::new(GeocodeResponse { places })),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "geocoder query failed");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Vehicle catalog response returned to the caller.
#[derive(Debug, Serialize)]
pub(crate) struct VehiclesResponse {
    vehicles: Vec<Vehicle>,
}

/// Handle `GET /api/v1/vehicles` requests.
pub(crate) async fn vehicles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response<VehiclesResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    match state.vehicles().vehicles().await {
        Ok(vehicles) => Response::Success(ServiceResponse::new(VehiclesResponse { vehicles })),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "vehicle catalog query failed");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Trip time estimate returned to the caller.
#[derive(Debug, Serialize)]
pub(crate) struct TripTimeResponse {
    /// Total trip time in minutes, charging pauses included.
    minutes: f64,
}

/// Handle `POST /api/v1/trip/time` requests.
pub(crate) async fn trip_time(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TripEstimateBody>,
) -> Response<TripTimeResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    if let Err(problem) = body.validate(request_id.as_str()) {
        return Response::Error(*problem);
    }
    let drive_time = match body.drive_time(request_id.as_str()) {
        Ok(drive_time) => drive_time,
        Err(problem) => return Response::Error(*problem),
    };

    match state
        .estimator()
        .total_time(&body.stations, &body.car, drive_time)
        .await
    {
        Ok(minutes) => Response::Success(ServiceResponse::new(TripTimeResponse { minutes })),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "trip time estimation failed");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Trip price estimate returned to the caller.
#[derive(Debug, Serialize)]
pub(crate) struct TripPriceResponse {
    /// Total charging price for the trip.
    price: f64,
}

/// Handle `POST /api/v1/trip/price` requests.
pub(crate) async fn trip_price(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TripEstimateBody>,
) -> Response<TripPriceResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    if let Err(problem) = body.validate(request_id.as_str()) {
        return Response::Error(*problem);
    }

    match state.estimator().total_price(&body.stations, &body.car).await {
        Ok(price) => Response::Success(ServiceResponse::new(TripPriceResponse { price })),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "trip price estimation failed");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}
