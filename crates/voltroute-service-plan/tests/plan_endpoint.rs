//! Endpoint tests against a mock application state.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use voltroute_service_shared::test_utils::{mock_state, station};

fn server(state: voltroute_service_shared::AppState) -> TestServer {
    TestServer::new(voltroute_service_plan::app(state)).expect("router builds")
}

#[tokio::test]
async fn missing_start_is_a_client_error() {
    let server = server(mock_state(660_000.0, 23_760.0, vec![]));

    let response = server
        .get("/api/v1/route/charging")
        .add_query_param("end", "5.3699525,43.2961743")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let problem: Value = response.json();
    assert_eq!(problem["type"], "/problems/invalid-request");
    assert!(problem["detail"].as_str().unwrap().contains("'start'"));
}

#[tokio::test]
async fn malformed_start_is_a_client_error() {
    let server = server(mock_state(660_000.0, 23_760.0, vec![]));

    let response = server
        .get("/api/v1/route/charging")
        .add_query_param("start", "not-a-coordinate")
        .add_query_param("end", "5.3699525,43.2961743")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn plans_single_stop_route() {
    let state = mock_state(
        660_000.0,
        23_760.0,
        vec![vec![station(46.352715, 3.70812, 300_000.0)]],
    );
    let server = server(state);

    let response = server
        .get("/api/v1/route/charging")
        .add_query_param("start", "2.3484,48.8535")
        .add_query_param("end", "5.37,43.2962")
        .add_query_param("carRange", "450")
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();

    let labels: Vec<&str> = body["waypoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["departure", "station 1", "arrival"]);

    // Top-level totals report the direct route.
    assert_eq!(body["time"], 23_760.0);
    assert_eq!(body["distance"], 660_000.0);
    assert_eq!(body["stations"].as_array().unwrap().len(), 1);
    assert_eq!(body["geometry"]["type"], "LineString");
}

#[tokio::test]
async fn empty_directory_maps_to_safe_not_found() {
    // Range below the direct distance with no stations anywhere.
    let server = server(mock_state(660_000.0, 23_760.0, vec![vec![]]));

    let response = server
        .get("/api/v1/route/charging")
        .add_query_param("start", "2.3484,48.8535")
        .add_query_param("end", "5.37,43.2962")
        .add_query_param("carRange", "450")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let problem: Value = response.json();
    assert_eq!(problem["type"], "/problems/charging-route-not-found");
    // The public detail never echoes coordinates or provider payloads.
    assert!(!problem["detail"].as_str().unwrap().contains("48.85"));
}

#[tokio::test]
async fn invalid_car_range_falls_back_to_default() {
    // With the 100 km default range and a 660 km direct distance the
    // planner needs stations; an empty directory proves the default kicked
    // in rather than the request failing validation.
    let server = server(mock_state(660_000.0, 23_760.0, vec![vec![]]));

    let response = server
        .get("/api/v1/route/charging")
        .add_query_param("start", "2.3484,48.8535")
        .add_query_param("end", "5.37,43.2962")
        .add_query_param("carRange", "not-a-number")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn direct_route_reports_provider_metrics() {
    let server = server(mock_state(771_905.5, 29_540.0, vec![]));

    let response = server
        .get("/api/v1/route")
        .add_query_param("start", "2.3483915,48.8534951")
        .add_query_param("end", "5.3699525,43.2961743")
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["distance"], 771_905.5);
    assert_eq!(body["duration"], 29_540.0);
    assert_eq!(body["geometry"]["coordinates"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn stations_endpoint_requires_all_parameters() {
    let server = server(mock_state(0.0, 0.0, vec![]));

    let response = server
        .get("/api/v1/stations")
        .add_query_param("lat", "48.85")
        .add_query_param("lon", "2.34")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let problem: Value = response.json();
    assert!(problem["detail"].as_str().unwrap().contains("'range'"));
}

#[tokio::test]
async fn vehicles_endpoint_returns_catalog() {
    let server = server(mock_state(0.0, 0.0, vec![]));

    let response = server.get("/api/v1/vehicles").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert!(body["vehicles"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn trip_time_requires_drive_time() {
    let server = server(mock_state(0.0, 0.0, vec![]));

    let response = server
        .post("/api/v1/trip/time")
        .json(&serde_json::json!({
            "stations": [22.0, 50.0],
            "car": {"rechargeTime": 45.0, "range": 277.0}
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let problem: Value = response.json();
    assert!(problem["detail"].as_str().unwrap().contains("'driveTime'"));
}

#[tokio::test]
async fn trip_price_estimates_from_body() {
    let server = server(mock_state(0.0, 0.0, vec![]));

    let response = server
        .post("/api/v1/trip/price")
        .json(&serde_json::json!({
            "stations": [22.0, 50.0],
            "car": {"rechargeTime": 45.0, "range": 277.0}
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["price"], 0.0);
}

#[tokio::test]
async fn health_live_reports_ok() {
    let server = server(mock_state(0.0, 0.0, vec![]));

    let response = server.get("/health/live").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn health_ready_lists_upstreams_field() {
    let server = server(mock_state(0.0, 0.0, vec![]));

    let response = server.get("/health/ready").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
