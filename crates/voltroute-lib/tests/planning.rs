use tokio_util::sync::CancellationToken;

use voltroute_lib::{plan_charging_stops, Error, PlanRequest};

mod common;
use common::{station, FixedRoutes, ScriptedStations, MARSEILLE, PARIS};

fn request(range_km: f64) -> PlanRequest {
    PlanRequest::new(PARIS, MARSEILLE, range_km)
}

#[tokio::test]
async fn no_stops_needed_when_range_covers_direct_distance() {
    let routes = FixedRoutes::new(660_000.0, 23_760.0);
    let stations = ScriptedStations::new(vec![]);

    let plan = plan_charging_stops(&routes, &stations, &request(700.0), &CancellationToken::new())
        .await
        .expect("direct route fits within range");

    assert_eq!(plan.waypoints, vec![PARIS, MARSEILLE]);
    assert!(plan.stations.is_empty());
    assert_eq!(plan.stop_count(), 0);
    assert_eq!(stations.query_count(), 0);
}

#[tokio::test]
async fn selects_aligned_station_over_farther_misaligned_one() {
    // 660 km direct with a 450 km range: one stop needed. The directory
    // offers an on-heading charger 300 km out and an off-heading one 350 km
    // out; the aligned one must win despite being nearer.
    let routes = FixedRoutes::new(660_000.0, 23_760.0);
    let aligned = station(46.352715, 3.70812, 300_000.0);
    let misaligned = station(49.9, 0.8, 350_000.0);
    let stations = ScriptedStations::new(vec![vec![misaligned, aligned.clone()]]);

    let plan = plan_charging_stops(&routes, &stations, &request(450.0), &CancellationToken::new())
        .await
        .expect("plan with one stop");

    assert_eq!(plan.waypoints.len(), 3);
    assert_eq!(plan.waypoints[0], PARIS);
    assert_eq!(plan.waypoints[1], aligned.coordinate);
    assert_eq!(plan.waypoints[2], MARSEILLE);
    assert_eq!(plan.stations.len(), plan.waypoints.len() - 2);
}

#[tokio::test]
async fn empty_candidate_set_fails_without_further_route_queries() {
    let routes = FixedRoutes::new(660_000.0, 23_760.0);
    let stations = ScriptedStations::new(vec![vec![]]);

    let error = plan_charging_stops(&routes, &stations, &request(450.0), &CancellationToken::new())
        .await
        .expect_err("no stations anywhere");

    assert!(matches!(error, Error::NoStationsNearby { .. }));
    // Only the initial direct-route query was issued.
    assert_eq!(routes.call_count(), 1);
}

#[tokio::test]
async fn all_candidates_misaligned_fails_with_typed_error() {
    let routes = FixedRoutes::new(660_000.0, 23_760.0);
    let stations = ScriptedStations::new(vec![vec![station(49.9, 0.8, 350_000.0)]]);

    let error = plan_charging_stops(&routes, &stations, &request(450.0), &CancellationToken::new())
        .await
        .expect_err("nothing aligned");

    assert!(matches!(error, Error::NoAlignedStation { .. }));
}

#[tokio::test]
async fn visited_station_is_skipped_even_when_nominally_farthest() {
    // 900 km direct with a 300 km range: three stops needed. The second
    // query re-reports the first charger with sub-microdegree formatting
    // noise; it must be excluded even though it sorts first.
    let routes = FixedRoutes::new(900_000.0, 32_400.0);
    let first = station(47.18631, 3.25488, 260_000.0);
    let first_echo = station(47.186310000001, 3.254879999999, 260_000.0);
    let second = station(45.796985, 4.01028, 200_000.0);
    let third = station(44.40766, 4.76568, 200_000.0);
    let stations = ScriptedStations::new(vec![
        vec![first.clone()],
        vec![first_echo, second.clone()],
        vec![third.clone()],
    ]);

    let plan = plan_charging_stops(&routes, &stations, &request(300.0), &CancellationToken::new())
        .await
        .expect("three-stop plan");

    assert_eq!(plan.waypoints.len(), 5);
    assert_eq!(plan.waypoints[1], first.coordinate);
    assert_eq!(plan.waypoints[2], second.coordinate);
    assert_eq!(plan.waypoints[3], third.coordinate);
    assert_eq!(plan.stations.len(), 3);
    assert_eq!(stations.query_count(), 3);
}

#[tokio::test]
async fn interior_waypoints_are_pairwise_distinct() {
    let routes = FixedRoutes::new(900_000.0, 32_400.0);
    let stations = ScriptedStations::new(vec![
        vec![station(47.18631, 3.25488, 260_000.0)],
        vec![station(45.796985, 4.01028, 200_000.0)],
        vec![station(44.40766, 4.76568, 200_000.0)],
    ]);

    let plan = plan_charging_stops(&routes, &stations, &request(300.0), &CancellationToken::new())
        .await
        .expect("three-stop plan");

    let interior = &plan.waypoints[1..plan.waypoints.len() - 1];
    for (i, a) in interior.iter().enumerate() {
        for b in &interior[i + 1..] {
            assert_ne!(a.key(), b.key());
        }
    }
}

#[tokio::test]
async fn identical_inputs_produce_identical_plans() {
    let batches = || {
        vec![
            vec![
                station(49.9, 0.8, 350_000.0),
                station(46.352715, 3.70812, 300_000.0),
            ],
            vec![station(44.40766, 4.76568, 200_000.0)],
        ]
    };

    let routes = FixedRoutes::new(800_000.0, 28_800.0);
    let first_run = plan_charging_stops(
        &routes,
        &ScriptedStations::new(batches()),
        &request(350.0),
        &CancellationToken::new(),
    )
    .await
    .expect("first run");

    let second_run = plan_charging_stops(
        &routes,
        &ScriptedStations::new(batches()),
        &request(350.0),
        &CancellationToken::new(),
    )
    .await
    .expect("second run");

    assert_eq!(first_run.waypoints, second_run.waypoints);
    let coords = |plan: &voltroute_lib::ChargingPlan| {
        plan.stations
            .iter()
            .map(|s| s.coordinate)
            .collect::<Vec<_>>()
    };
    assert_eq!(coords(&first_run), coords(&second_run));
}

#[tokio::test]
async fn cancellation_is_observed_before_searching() {
    let routes = FixedRoutes::new(660_000.0, 23_760.0);
    let stations = ScriptedStations::new(vec![vec![station(46.352715, 3.70812, 300_000.0)]]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let error = plan_charging_stops(&routes, &stations, &request(450.0), &cancel)
        .await
        .expect_err("cancelled before the first search");

    assert!(matches!(error, Error::Cancelled));
    assert_eq!(stations.query_count(), 0);
}
