use super::helpers::{
    FakeGeocoder, FakeRouter, ORIGIN, RETRY_MAX_ATTEMPTS, expect_status, find_closest_request, raw_find_closest_request,
    read_json, send, spawn_app, two_locations,
};
use axum::http::StatusCode;
use locator::domain::{
    geo::{GeoPoint, haversine_km},
    location::entity::Location,
    route::entity::RouteSummary,
};
use serde_json::Value;

const ADDRESS: &str = "1 Main St, Springfield";

fn point(latitude: f64, longitude: f64) -> GeoPoint {
    GeoPoint {
        latitude,
        longitude,
    }
}

fn routed_router() -> FakeRouter {
    FakeRouter {
        routes: vec![
            (
                point(40.01, -75.0),
                RouteSummary {
                    distance_km: 1.2,
                    duration_minutes: 2.0,
                },
            ),
            (
                point(41.0, -75.0),
                RouteSummary {
                    distance_km: 111.0,
                    duration_minutes: 90.0,
                },
            ),
        ],
        ..FakeRouter::default()
    }
}

#[tokio::test]
async fn returns_locations_ranked_by_drive_time() {
    let app = spawn_app(
        two_locations(),
        FakeGeocoder::with_place(ADDRESS, ORIGIN),
        routed_router(),
    );

    let res = expect_status(send(&app.app, find_closest_request(ADDRESS)).await, StatusCode::OK).await;
    assert!(res.headers().contains_key("x-request-id"));
    let body: Vec<Value> = read_json(res).await;

    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["name"], "A");
    assert_eq!(body[0]["phone"], "555-0101");
    assert_eq!(body[0]["drive_time"], 2.0);
    assert_eq!(body[0]["distance_km"], 1.2);
    assert_eq!(body[0]["source"], "routed");
    assert_eq!(body[1]["name"], "B");
    assert_eq!(body[1]["drive_time"], 90.0);
    assert_eq!(body[1]["distance_km"], 111.0);
    assert_eq!(app.geocoder.searches(), 1);
    assert_eq!(app.router.calls(), 2);
}

#[tokio::test]
async fn blank_address_is_rejected_before_any_lookup() {
    let app = spawn_app(
        two_locations(),
        FakeGeocoder::with_place(ADDRESS, ORIGIN),
        routed_router(),
    );

    for req in [
        find_closest_request(""),
        find_closest_request("   "),
        raw_find_closest_request("{}"),
        raw_find_closest_request("{not json"),
    ] {
        let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
        let body: Value = read_json(res).await;
        assert!(body["error"].is_string());
    }

    assert_eq!(app.geocoder.searches(), 0);
    assert_eq!(app.router.calls(), 0);
}

#[tokio::test]
async fn unknown_address_is_not_found_without_routing() {
    let app = spawn_app(
        two_locations(),
        FakeGeocoder::with_place(ADDRESS, ORIGIN),
        routed_router(),
    );

    let res = expect_status(
        send(&app.app, find_closest_request("Nowhere Lane")).await,
        StatusCode::NOT_FOUND,
    )
    .await;
    let body: Value = read_json(res).await;
    assert!(body["error"].is_string());

    // no match is terminal, so the geocoder is asked once
    assert_eq!(app.geocoder.searches(), 1);
    assert_eq!(app.router.calls(), 0);
}

#[tokio::test]
async fn routing_failure_falls_back_to_straight_line_estimate() {
    let app = spawn_app(
        two_locations(),
        FakeGeocoder::with_place(ADDRESS, ORIGIN),
        FakeRouter::default(),
    );

    let res = expect_status(send(&app.app, find_closest_request(ADDRESS)).await, StatusCode::OK).await;
    let body: Vec<Value> = read_json(res).await;

    assert_eq!(body.len(), 2);
    for (item, dest) in body.iter().zip([point(40.01, -75.0), point(41.0, -75.0)]) {
        let km = haversine_km(&ORIGIN, &dest);
        let minutes = km / 80.0 * 60.0;
        assert_eq!(item["source"], "approximated");
        assert_eq!(item["distance_km"], (km * 100.0).round() / 100.0);
        assert_eq!(item["drive_time"], (minutes * 10.0).round() / 10.0);
    }
    assert_eq!(body[0]["name"], "A");
}

#[tokio::test]
async fn locations_outside_radius_yield_empty_list() {
    let far_away = point(-33.9, 151.2);
    let app = spawn_app(
        two_locations(),
        FakeGeocoder::with_place(ADDRESS, far_away),
        routed_router(),
    );

    let res = expect_status(send(&app.app, find_closest_request(ADDRESS)).await, StatusCode::OK).await;
    let body: Vec<Value> = read_json(res).await;
    assert!(body.is_empty());
    assert_eq!(app.router.calls(), 0);
}

#[tokio::test]
async fn repeated_searches_route_the_same_candidates() {
    let app = spawn_app(
        two_locations(),
        FakeGeocoder::with_place(ADDRESS, ORIGIN),
        routed_router(),
    );

    expect_status(send(&app.app, find_closest_request(ADDRESS)).await, StatusCode::OK).await;
    let first = app.router.take_destinations();
    expect_status(send(&app.app, find_closest_request(ADDRESS)).await, StatusCode::OK).await;
    let second = app.router.take_destinations();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn geocoder_outage_is_a_server_error_after_retries() {
    let app = spawn_app(
        two_locations(),
        FakeGeocoder {
            fail_search: true,
            ..FakeGeocoder::with_place(ADDRESS, ORIGIN)
        },
        routed_router(),
    );

    let res = expect_status(
        send(&app.app, find_closest_request(ADDRESS)).await,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    let body: Value = read_json(res).await;
    assert!(body["error"].is_string());

    assert_eq!(app.geocoder.searches(), RETRY_MAX_ATTEMPTS);
    assert_eq!(app.router.calls(), 0);
}

#[tokio::test]
async fn unroutable_candidate_is_approximated_alongside_routed_ones() {
    let b = point(41.0, -75.0);
    let app = spawn_app(
        two_locations(),
        FakeGeocoder::with_place(ADDRESS, ORIGIN),
        FakeRouter {
            unroutable: vec![b],
            ..routed_router()
        },
    );

    let res = expect_status(send(&app.app, find_closest_request(ADDRESS)).await, StatusCode::OK).await;
    let body: Vec<Value> = read_json(res).await;

    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["name"], "A");
    assert_eq!(body[0]["source"], "routed");
    assert_eq!(body[1]["name"], "B");
    assert_eq!(body[1]["source"], "approximated");
    let minutes = haversine_km(&ORIGIN, &b) / 80.0 * 60.0;
    assert_eq!(body[1]["drive_time"], (minutes * 10.0).round() / 10.0);

    // no route is terminal, so each candidate is asked once
    assert_eq!(app.router.calls(), 2);
}

#[tokio::test]
async fn returns_at_most_top_k_nearest() {
    let locations: Vec<Location> = (1..=8)
        .map(|i| Location::new(format!("L{}", i), "", 40.0 + (i as f64) * 0.1, -75.0))
        .collect();
    let app = spawn_app(
        locations,
        FakeGeocoder::with_place(ADDRESS, ORIGIN),
        FakeRouter::default(),
    );

    let res = expect_status(send(&app.app, find_closest_request(ADDRESS)).await, StatusCode::OK).await;
    let body: Vec<Value> = read_json(res).await;

    let names: Vec<&str> = body.iter().filter_map(|item| item["name"].as_str()).collect();
    assert_eq!(names, ["L1", "L2", "L3", "L4", "L5"]);
    assert!(body.iter().all(|item| item["source"] == "approximated"));
}
