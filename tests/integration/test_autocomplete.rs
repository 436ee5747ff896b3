use super::helpers::{FakeGeocoder, FakeRouter, expect_status, get, read_json, send, spawn_app};
use axum::http::StatusCode;

fn geocoder() -> FakeGeocoder {
    FakeGeocoder {
        suggestions: vec![
            "Main Street, Springfield, IL, USA".into(),
            "Main Street, Springfield, MA, USA".into(),
        ],
        ..FakeGeocoder::default()
    }
}

#[tokio::test]
async fn short_or_missing_query_returns_empty_without_lookup() {
    let app = spawn_app(Vec::new(), geocoder(), FakeRouter::default());

    for uri in ["/autocomplete", "/autocomplete?q=", "/autocomplete?q=a", "/autocomplete?q=%20%20a%20"] {
        let res = expect_status(send(&app.app, get(uri)).await, StatusCode::OK).await;
        let body: Vec<String> = read_json(res).await;
        assert!(body.is_empty(), "{} should have no suggestions", uri);
    }
    assert_eq!(app.geocoder.autocompletes(), 0);
}

#[tokio::test]
async fn suggestions_are_cached_per_normalized_query() {
    let app = spawn_app(Vec::new(), geocoder(), FakeRouter::default());

    let res = expect_status(send(&app.app, get("/autocomplete?q=Main%20St")).await, StatusCode::OK).await;
    let first: Vec<String> = read_json(res).await;
    assert_eq!(first.len(), 2);

    let res = expect_status(
        send(&app.app, get("/autocomplete?q=%20main%20%20st")).await,
        StatusCode::OK,
    )
    .await;
    let second: Vec<String> = read_json(res).await;

    assert_eq!(first, second);
    assert_eq!(app.geocoder.autocompletes(), 1);
}

#[tokio::test]
async fn provider_failure_degrades_to_empty_and_is_not_cached() {
    let app = spawn_app(
        Vec::new(),
        FakeGeocoder {
            fail_autocomplete: true,
            ..geocoder()
        },
        FakeRouter::default(),
    );

    for _ in 0..2 {
        let res = expect_status(send(&app.app, get("/autocomplete?q=Main")).await, StatusCode::OK).await;
        let body: Vec<String> = read_json(res).await;
        assert!(body.is_empty());
    }
    assert_eq!(app.geocoder.autocompletes(), 2);
}
