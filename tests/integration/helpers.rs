use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, header},
};
use locator::{
    domain::{
        geo::GeoPoint,
        location::entity::Location,
        route::entity::RouteSummary,
    },
    infrastructure::{
        geocoding::{GeocodeMatch, GeocodingProvider, ProviderError, RoutingProvider},
        locations::CsvLocationRepository,
        lookup::{LookupClient, LookupSettings, RetryPolicy},
    },
    application::{autocomplete::dto::SuggestSettings, find_closest::dto::SearchSettings},
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

pub const RETRY_MAX_ATTEMPTS: usize = 3;

pub const ORIGIN: GeoPoint = GeoPoint {
    latitude: 40.0,
    longitude: -75.0,
};

/// Geocoder answering from a fixed table; unknown text has no match.
#[derive(Default)]
pub struct FakeGeocoder {
    pub places: HashMap<String, GeoPoint>,
    pub suggestions: Vec<String>,
    pub fail_autocomplete: bool,
    pub fail_search: bool,
    pub search_calls: AtomicUsize,
    pub autocomplete_calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn with_place(text: &str, point: GeoPoint) -> Self {
        Self {
            places: HashMap::from([(text.to_string(), point)]),
            ..Self::default()
        }
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn autocompletes(&self) -> usize {
        self.autocomplete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingProvider for FakeGeocoder {
    async fn search(&self, text: &str) -> Result<Vec<GeocodeMatch>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(ProviderError::Service("geocoder down".into()));
        }
        Ok(self
            .places
            .get(text)
            .map(|point| GeocodeMatch {
                label: text.to_string(),
                point: *point,
            })
            .into_iter()
            .collect())
    }

    async fn autocomplete(&self, _text: &str, limit: usize) -> Result<Vec<String>, ProviderError> {
        self.autocomplete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_autocomplete {
            return Err(ProviderError::Service("autocomplete down".into()));
        }
        Ok(self.suggestions.iter().take(limit).cloned().collect())
    }
}

/// Router with canned summaries per destination. Destinations listed in
/// `unroutable` have no route; any other unknown destination fails with a
/// service error.
#[derive(Default)]
pub struct FakeRouter {
    pub routes: Vec<(GeoPoint, RouteSummary)>,
    pub unroutable: Vec<GeoPoint>,
    pub destinations: Mutex<Vec<GeoPoint>>,
}

impl FakeRouter {
    pub fn calls(&self) -> usize {
        self.destinations.lock().unwrap().len()
    }

    pub fn take_destinations(&self) -> Vec<GeoPoint> {
        std::mem::take(&mut *self.destinations.lock().unwrap())
    }
}

#[async_trait]
impl RoutingProvider for FakeRouter {
    async fn directions(&self, _from: GeoPoint, to: GeoPoint) -> Result<RouteSummary, ProviderError> {
        self.destinations.lock().unwrap().push(to);
        if self.unroutable.contains(&to) {
            return Err(ProviderError::NotFound("no route".into()));
        }
        self.routes
            .iter()
            .find(|(point, _)| *point == to)
            .map(|(_, summary)| *summary)
            .ok_or_else(|| ProviderError::Service("routing down".into()))
    }
}

pub struct TestApp {
    pub app: Router,
    pub geocoder: Arc<FakeGeocoder>,
    pub router: Arc<FakeRouter>,
}

/// Two locations north of [`ORIGIN`]: "A" about 1 km away, "B" about 111 km.
pub fn two_locations() -> Vec<Location> {
    vec![
        Location::new("A", "555-0101", 40.01, -75.0),
        Location::new("B", "555-0102", 41.0, -75.0),
    ]
}

fn test_lookup_settings() -> LookupSettings {
    LookupSettings {
        geocode_interval: Duration::ZERO,
        autocomplete_interval: Duration::ZERO,
        routing_interval: Duration::ZERO,
        call_timeout: Duration::from_secs(5),
        retry: RetryPolicy::new(RETRY_MAX_ATTEMPTS as u32, Duration::from_millis(1)),
    }
}

pub fn spawn_app(locations: Vec<Location>, geocoder: FakeGeocoder, router: FakeRouter) -> TestApp {
    let geocoder = Arc::new(geocoder);
    let router = Arc::new(router);
    let lookup = Arc::new(LookupClient::new(
        geocoder.clone(),
        router.clone(),
        test_lookup_settings(),
    ));
    let state = AppState::new(
        Arc::new(CsvLocationRepository::new(locations)),
        lookup,
        SearchSettings::default(),
        SuggestSettings::default(),
    );

    TestApp {
        app: create_router(state),
        geocoder,
        router,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    use tower::ServiceExt;
    app.clone().oneshot(req).await.expect("request failed")
}

pub fn find_closest_request(address: &str) -> Request<Body> {
    raw_find_closest_request(json!({ "address": address }).to_string())
}

pub fn raw_find_closest_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/find-closest")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("failed to build find-closest request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build GET request")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: http::StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}
