use super::{
    handlers::{autocomplete, health, locator},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(health::health_check))
        .route("/health", get(health::health_check))
        // Search
        .route("/find-closest", post(locator::find_closest))
        .route("/autocomplete", get(autocomplete::autocomplete))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
