use crate::{domain::location::repository::LocationRepository, presentation::http::state::AppState};
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
    locations: usize,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Drive Time Locator API is running",
        locations: state.locations.len(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
