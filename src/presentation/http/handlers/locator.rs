use crate::{
    application::find_closest::dto::{ClosestLocation, FindClosestRequest},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

pub async fn find_closest(
    State(state): State<AppState>,
    payload: Result<Json<FindClosestRequest>, JsonRejection>,
) -> Result<Json<Vec<ClosestLocation>>, AppError> {
    let Json(body) = payload?;
    let address = body.address.unwrap_or_default();

    let results = state.find_closest.execute(&address).await?;

    Ok(Json(results.into_iter().map(ClosestLocation::from).collect()))
}
