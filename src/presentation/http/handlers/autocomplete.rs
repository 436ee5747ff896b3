use crate::{application::autocomplete::dto::AutocompleteQuery, presentation::http::state::AppState};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

/// Always answers 200; failures degrade to an empty list.
pub async fn autocomplete(
    State(state): State<AppState>,
    params: Result<Query<AutocompleteQuery>, QueryRejection>,
) -> Json<Vec<String>> {
    let query = match params {
        Ok(Query(params)) => params.q.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(query_rejection = %rejection.body_text());
            return Json(Vec::new());
        }
    };

    Json(state.suggest.execute(&query).await)
}
