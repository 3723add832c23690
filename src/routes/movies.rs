use axum::{extract::State, Json};

use crate::state::AppState;

/// Handler for the movie title list (dropdown data), in table order
pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.table.titles().map(str::to_string).collect())
}
