use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::TmdbId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

/// One similar movie, with the poster the strip would show
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub tmdb_id: TmdbId,
    pub poster_url: Option<String>,
}

/// Handler for the similar-movies endpoint.
///
/// Returns up to 5 distinct similar titles in ascending-distance order,
/// 404 when the queried title is not in the table.
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Query title cannot be empty".to_string(),
        ));
    }

    let recommendations = state.recommender.recommend(&params.title)?;

    let mut response = Vec::with_capacity(recommendations.len());
    for rec in recommendations {
        let poster_url = state.metadata.poster(rec.tmdb_id).await;
        response.push(RecommendationResponse {
            title: rec.title,
            tmdb_id: rec.tmdb_id,
            poster_url,
        });
    }

    Ok(Json(response))
}
