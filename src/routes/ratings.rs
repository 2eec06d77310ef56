use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{error::AppResult, models::Rating, routes::AppState};

/// Handler for rating upserts
///
/// A second rating for the same user and movie replaces the first.
pub async fn rate(
    State(state): State<Arc<AppState>>,
    Json(rating): Json<Rating>,
) -> AppResult<Json<Rating>> {
    rating.validate()?;
    state.store.upsert_rating(&rating).await?;

    tracing::info!(
        user_id = rating.user_id,
        movie_id = rating.movie_id,
        rating = rating.rating,
        "Rating stored"
    );

    Ok(Json(rating))
}
