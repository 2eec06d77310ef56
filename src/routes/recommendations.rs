use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MovieSummary, RecommendationRequest, RecommendationResponse, UserId},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    k: Option<usize>,
}

/// Handler for collaborative recommendations of one user
pub async fn for_user(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(params): Query<UserQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let k = state.recommender.resolve_k(params.k)?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        k,
        "Processing user recommendations request"
    );

    let movies = state.recommender.recommend_collaborative(user_id, k).await?;
    Ok(Json(movies))
}

/// Handler for the combined recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id = ?request.user_id,
        movie_id = ?request.movie_id,
        "Processing recommendations request"
    );

    let response = state.recommender.recommend(request).await?;

    tracing::info!(
        request_id = %request_id,
        "Recommendations completed"
    );

    Ok(Json(response))
}
