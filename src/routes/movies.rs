use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Movie, MovieId, MovieSummary},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    k: Option<usize>,
}

/// Handler for catalog listing
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let mut movies = state.store.fetch_catalog().await?;
    if let Some(limit) = params.limit {
        movies.truncate(limit);
    }
    Ok(Json(movies))
}

/// Handler for catalog ingestion
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    if movie.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Movie title must not be empty".to_string()));
    }

    state.store.upsert_movie(&movie).await?;
    tracing::info!(movie_id = movie.id, "Movie stored");

    Ok((StatusCode::CREATED, Json(movie)))
}

/// Handler for content-based recommendations
pub async fn similar(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<MovieId>,
    Query(params): Query<SimilarQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let k = state.recommender.resolve_k(params.k)?;

    tracing::info!(
        request_id = %request_id,
        movie_id,
        k,
        "Processing similar movies request"
    );

    let movies = state.recommender.recommend_content(movie_id, k).await?;
    Ok(Json(movies))
}
