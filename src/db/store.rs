use crate::{
    error::AppResult,
    models::{Movie, Rating},
};

/// Source of the catalog and ratings the engine computes over
///
/// Implementations return a committed snapshot per call. A computation calls
/// each fetch once and works only on what it got back; writes that land
/// afterwards are invisible to it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InteractionStore: Send + Sync {
    /// All movies, ordered by id
    async fn fetch_catalog(&self) -> AppResult<Vec<Movie>>;

    /// All ratings, ordered by (user id, movie id)
    async fn fetch_ratings(&self) -> AppResult<Vec<Rating>>;

    /// Inserts or replaces the rating for the (user, movie) pair
    ///
    /// Fails with `NotFound` when the movie is not in the catalog.
    async fn upsert_rating(&self, rating: &Rating) -> AppResult<()>;

    /// Inserts or replaces a catalog entry by id
    async fn upsert_movie(&self, movie: &Movie) -> AppResult<()>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}
