use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    db::InteractionStore,
    error::{AppError, AppResult},
    models::{
        Movie, MovieId, MovieSummary, RecommendationRequest, RecommendationResponse, ScoredMovie,
        UserId,
    },
    services::{collaborative::CollaborativeModel, content::ContentModel, rating_matrix::RatingMatrix},
};

/// Generates collaborative and content-based movie recommendations
///
/// Every call reads a fresh snapshot from the store and rebuilds the matrices
/// it needs; nothing is cached between calls. The matrix work runs on the
/// blocking thread pool.
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn InteractionStore>,
    default_k: usize,
    max_k: usize,
}

impl Recommender {
    pub fn new(store: Arc<dyn InteractionStore>, default_k: usize, max_k: usize) -> Self {
        Self {
            store,
            default_k,
            max_k,
        }
    }

    /// List length to use for a request, validated against the configured bound
    pub fn resolve_k(&self, k: Option<usize>) -> AppResult<usize> {
        let k = k.unwrap_or(self.default_k);
        if k == 0 || k > self.max_k {
            return Err(AppError::InvalidInput(format!(
                "k must be between 1 and {}, got {}",
                self.max_k, k
            )));
        }
        Ok(k)
    }

    /// Movies the user has not rated, ranked by ratings of similar users
    ///
    /// Fails with `RecommendError::UnknownUser` when the user has no ratings.
    pub async fn recommend_collaborative(
        &self,
        user_id: UserId,
        k: usize,
    ) -> AppResult<Vec<MovieSummary>> {
        let start = Instant::now();
        let (ratings, catalog) =
            tokio::try_join!(self.store.fetch_ratings(), self.store.fetch_catalog())?;

        tracing::debug!(
            store = self.store.name(),
            ratings = ratings.len(),
            movies = catalog.len(),
            "Fetched collaborative snapshot"
        );

        let scored = run_blocking(move || {
            let matrix = RatingMatrix::build(&ratings);
            tracing::debug!(
                users = matrix.n_users(),
                movies = matrix.n_movies(),
                "Built rating matrix"
            );
            CollaborativeModel::new(matrix).predict_scores(user_id)
        })
        .await??;

        let recommendations = attach_titles(&scored, &catalog, k);

        tracing::info!(
            user_id,
            k,
            candidates = scored.len(),
            returned = recommendations.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Collaborative recommendations computed"
        );

        Ok(recommendations)
    }

    /// Movies whose genres are closest to the reference movie
    ///
    /// Fails with `RecommendError::UnknownMovie` when the movie is not in the
    /// catalog.
    pub async fn recommend_content(
        &self,
        movie_id: MovieId,
        k: usize,
    ) -> AppResult<Vec<MovieSummary>> {
        let start = Instant::now();
        let catalog = self.store.fetch_catalog().await?;

        tracing::debug!(
            store = self.store.name(),
            movies = catalog.len(),
            "Fetched catalog snapshot"
        );

        let recommendations = run_blocking(move || {
            let scored = ContentModel::new(&catalog).recommend(movie_id, k)?;
            Ok::<_, AppError>(attach_titles(&scored, &catalog, k))
        })
        .await??;

        tracing::info!(
            movie_id,
            k,
            returned = recommendations.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Content recommendations computed"
        );

        Ok(recommendations)
    }

    /// Runs whichever engines the request names and returns their lists side by side
    ///
    /// The lists are not merged, deduplicated or re-ranked against each other.
    pub async fn recommend(&self, request: RecommendationRequest) -> AppResult<RecommendationResponse> {
        if request.user_id.is_none() && request.movie_id.is_none() {
            return Err(AppError::InvalidInput(
                "Must provide a user_id, a movie_id or both".to_string(),
            ));
        }
        let k = self.resolve_k(request.k)?;

        let collaborative = async {
            match request.user_id {
                Some(user_id) => self.recommend_collaborative(user_id, k).await.map(Some),
                None => Ok(None),
            }
        };
        let content = async {
            match request.movie_id {
                Some(movie_id) => self.recommend_content(movie_id, k).await.map(Some),
                None => Ok(None),
            }
        };

        let (collaborative, content) = tokio::try_join!(collaborative, content)?;

        Ok(RecommendationResponse {
            collaborative,
            content,
        })
    }
}

/// Runs CPU-bound matrix work off the async runtime
async fn run_blocking<F, T>(work: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Recommendation task failed: {}", e)))
}

/// Joins ranked ids with their catalog titles, keeping the first `k` found
///
/// Ratings may reference movies that are missing from the catalog snapshot;
/// those are skipped before the list is cut to `k`.
fn attach_titles(scored: &[ScoredMovie], catalog: &[Movie], k: usize) -> Vec<MovieSummary> {
    let by_id: HashMap<MovieId, &Movie> = catalog.iter().map(|m| (m.id, m)).collect();

    scored
        .iter()
        .filter_map(|s| match by_id.get(&s.movie_id) {
            Some(movie) => Some(MovieSummary::from(*movie)),
            None => {
                tracing::warn!(movie_id = s.movie_id, "Rated movie missing from catalog, skipping");
                None
            }
        })
        .take(k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{
            seed::{sample_movies, sample_ratings},
            MockInteractionStore,
        },
        error::RecommendError,
        models::Rating,
    };

    fn mock_store() -> MockInteractionStore {
        let mut store = MockInteractionStore::new();
        store.expect_name().return_const("mock");
        store
    }

    fn recommender(store: MockInteractionStore) -> Recommender {
        Recommender::new(Arc::new(store), 3, 10)
    }

    #[tokio::test]
    async fn test_collaborative_reads_one_snapshot() {
        let mut store = mock_store();
        store
            .expect_fetch_ratings()
            .times(1)
            .returning(|| Ok(sample_ratings()));
        store
            .expect_fetch_catalog()
            .times(1)
            .returning(|| Ok(sample_movies()));

        let recs = recommender(store).recommend_collaborative(1, 3).await.unwrap();
        assert_eq!(
            recs,
            vec![MovieSummary {
                movie_id: 5,
                title: "Avatar".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_collaborative_unknown_user_propagates() {
        let mut store = mock_store();
        store.expect_fetch_ratings().returning(|| Ok(sample_ratings()));
        store.expect_fetch_catalog().returning(|| Ok(sample_movies()));

        let err = recommender(store)
            .recommend_collaborative(42, 3)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Recommend(RecommendError::UnknownUser(42))
        ));
    }

    #[tokio::test]
    async fn test_collaborative_skips_movies_missing_from_catalog() {
        let mut store = mock_store();
        store.expect_fetch_ratings().returning(|| {
            Ok(vec![
                Rating::new(1, 1, 5.0),
                Rating::new(2, 1, 5.0),
                Rating::new(2, 2, 4.0),
                Rating::new(2, 77, 5.0),
            ])
        });
        store.expect_fetch_catalog().returning(|| Ok(sample_movies()));

        let recs = recommender(store).recommend_collaborative(1, 1).await.unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].movie_id, 2);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let mut store = mock_store();
        store
            .expect_fetch_catalog()
            .returning(|| Err(AppError::Internal("connection reset".to_string())));

        let err = recommender(store).recommend_content(1, 3).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_content_returns_titles() {
        let mut store = mock_store();
        store
            .expect_fetch_catalog()
            .times(1)
            .returning(|| Ok(sample_movies()));

        let recs = recommender(store).recommend_content(4, 1).await.unwrap();
        assert_eq!(
            recs,
            vec![MovieSummary {
                movie_id: 2,
                title: "Titanic".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_recommend_requires_user_or_movie() {
        let store = mock_store();
        let err = recommender(store)
            .recommend(RecommendationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_recommend_only_runs_requested_engine() {
        let mut store = mock_store();
        store.expect_fetch_ratings().never();
        store
            .expect_fetch_catalog()
            .times(1)
            .returning(|| Ok(sample_movies()));

        let response = recommender(store)
            .recommend(RecommendationRequest {
                user_id: None,
                movie_id: Some(1),
                k: None,
            })
            .await
            .unwrap();

        assert!(response.collaborative.is_none());
        assert_eq!(response.content.map(|c| c.len()), Some(3));
    }

    #[tokio::test]
    async fn test_recommend_returns_both_lists() {
        let mut store = mock_store();
        store.expect_fetch_ratings().returning(|| Ok(sample_ratings()));
        store.expect_fetch_catalog().returning(|| Ok(sample_movies()));

        let response = recommender(store)
            .recommend(RecommendationRequest {
                user_id: Some(1),
                movie_id: Some(1),
                k: Some(2),
            })
            .await
            .unwrap();

        assert_eq!(response.collaborative.map(|c| c.len()), Some(1));
        let content = response.content.unwrap();
        assert_eq!(content.len(), 2);
        assert!(content.iter().all(|m| m.movie_id != 1));
    }

    #[test]
    fn test_resolve_k_bounds() {
        let recommender = recommender(MockInteractionStore::new());
        assert_eq!(recommender.resolve_k(None).unwrap(), 3);
        assert_eq!(recommender.resolve_k(Some(10)).unwrap(), 10);
        assert!(recommender.resolve_k(Some(0)).is_err());
        assert!(recommender.resolve_k(Some(11)).is_err());
    }
}
