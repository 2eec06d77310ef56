use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::{
    db::InteractionStore,
    error::{AppError, AppResult},
    models::{Movie, MovieId, Rating, UserId},
};

/// Interaction store held in process memory
///
/// Ordered maps give the same catalog and rating order the Postgres store
/// returns.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<InMemoryStoreInner>,
}

#[derive(Default)]
struct InMemoryStoreInner {
    movies: BTreeMap<MovieId, Movie>,
    ratings: BTreeMap<(UserId, MovieId), f64>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl InteractionStore for InMemoryStore {
    async fn fetch_catalog(&self) -> AppResult<Vec<Movie>> {
        let inner = self.inner.read().await;
        Ok(inner.movies.values().cloned().collect())
    }

    async fn fetch_ratings(&self) -> AppResult<Vec<Rating>> {
        let inner = self.inner.read().await;
        Ok(inner
            .ratings
            .iter()
            .map(|(&(user_id, movie_id), &rating)| Rating::new(user_id, movie_id, rating))
            .collect())
    }

    async fn upsert_rating(&self, rating: &Rating) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.movies.contains_key(&rating.movie_id) {
            return Err(AppError::NotFound(format!(
                "Movie {} is not in the catalog",
                rating.movie_id
            )));
        }
        inner
            .ratings
            .insert((rating.user_id, rating.movie_id), rating.rating);
        Ok(())
    }

    async fn upsert_movie(&self, movie: &Movie) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.movies.insert(movie.id, movie.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_is_ordered_by_id() {
        let store = InMemoryStore::new();
        store.upsert_movie(&Movie::new(5, "Avatar", &["Action"])).await.unwrap();
        store.upsert_movie(&Movie::new(1, "The Matrix", &["Action"])).await.unwrap();

        let ids: Vec<MovieId> = store
            .fetch_catalog()
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[tokio::test]
    async fn test_upsert_rating_replaces_previous_score() {
        let store = InMemoryStore::new();
        store.upsert_movie(&Movie::new(1, "The Matrix", &["Action"])).await.unwrap();

        store.upsert_rating(&Rating::new(7, 1, 2.0)).await.unwrap();
        store.upsert_rating(&Rating::new(7, 1, 4.5)).await.unwrap();

        let ratings = store.fetch_ratings().await.unwrap();
        assert_eq!(ratings, vec![Rating::new(7, 1, 4.5)]);
    }

    #[tokio::test]
    async fn test_upsert_rating_for_unknown_movie_fails() {
        let store = InMemoryStore::new();
        let result = store.upsert_rating(&Rating::new(7, 99, 3.0)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.fetch_ratings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_movie_replaces_title() {
        let store = InMemoryStore::new();
        store.upsert_movie(&Movie::new(2, "Titanc", &["Drama"])).await.unwrap();
        store.upsert_movie(&Movie::new(2, "Titanic", &["Drama", "Romance"])).await.unwrap();

        let catalog = store.fetch_catalog().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].title, "Titanic");
        assert_eq!(catalog[0].genres, "Drama|Romance");
    }
}
