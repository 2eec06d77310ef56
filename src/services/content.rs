use std::collections::HashMap;

use ndarray::Array2;

use crate::{
    error::RecommendError,
    models::{Movie, MovieId, ScoredMovie},
    services::{similarity::cosine_similarity_matrix, tfidf::TfidfModel},
};

/// Content-based filtering over the catalog's genre tags
///
/// Each movie's `genres` string becomes a TF-IDF vector and movies are
/// compared by cosine similarity. Row `i` of the similarity matrix belongs to
/// the `i`-th movie of the catalog as given to [`ContentModel::new`].
pub struct ContentModel {
    movie_ids: Vec<MovieId>,
    positions: HashMap<MovieId, usize>,
    item_similarity: Array2<f64>,
}

impl ContentModel {
    /// Vectorises the catalog and computes the movie × movie similarity
    pub fn new(catalog: &[Movie]) -> Self {
        let documents: Vec<&str> = catalog.iter().map(|m| m.genres.as_str()).collect();
        let (_, vectors) = TfidfModel::fit_transform(&documents);
        let item_similarity = cosine_similarity_matrix(&vectors);

        let movie_ids: Vec<MovieId> = catalog.iter().map(|m| m.id).collect();
        let mut positions = HashMap::with_capacity(movie_ids.len());
        for (position, &movie_id) in movie_ids.iter().enumerate() {
            positions.entry(movie_id).or_insert(position);
        }

        Self {
            movie_ids,
            positions,
            item_similarity,
        }
    }

    pub fn item_similarity(&self) -> &Array2<f64> {
        &self.item_similarity
    }

    /// Catalog position of a movie
    pub fn position(&self, movie_id: MovieId) -> Option<usize> {
        self.positions.get(&movie_id).copied()
    }

    /// Every other movie ranked by similarity to the reference, best first
    ///
    /// The reference itself is never part of the result. Ties keep catalog
    /// order.
    pub fn rank_similar(&self, movie_id: MovieId) -> Result<Vec<ScoredMovie>, RecommendError> {
        let reference = self
            .position(movie_id)
            .ok_or(RecommendError::UnknownMovie(movie_id))?;

        let mut scored: Vec<ScoredMovie> = self
            .item_similarity
            .row(reference)
            .iter()
            .enumerate()
            .filter(|&(position, _)| self.movie_ids[position] != movie_id)
            .map(|(position, &score)| ScoredMovie {
                movie_id: self.movie_ids[position],
                score,
            })
            .collect();

        // Stable: equal scores stay in catalog order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scored)
    }

    /// The `k` movies most similar to the reference
    pub fn recommend(&self, movie_id: MovieId, k: usize) -> Result<Vec<ScoredMovie>, RecommendError> {
        let mut scored = self.rank_similar(movie_id)?;
        scored.truncate(k);
        Ok(scored)
    }
}
