use ndarray::Array2;

use crate::{
    error::RecommendError,
    models::{ScoredMovie, UserId},
    services::{rating_matrix::RatingMatrix, similarity::cosine_similarity_matrix},
};

/// User-based collaborative filtering over a rating matrix
///
/// Holds the matrix together with its user × user cosine similarity matrix.
/// Both share the same row order, so row `i` of the similarity matrix belongs
/// to `matrix.users()[i]`.
pub struct CollaborativeModel {
    matrix: RatingMatrix,
    user_similarity: Array2<f64>,
}

impl CollaborativeModel {
    pub fn new(matrix: RatingMatrix) -> Self {
        let user_similarity = cosine_similarity_matrix(matrix.values());
        Self {
            matrix,
            user_similarity,
        }
    }

    pub fn matrix(&self) -> &RatingMatrix {
        &self.matrix
    }

    pub fn user_similarity(&self) -> &Array2<f64> {
        &self.user_similarity
    }

    /// Predicted scores for every movie the user has not rated, best first
    ///
    /// For each unrated column the prediction is the similarity-weighted
    /// average of the other users' ratings, taken over the users who rated
    /// that movie:
    ///
    /// score[c] = Σ sim(u, v) × r[v, c] / Σ sim(u, v), over v ≠ u with r[v, c] > 0
    ///
    /// Movies whose similarity sum is not positive are left out rather than
    /// scored. Ties keep column order.
    pub fn predict_scores(&self, user_id: UserId) -> Result<Vec<ScoredMovie>, RecommendError> {
        let target = self
            .matrix
            .user_row(user_id)
            .ok_or(RecommendError::UnknownUser(user_id))?;

        let target_ratings = self.matrix.row(target);
        let similarities = self.user_similarity.row(target);

        let mut scored = Vec::new();
        for (col, &own_rating) in target_ratings.iter().enumerate() {
            if own_rating != 0.0 {
                continue;
            }

            let mut weighted_sum = 0.0;
            let mut sim_sum = 0.0;
            for (other, &rating) in self.matrix.column(col).iter().enumerate() {
                if other == target || rating <= 0.0 {
                    continue;
                }
                weighted_sum += similarities[other] * rating;
                sim_sum += similarities[other];
            }

            if sim_sum > 0.0 {
                scored.push(ScoredMovie {
                    movie_id: self.matrix.movies()[col],
                    score: weighted_sum / sim_sum,
                });
            }
        }

        // Stable: equal scores stay in column order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scored)
    }

    /// The `k` highest predicted movies for the user
    pub fn recommend(&self, user_id: UserId, k: usize) -> Result<Vec<ScoredMovie>, RecommendError> {
        let mut scored = self.predict_scores(user_id)?;
        scored.truncate(k);
        Ok(scored)
    }
}
