use serde::{Deserialize, Serialize};

use super::MovieId;
use crate::error::{AppError, AppResult};

/// Identifier of a user who rates movies
pub type UserId = i64;

/// Highest score a rating may carry
pub const MAX_RATING: f64 = 5.0;

/// A user's score for one movie
///
/// The (user, movie) pair is unique: a later rating replaces the earlier one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f64,
}

impl Rating {
    pub fn new(user_id: UserId, movie_id: MovieId, rating: f64) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
        }
    }

    /// Checks the score lies in (0, MAX_RATING]
    ///
    /// Zero is reserved: the rating matrix stores "not rated" as 0.0.
    pub fn validate(&self) -> AppResult<()> {
        if !self.rating.is_finite() || self.rating <= 0.0 || self.rating > MAX_RATING {
            return Err(AppError::InvalidInput(format!(
                "Rating must be greater than 0 and at most {}, got {}",
                MAX_RATING, self.rating
            )));
        }
        Ok(())
    }
}
