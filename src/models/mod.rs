use serde::{Deserialize, Serialize};

pub mod movie;
pub mod rating;

pub use movie::{Movie, MovieId, MovieSummary, GENRE_SEPARATOR};
pub use rating::{Rating, UserId, MAX_RATING};

/// A movie id paired with the score an engine ranked it by
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMovie {
    pub movie_id: MovieId,
    pub score: f64,
}

/// Request for one or both recommendation lists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationRequest {
    /// User to score with collaborative filtering
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Reference movie for content-based filtering
    #[serde(default)]
    pub movie_id: Option<MovieId>,
    /// Length of each list; the configured default when absent
    #[serde(default)]
    pub k: Option<usize>,
}

/// The two independently ranked lists
///
/// A list is `None` when its input was not part of the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub collaborative: Option<Vec<MovieSummary>>,
    pub content: Option<Vec<MovieSummary>>,
}
