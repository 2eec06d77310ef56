use serde::{Deserialize, Serialize};

/// Identifier of a movie in the catalog
pub type MovieId = i64;

/// Separator between genre tags in a movie's `genres` string
pub const GENRE_SEPARATOR: &str = "|";

/// Represents a movie in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Movie {
    /// Unique identifier for the movie
    pub id: MovieId,
    /// Display title
    pub title: String,
    /// Genre tags joined by `|`, e.g. "Action|Sci-Fi"
    #[serde(default)]
    pub genres: String,
}

impl Movie {
    /// Creates a new movie from its tag list
    pub fn new(id: MovieId, title: impl Into<String>, genres: &[&str]) -> Self {
        Self {
            id,
            title: title.into(),
            genres: genres.join(GENRE_SEPARATOR),
        }
    }

    /// Genre tags in their stored order, skipping empty segments
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.genres
            .split(GENRE_SEPARATOR)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

/// A recommended movie as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub movie_id: MovieId,
    pub title: String,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
        }
    }
}
