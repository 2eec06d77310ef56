use crate::{
    db::InteractionStore,
    error::AppResult,
    models::{Movie, Rating},
};

/// Small demo catalog: (id, title, genres)
const SAMPLE_MOVIES: [(i64, &str, &str); 5] = [
    (1, "The Matrix", "Action|Sci-Fi"),
    (2, "Titanic", "Drama|Romance"),
    (3, "Inception", "Action|Sci-Fi|Thriller"),
    (4, "The Room", "Drama"),
    (5, "Avatar", "Action|Adventure|Sci-Fi"),
];

/// Demo ratings: (user id, movie id, score)
const SAMPLE_RATINGS: [(i64, i64, f64); 14] = [
    (1, 1, 5.0),
    (1, 2, 3.0),
    (1, 3, 4.0),
    (1, 4, 1.0),
    (2, 1, 4.0),
    (2, 3, 5.0),
    (2, 5, 2.0),
    (3, 2, 4.0),
    (3, 3, 5.0),
    (3, 4, 2.0),
    (3, 5, 3.0),
    (4, 1, 3.0),
    (4, 2, 4.0),
    (4, 5, 5.0),
];

/// The demo catalog as movies
pub fn sample_movies() -> Vec<Movie> {
    SAMPLE_MOVIES
        .iter()
        .map(|&(id, title, genres)| Movie {
            id,
            title: title.to_string(),
            genres: genres.to_string(),
        })
        .collect()
}

/// The demo ratings
pub fn sample_ratings() -> Vec<Rating> {
    SAMPLE_RATINGS
        .iter()
        .map(|&(user_id, movie_id, rating)| Rating::new(user_id, movie_id, rating))
        .collect()
}

/// Upserts the demo catalog and ratings into a store
///
/// Safe to run on every startup: existing rows are replaced, not duplicated.
pub async fn seed_sample_data(store: &dyn InteractionStore) -> AppResult<()> {
    let movies = sample_movies();
    let ratings = sample_ratings();

    for movie in &movies {
        store.upsert_movie(movie).await?;
    }
    for rating in &ratings {
        store.upsert_rating(rating).await?;
    }

    tracing::info!(
        store = store.name(),
        movies = movies.len(),
        ratings = ratings.len(),
        "Seeded sample data"
    );

    Ok(())
}
