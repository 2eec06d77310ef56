use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::InteractionStore,
    error::{AppError, AppResult},
    models::{Movie, Rating},
};

/// Creates a PostgreSQL connection pool and applies pending migrations
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Interaction store backed by the `movies` and `ratings` tables
#[derive(Clone)]
pub struct PgInteractionStore {
    pool: PgPool,
}

impl PgInteractionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl InteractionStore for PgInteractionStore {
    async fn fetch_catalog(&self) -> AppResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, genres
            FROM movies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn fetch_ratings(&self) -> AppResult<Vec<Rating>> {
        let ratings = sqlx::query_as::<_, Rating>(
            r#"
            SELECT user_id, movie_id, rating
            FROM ratings
            ORDER BY user_id, movie_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings)
    }

    async fn upsert_rating(&self, rating: &Rating) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ratings (user_id, movie_id, rating)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, movie_id)
            DO UPDATE SET rating = EXCLUDED.rating, updated_at = now()
            "#,
        )
        .bind(rating.user_id)
        .bind(rating.movie_id)
        .bind(rating.rating)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(format!("Movie {} is not in the catalog", rating.movie_id))
            }
            other => AppError::from(other),
        })?;

        Ok(())
    }

    async fn upsert_movie(&self, movie: &Movie) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO movies (id, title, genres)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET title = EXCLUDED.title, genres = EXCLUDED.genres
            "#,
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(&movie.genres)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
