use std::collections::{BTreeSet, HashMap};

use ndarray::{Array2, ArrayView1};

use crate::models::{MovieId, Rating, UserId};

/// Dense user × movie matrix of ratings
///
/// Row `i` belongs to `users()[i]` and column `j` to `movies()[j]`. Only users
/// and movies with at least one rating get a row or column. An unrated cell
/// holds 0.0, which is indistinguishable from a rating of zero; ratings are
/// validated to be strictly positive so that value never occurs as a score.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    users: Vec<UserId>,
    movies: Vec<MovieId>,
    user_index: HashMap<UserId, usize>,
    movie_index: HashMap<MovieId, usize>,
    values: Array2<f64>,
}

impl RatingMatrix {
    /// Builds the matrix from a flat list of ratings
    ///
    /// The first pass collects the sorted distinct ids, the second fills the
    /// pre-sized matrix by index lookup. When a (user, movie) pair appears
    /// more than once, the later triple wins.
    pub fn build(ratings: &[Rating]) -> Self {
        let users: Vec<UserId> = ratings
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let movies: Vec<MovieId> = ratings
            .iter()
            .map(|r| r.movie_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let movie_index: HashMap<MovieId, usize> =
            movies.iter().enumerate().map(|(j, &id)| (id, j)).collect();

        let mut values = Array2::<f64>::zeros((users.len(), movies.len()));
        for rating in ratings {
            let row = user_index[&rating.user_id];
            let col = movie_index[&rating.movie_id];
            values[[row, col]] = rating.rating;
        }

        Self {
            users,
            movies,
            user_index,
            movie_index,
            values,
        }
    }

    /// User id of each row, in row order
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Movie id of each column, in column order
    pub fn movies(&self) -> &[MovieId] {
        &self.movies
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_movies(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Row index of a user, `None` when the user has no ratings
    pub fn user_row(&self, user_id: UserId) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    /// Column index of a movie, `None` when nobody rated it
    pub fn movie_column(&self, movie_id: MovieId) -> Option<usize> {
        self.movie_index.get(&movie_id).copied()
    }

    /// Ratings of one user across all columns
    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.values.row(row)
    }

    /// Ratings of one movie across all rows
    pub fn column(&self, col: usize) -> ArrayView1<'_, f64> {
        self.values.column(col)
    }

    /// Stored score for the pair, 0.0 when absent
    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> f64 {
        match (self.user_row(user_id), self.movie_column(movie_id)) {
            (Some(row), Some(col)) => self.values[[row, col]],
            _ => 0.0,
        }
    }
}
