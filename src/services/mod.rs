pub mod collaborative;
pub mod content;
pub mod rating_matrix;
pub mod recommendations;
pub mod similarity;
pub mod tfidf;

pub use recommendations::Recommender;
