//! TF-IDF vectorisation of short tag strings
//!
//! Terms are lowercase alphanumeric runs of at least two characters, so
//! "Sci-Fi" contributes `sci` and `fi`. Weights use the smoothed inverse
//! document frequency `ln((1 + n) / (1 + df)) + 1` and each document vector
//! is L2-normalised.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;

/// Shortest token kept as a term
const MIN_TOKEN_CHARS: usize = 2;

/// Splits text into lowercase terms
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// Fitted vocabulary with per-term idf weights
#[derive(Debug, Clone)]
pub struct TfidfModel {
    /// Term → column index, columns in lexical order
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfModel {
    /// Learns the vocabulary and idf weights from a set of documents
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let distinct: BTreeSet<&String> = tokens.iter().collect();
            for term in distinct {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let n_documents = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, column);
        }

        Self { vocabulary, idf }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Column of a term, `None` when it was not seen during fitting
    pub fn term_column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Weighted, L2-normalised document × term matrix
    ///
    /// Row `i` corresponds to `documents[i]`. Terms outside the vocabulary
    /// are ignored; a document with no known terms is an all-zero row.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Array2<f64> {
        let mut matrix = Array2::<f64>::zeros((documents.len(), self.vocabulary_size()));

        for (row, document) in documents.iter().enumerate() {
            for term in tokenize(document.as_ref()) {
                if let Some(column) = self.term_column(&term) {
                    matrix[[row, column]] += self.idf[column];
                }
            }

            let mut weights = matrix.row_mut(row);
            let norm = weights.dot(&weights).sqrt();
            if norm > 0.0 {
                weights /= norm;
            }
        }

        matrix
    }

    /// Fits on the documents and returns their weighted matrix
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Array2<f64>) {
        let model = Self::fit(documents);
        let matrix = model.transform(documents);
        (model, matrix)
    }
}
