use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Cosine similarity between two vectors
///
/// Formula: cos(A, B) = (A · B) / (||A|| × ||B||). Zero vectors share no
/// signal with anything and score 0.0.
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (a.dot(&b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Pairwise cosine similarity between the rows of a matrix
///
/// Returns a square, symmetric matrix with one row and column per input row,
/// in input order. The diagonal is 1.0 for every row, including all-zero
/// rows, and off-diagonal values are clamped to [-1, 1] so self-similarity is
/// always the row maximum.
pub fn cosine_similarity_matrix(rows: &Array2<f64>) -> Array2<f64> {
    let n = rows.nrows();
    let norms: Array1<f64> = rows.map_axis(Axis(1), |row| row.dot(&row).sqrt());

    let mut similarity = rows.dot(&rows.t());
    for i in 0..n {
        for j in 0..n {
            similarity[[i, j]] = if i == j {
                1.0
            } else if norms[i] == 0.0 || norms[j] == 0.0 {
                0.0
            } else {
                (similarity[[i, j]] / (norms[i] * norms[j])).clamp(-1.0, 1.0)
            };
        }
    }

    similarity
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_cosine_similarity() {
        let a = arr1(&[1.0, 0.0, 0.0]);
        let b = arr1(&[1.0, 0.0, 0.0]);
        assert!((cosine_similarity(a.view(), b.view()) - 1.0).abs() < 1e-9);

        let c = arr1(&[1.0, 0.0, 0.0]);
        let d = arr1(&[0.0, 1.0, 0.0]);
        assert!(cosine_similarity(c.view(), d.view()).abs() < 1e-9);

        let e = arr1(&[1.0, 1.0]);
        let f = arr1(&[-1.0, -1.0]);
        assert!((cosine_similarity(e.view(), f.view()) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = arr1(&[0.0, 0.0]);
        let b = arr1(&[3.0, 4.0]);
        assert_eq!(cosine_similarity(a.view(), b.view()), 0.0);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        let a = arr1(&[1.0, 2.0]);
        let b = arr1(&[1.0, 2.0, 3.0]);
        assert_eq!(cosine_similarity(a.view(), b.view()), 0.0);
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let rows = arr2(&[[5.0, 3.0, 0.0], [4.0, 0.0, 2.0], [0.0, 1.0, 1.0]]);
        let sim = cosine_similarity_matrix(&rows);

        assert_eq!(sim.dim(), (3, 3));
        for i in 0..3 {
            assert_eq!(sim[[i, i]], 1.0);
            for j in 0..3 {
                assert!((sim[[i, j]] - sim[[j, i]]).abs() < 1e-12);
                assert!(sim[[i, j]] <= sim[[i, i]]);
            }
        }
    }

    #[test]
    fn test_matrix_agrees_with_pairwise_cosine() {
        let rows = arr2(&[[5.0, 3.0, 4.0, 1.0, 0.0], [4.0, 0.0, 5.0, 0.0, 2.0]]);
        let sim = cosine_similarity_matrix(&rows);
        let expected = cosine_similarity(rows.row(0), rows.row(1));
        assert!((sim[[0, 1]] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_matrix_zero_row_is_orthogonal_to_everything() {
        let rows = arr2(&[[0.0, 0.0], [1.0, 2.0]]);
        let sim = cosine_similarity_matrix(&rows);
        assert_eq!(sim[[0, 0]], 1.0);
        assert_eq!(sim[[0, 1]], 0.0);
        assert_eq!(sim[[1, 0]], 0.0);
    }

    #[test]
    fn test_empty_matrix() {
        let rows = Array2::<f64>::zeros((0, 0));
        assert_eq!(cosine_similarity_matrix(&rows).dim(), (0, 0));
    }
}
