use ndarray::{Array2, ArrayView1};

use crate::error::{PopcornError, Result};

/// Square table of precomputed pairwise similarity scores.
///
/// `score(i, j)` is the similarity between catalog items `i` and `j`.
/// Gaps in the source data are stored as NaN.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

impl SimilarityMatrix {
    /// Wraps an existing array.
    ///
    /// # Errors
    ///
    /// Returns `PopcornError::NotSquare` if the array is not square.
    pub fn from_array(scores: Array2<f64>) -> Result<Self> {
        let (rows, cols) = scores.dim();
        if rows != cols {
            return Err(PopcornError::NotSquare { rows, cols });
        }
        Ok(Self { scores })
    }

    /// Builds a matrix from row vectors.
    ///
    /// # Errors
    ///
    /// Returns `PopcornError::RaggedMatrix` if rows differ in length and
    /// `PopcornError::NotSquare` if the row count differs from the row length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let cols = rows.first().map_or(0, Vec::len);

        let mut flat = Vec::with_capacity(n * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(PopcornError::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            flat.extend(values);
        }

        let scores = Array2::from_shape_vec((n, cols), flat).map_err(|_| {
            PopcornError::NotSquare { rows: n, cols }
        })?;
        Self::from_array(scores)
    }

    /// Number of rows (equal to the number of columns).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.scores.nrows()
    }

    /// Scores of item `index` against every item, itself included.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.scores.row(index)
    }

    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn score(&self, i: usize, j: usize) -> f64 {
        self.scores[[i, j]]
    }

    /// Number of non-finite entries, reported at load time.
    #[must_use]
    pub fn non_finite_count(&self) -> usize {
        self.scores.iter().filter(|s| !s.is_finite()).count()
    }
}
