use tracing::{debug, info};

use crate::error::{PopcornError, Result};
use crate::index::{Catalog, SimilarityMatrix};
use crate::ranking::order::{rank_all, select_top_k};
use crate::types::{Item, Recommendation};

/// Number of recommendations returned when the caller does not choose.
pub const DEFAULT_TOP_K: usize = 5;

/// Read-only recommendation engine over a catalog and its similarity matrix.
///
/// Built once at startup and then shared by reference; nothing mutates it
/// afterwards, so it can serve concurrent callers without locking.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl Recommender {
    /// Pairs a catalog with its similarity matrix.
    ///
    /// # Errors
    ///
    /// Returns `PopcornError::DimensionMismatch` if the matrix does not have
    /// one row per catalog item. The two artifacts are unusable together.
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> Result<Self> {
        if catalog.len() != matrix.dim() {
            return Err(PopcornError::DimensionMismatch {
                items: catalog.len(),
                rows: matrix.dim(),
            });
        }

        info!(
            items = catalog.len(),
            non_finite = matrix.non_finite_count(),
            "recommender ready"
        );
        Ok(Self { catalog, matrix })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Returns up to `k` items most similar to `title`, best first.
    ///
    /// A blank or unknown title yields an empty list rather than an error.
    #[must_use]
    pub fn recommend(&self, title: &str, k: usize) -> Vec<Recommendation> {
        let index = match self.catalog.resolve(title) {
            Ok(index) => index,
            Err(err) => {
                debug!(%err, "no recommendations");
                return Vec::new();
            }
        };

        let row = self.matrix.row(index);
        select_top_k(&row, index, k)
            .into_iter()
            .map(|pos| Recommendation::from_item(pos, self.catalog.item_at(pos), row[pos]))
            .collect()
    }

    /// `recommend` with [`DEFAULT_TOP_K`].
    #[must_use]
    pub fn recommend_default(&self, title: &str) -> Vec<Recommendation> {
        self.recommend(title, DEFAULT_TOP_K)
    }

    /// Same as `recommend`, projected to `(title, external_id)` items.
    #[must_use]
    pub fn recommend_items(&self, title: &str, k: usize) -> Vec<&Item> {
        self.recommend(title, k)
            .into_iter()
            .map(|rec| self.catalog.item_at(rec.index))
            .collect()
    }

    /// Full ranking of every other position for the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn ranking(&self, index: usize) -> Vec<usize> {
        rank_all(&self.matrix.row(index), index)
    }

    /// First `k` entries of [`Recommender::ranking`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn top_k(&self, index: usize, k: usize) -> Vec<usize> {
        select_top_k(&self.matrix.row(index), index, k)
    }
}
