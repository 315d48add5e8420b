use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or querying the recommendation index.
#[derive(Debug, Error)]
pub enum PopcornError {
    /// No catalog item matches the query title (case-insensitive).
    ///
    /// Expected and non-fatal: the ranker turns it into an empty result.
    #[error("no catalog item titled {title:?}")]
    TitleNotFound {
        /// The title that was looked up.
        title: String,
    },

    /// The catalog and the similarity matrix do not describe the same items.
    #[error("catalog has {items} items but similarity matrix has {rows} rows")]
    DimensionMismatch {
        /// Number of catalog items.
        items: usize,
        /// Number of matrix rows.
        rows: usize,
    },

    /// The similarity matrix is not square.
    #[error("similarity matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A similarity row has a different length than the first row.
    #[error("similarity row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The catalog artifact is structurally valid JSON but not a usable catalog.
    #[error("malformed catalog: {0}")]
    MalformedCatalog(String),

    /// The artifact extension is not one the loader understands.
    #[error("unsupported artifact format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Reading an artifact from disk failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON artifact failed to deserialize.
    #[error("invalid JSON artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// A `.npy` artifact failed to deserialize.
    #[error("invalid npy artifact: {0}")]
    Npy(#[from] ndarray_npy::ReadNpyError),
}

impl PopcornError {
    /// Returns `true` for load-time data-integrity failures that must stop the process.
    #[must_use]
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::NotSquare { .. } | Self::RaggedMatrix { .. }
        )
    }
}

/// Result type alias for Popcorn core operations.
pub type Result<T> = std::result::Result<T, PopcornError>;
