use std::io::Read;
use std::path::Path;

use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use tracing::debug;

use crate::error::{PopcornError, Result};
use crate::index::SimilarityMatrix;

/// On-disk encodings of the similarity matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// NumPy `.npy`, 2-D `f64` or `f32` (widened).
    Npy,
    /// JSON array of rows; `null` marks a missing score.
    Json,
}

impl ArtifactFormat {
    /// Picks the format from the file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "npy" => Some(Self::Npy),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Reads a JSON array-of-rows matrix. `null` entries become NaN.
///
/// # Errors
///
/// Returns `PopcornError::Json` on malformed input, or a shape error if
/// the rows do not form a square matrix.
pub fn similarity_from_json_reader<R: Read>(reader: R) -> Result<SimilarityMatrix> {
    let rows: Vec<Vec<Option<f64>>> = serde_json::from_reader(reader)?;
    let rows: Vec<Vec<f64>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(|s| s.unwrap_or(f64::NAN)).collect())
        .collect();
    SimilarityMatrix::from_rows(rows)
}

fn similarity_from_npy(bytes: &[u8]) -> Result<SimilarityMatrix> {
    let scores = match Array2::<f64>::read_npy(bytes) {
        Ok(scores) => scores,
        Err(f64_err) => match Array2::<f32>::read_npy(bytes) {
            Ok(scores) => scores.mapv(f64::from),
            Err(_) => return Err(f64_err.into()),
        },
    };
    SimilarityMatrix::from_array(scores)
}

/// Loads the similarity matrix at `path`, choosing the decoder by extension.
///
/// # Errors
///
/// Returns `PopcornError::UnsupportedFormat` for unknown extensions, and
/// I/O, decode, or shape errors otherwise.
pub fn load_similarity(path: impl AsRef<Path>) -> Result<SimilarityMatrix> {
    let path = path.as_ref();
    let format = ArtifactFormat::from_path(path).ok_or_else(|| PopcornError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let matrix = match format {
        ArtifactFormat::Json => similarity_from_json_reader(super::open(path)?)?,
        ArtifactFormat::Npy => {
            let bytes = std::fs::read(path).map_err(|source| PopcornError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            similarity_from_npy(&bytes)?
        }
    };

    debug!(path = %path.display(), ?format, dim = matrix.dim(), "similarity matrix loaded");
    Ok(matrix)
}
