//! Loading of on-disk artifacts into the in-memory index.
//!
//! Two artifacts are consumed at startup: the catalog (ordered items) and
//! the similarity matrix, whose row order must match the catalog's.

pub mod catalog;
pub mod similarity;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::error::{PopcornError, Result};
use crate::ranking::Recommender;

pub use catalog::{catalog_from_reader, load_catalog};
pub use similarity::{ArtifactFormat, load_similarity, similarity_from_json_reader};

/// Loads both artifacts and checks that they describe the same items.
///
/// # Errors
///
/// Fails if either artifact cannot be read or parsed, or if the matrix
/// dimension differs from the catalog size.
pub fn load_recommender(
    catalog_path: impl AsRef<Path>,
    similarity_path: impl AsRef<Path>,
) -> Result<Recommender> {
    let catalog_path = catalog_path.as_ref();
    let similarity_path = similarity_path.as_ref();

    let catalog = load_catalog(catalog_path)?;
    let matrix = load_similarity(similarity_path)?;
    info!(
        catalog = %catalog_path.display(),
        similarity = %similarity_path.display(),
        items = catalog.len(),
        rows = matrix.dim(),
        "artifacts loaded"
    );

    Recommender::new(catalog, matrix)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| PopcornError::Io {
            path: path.to_path_buf(),
            source,
        })
}
