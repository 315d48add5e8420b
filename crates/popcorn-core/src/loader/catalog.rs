use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{PopcornError, Result};
use crate::index::Catalog;
use crate::types::{ExternalId, Item};

/// Accepted catalog layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogArtifact {
    /// `[{"title": .., "id": ..}, ..]`
    Records(Vec<Item>),
    /// `{"title": {"0": ..}, "id": {"0": ..}}`, as a dataframe `to_dict()` writes it.
    Columns(ColumnCatalog),
}

#[derive(Deserialize)]
struct ColumnCatalog {
    title: HashMap<String, String>,
    #[serde(alias = "external_id")]
    id: HashMap<String, ExternalId>,
}

impl ColumnCatalog {
    fn into_items(self) -> Result<Vec<Item>> {
        let Self { title, mut id } = self;
        if title.len() != id.len() {
            return Err(PopcornError::MalformedCatalog(format!(
                "{} titles but {} ids",
                title.len(),
                id.len()
            )));
        }

        let mut rows = title
            .into_iter()
            .map(|(key, title)| {
                let row: usize = key.parse().map_err(|_| {
                    PopcornError::MalformedCatalog(format!("row key {key:?} is not an integer"))
                })?;
                let external_id = id.remove(&key).ok_or_else(|| {
                    PopcornError::MalformedCatalog(format!("row {key} has a title but no id"))
                })?;
                Ok((row, Item { title, external_id }))
            })
            .collect::<Result<Vec<_>>>()?;

        rows.sort_by_key(|(row, _)| *row);
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(PopcornError::MalformedCatalog(format!(
                "row {} appears more than once",
                pair[0].0
            )));
        }
        Ok(rows.into_iter().map(|(_, item)| item).collect())
    }
}

/// Reads a catalog from JSON in either the record or the column layout.
///
/// # Errors
///
/// Returns `PopcornError::Json` if the input matches neither layout and
/// `PopcornError::MalformedCatalog` if the column layout is inconsistent.
pub fn catalog_from_reader<R: Read>(reader: R) -> Result<Catalog> {
    let items = match serde_json::from_reader(reader)? {
        CatalogArtifact::Records(items) => items,
        CatalogArtifact::Columns(columns) => {
            debug!("catalog uses column layout");
            columns.into_items()?
        }
    };
    Ok(Catalog::new(items))
}

/// Loads the catalog artifact at `path`.
///
/// # Errors
///
/// See [`catalog_from_reader`]; also fails with `PopcornError::Io` if the
/// file cannot be opened.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let catalog = catalog_from_reader(super::open(path)?)?;
    debug!(path = %path.display(), items = catalog.len(), "catalog loaded");
    Ok(catalog)
}
