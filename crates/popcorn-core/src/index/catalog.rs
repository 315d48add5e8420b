use std::collections::HashMap;

use tracing::debug;

use crate::error::{PopcornError, Result};
use crate::types::Item;

/// Ordered, read-only collection of catalog items.
///
/// An item's position is its row/column in the similarity matrix, so the
/// catalog never reorders its items after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    by_title: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the catalog and its case-insensitive title lookup table.
    ///
    /// When several items share a normalized title, the first one wins.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        let mut by_title = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            by_title.entry(normalize(&item.title)).or_insert(index);
        }
        Self { items, by_title }
    }

    /// Resolves a title to its catalog position.
    ///
    /// # Errors
    ///
    /// Returns `PopcornError::TitleNotFound` if the title is blank or no item
    /// carries it.
    pub fn resolve(&self, title: &str) -> Result<usize> {
        if title.trim().is_empty() {
            return Err(PopcornError::TitleNotFound {
                title: title.to_string(),
            });
        }

        match self.by_title.get(&normalize(title)) {
            Some(&index) => {
                debug!(title, index, "resolved title");
                Ok(index)
            }
            None => Err(PopcornError::TitleNotFound {
                title: title.to_string(),
            }),
        }
    }

    /// Returns the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Positions come from `resolve` or
    /// the ranker, so an invalid one is a bug in the caller.
    #[must_use]
    pub fn item_at(&self, index: usize) -> &Item {
        &self.items[index]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Titles in catalog order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }

    /// Case-insensitive substring search over titles, in catalog order.
    ///
    /// An empty fragment matches every title.
    pub fn search(&self, fragment: &str, limit: usize) -> Vec<(usize, &Item)> {
        let needle = normalize(fragment.trim());
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| needle.is_empty() || normalize(&item.title).contains(&needle))
            .take(limit)
            .collect()
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn normalize(title: &str) -> String {
    title.to_lowercase()
}
