use serde::{Deserialize, Serialize};

use super::item::{ExternalId, Item};

/// One ranked entry returned by the recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Catalog position of the recommended item.
    pub index: usize,

    /// Title of the recommended item.
    pub title: String,

    /// Key for fetching display imagery.
    pub external_id: ExternalId,

    /// Similarity to the query item. May be non-finite when the matrix had a gap.
    pub score: f64,
}

impl Recommendation {
    #[must_use]
    pub fn from_item(index: usize, item: &Item, score: f64) -> Self {
        Self {
            index,
            title: item.title.clone(),
            external_id: item.external_id.clone(),
            score,
        }
    }

    /// The `(title, external_id)` pair the presentation layer consumes.
    #[must_use]
    pub fn as_pair(&self) -> (&str, &ExternalId) {
        (&self.title, &self.external_id)
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] score={:.3}", self.title, self.external_id, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_item_copies_fields() {
        let item = Item::new("The Dark Knight", 155u64);
        let rec = Recommendation::from_item(7, &item, 0.42);
        assert_eq!(rec.index, 7);
        assert_eq!(rec.as_pair(), ("The Dark Knight", &ExternalId::new("155")));
        assert!(rec.to_string().contains("0.420"));
    }
}
