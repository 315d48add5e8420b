use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier used to look up display imagery for an item.
///
/// Catalog artifacts store TMDB ids as integers, other sources use strings;
/// both deserialize into the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExternalId(String);

impl ExternalId {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExternalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ExternalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ExternalId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ExternalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            UInt(u64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::UInt(n) => Self(n.to_string()),
            // Integer columns that held a NaN are exported as floats.
            Raw::Float(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 => {
                Self((n as i64).to_string())
            }
            Raw::Float(n) => {
                return Err(serde::de::Error::custom(format!(
                    "external id {n} is not a whole number"
                )));
            }
            Raw::Text(s) => Self(s),
        })
    }
}

/// A catalog entry. Its position in the catalog is its similarity-matrix index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display title, also the case-insensitive lookup key.
    pub title: String,

    /// Key for fetching display imagery.
    #[serde(alias = "id")]
    pub external_id: ExternalId,
}

impl Item {
    #[must_use]
    pub fn new(title: impl Into<String>, external_id: impl Into<ExternalId>) -> Self {
        Self {
            title: title.into(),
            external_id: external_id.into(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.external_id)
    }
}
