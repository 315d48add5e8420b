//! # Popcorn Core
//!
//! The recommendation engine behind Popcorn. Resolves a movie title to its
//! catalog position, looks up that position's row in a precomputed
//! similarity matrix, and returns the most similar other titles.
//!
//! ## Quick Start
//!
//! ```rust
//! use popcorn_core::{Catalog, Item, Recommender, SimilarityMatrix};
//!
//! let catalog = Catalog::new(vec![
//!     Item::new("Alien", 348u64),
//!     Item::new("Aliens", 679u64),
//!     Item::new("Amelie", 194u64),
//! ]);
//! let matrix = SimilarityMatrix::from_rows(vec![
//!     vec![1.0, 0.8, 0.1],
//!     vec![0.8, 1.0, 0.2],
//!     vec![0.1, 0.2, 1.0],
//! ])
//! .unwrap();
//!
//! let engine = Recommender::new(catalog, matrix).unwrap();
//! let recs = engine.recommend("alien", 1);
//!
//! assert_eq!(recs[0].title, "Aliens");
//! assert!(engine.recommend("Unknown", 5).is_empty());
//! ```
pub mod error;
pub mod index;
pub mod loader;
pub mod ranking;
pub mod types;

// Re-export primary API
pub use error::{PopcornError, Result};
pub use index::{Catalog, SimilarityMatrix};
pub use loader::{ArtifactFormat, load_catalog, load_recommender, load_similarity};
pub use ranking::{DEFAULT_TOP_K, Recommender};
pub use types::{ExternalId, Item, Recommendation};
