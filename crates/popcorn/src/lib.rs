//! # Popcorn
//!
//! Recommends movies similar to a selected title and attaches a poster URL
//! to each result.
//!
//! ```rust
//! use popcorn::{Catalog, Item, Recommender, SimilarityMatrix, StaticPosterResolver, showcase};
//!
//! let catalog = Catalog::new(vec![Item::new("Heat", 949u64), Item::new("Ronin", 8195u64)]);
//! let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.6], vec![0.6, 1.0]]).unwrap();
//! let engine = Recommender::new(catalog, matrix).unwrap();
//!
//! let cards = showcase(&engine, &StaticPosterResolver::default(), "heat", 5);
//! assert_eq!(cards[0].title, "Ronin");
//! ```

pub mod showcase;

pub use popcorn_core::{
    Catalog, DEFAULT_TOP_K, ExternalId, Item, PopcornError, Recommendation, Recommender,
    SimilarityMatrix, load_catalog, load_recommender, load_similarity,
};
pub use popcorn_posters::{
    CachedPosterResolver, PlaceholderReason, PosterConfig, PosterOutcome, PosterResolver,
    StaticPosterResolver, TmdbPosterResolver,
};
pub use showcase::{PosterCard, showcase};
