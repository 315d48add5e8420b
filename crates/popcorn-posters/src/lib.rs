//! # Popcorn Posters
//!
//! Resolves catalog external ids to display-image URLs. Resolution never
//! fails: every error path yields a placeholder URL and a typed reason.

pub mod cache;
pub mod config;
pub mod error;
pub mod resolver;
pub mod tmdb;

pub use cache::CachedPosterResolver;
pub use config::{DEFAULT_PLACEHOLDER_URL, PosterConfig};
pub use error::PosterError;
pub use resolver::{PlaceholderReason, PosterOutcome, PosterResolver, StaticPosterResolver};
pub use tmdb::TmdbPosterResolver;
