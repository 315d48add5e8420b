use thiserror::Error;

use crate::resolver::PlaceholderReason;

/// Failures inside a poster lookup. Resolvers turn these into placeholders.
#[derive(Debug, Error)]
pub enum PosterError {
    /// No API credential is configured; lookups are skipped.
    #[error("no TMDB API key configured")]
    MissingApiKey,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed before a response arrived (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },

    /// The response body was not the expected JSON.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The external id cannot be used as a URL path segment.
    #[error("external id {0:?} is not a valid path segment")]
    InvalidId(String),

    /// The configured API base is not a usable URL.
    #[error("invalid API base URL {0:?}")]
    InvalidUrl(String),

    /// The item exists but has no poster.
    #[error("item has no poster")]
    NoPoster,
}

impl PosterError {
    /// Maps the error onto the reason reported with the placeholder.
    #[must_use]
    pub fn reason(&self) -> PlaceholderReason {
        match self {
            Self::MissingApiKey => PlaceholderReason::MissingApiKey,
            Self::Client(_) | Self::Transport(_) => PlaceholderReason::Transport,
            Self::Http { status } => PlaceholderReason::Http(*status),
            Self::Malformed(_) | Self::InvalidId(_) | Self::InvalidUrl(_) => {
                PlaceholderReason::Malformed
            }
            Self::NoPoster => PlaceholderReason::NoPoster,
        }
    }
}

/// Result type alias for poster lookups.
pub type Result<T> = std::result::Result<T, PosterError>;
