use std::fmt;

use popcorn_core::ExternalId;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PLACEHOLDER_URL;

/// Why a placeholder was returned instead of a poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    /// Lookups are disabled or unconfigured.
    MissingApiKey,
    /// The item has no poster on record.
    NoPoster,
    /// Non-success HTTP status.
    Http(u16),
    /// Connection failure or timeout.
    Transport,
    /// Unexpected response body.
    Malformed,
}

impl PlaceholderReason {
    /// Returns `true` if a later attempt could plausibly succeed.
    #[must_use]
    pub fn is_transient(self) -> bool {
        match self {
            Self::Transport => true,
            Self::Http(status) => status == 429 || status >= 500,
            Self::MissingApiKey | Self::NoPoster | Self::Malformed => false,
        }
    }
}

impl fmt::Display for PlaceholderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "no API key"),
            Self::NoPoster => write!(f, "no poster"),
            Self::Http(status) => write!(f, "HTTP {status}"),
            Self::Transport => write!(f, "network error"),
            Self::Malformed => write!(f, "malformed response"),
        }
    }
}

/// Result of a poster lookup. Always carries a usable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PosterOutcome {
    Found { url: String },
    Placeholder { url: String, reason: PlaceholderReason },
}

impl PosterOutcome {
    /// The URL to display, poster or placeholder.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Found { url } | Self::Placeholder { url, .. } => url,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    #[must_use]
    pub fn reason(&self) -> Option<PlaceholderReason> {
        match self {
            Self::Found { .. } => None,
            Self::Placeholder { reason, .. } => Some(*reason),
        }
    }
}

/// Maps an external id to a display-image URL.
///
/// Implementations must not fail or panic on lookup errors; they return
/// [`PosterOutcome::Placeholder`] instead.
pub trait PosterResolver: Send + Sync {
    fn resolve_poster(&self, external_id: &ExternalId) -> PosterOutcome;
}

impl<R: PosterResolver + ?Sized> PosterResolver for Box<R> {
    fn resolve_poster(&self, external_id: &ExternalId) -> PosterOutcome {
        (**self).resolve_poster(external_id)
    }
}

impl<R: PosterResolver + ?Sized> PosterResolver for &R {
    fn resolve_poster(&self, external_id: &ExternalId) -> PosterOutcome {
        (**self).resolve_poster(external_id)
    }
}

/// Resolver that never touches the network and always returns the placeholder.
#[derive(Debug, Clone)]
pub struct StaticPosterResolver {
    placeholder_url: String,
}

impl StaticPosterResolver {
    #[must_use]
    pub fn new(placeholder_url: impl Into<String>) -> Self {
        Self {
            placeholder_url: placeholder_url.into(),
        }
    }
}

impl Default for StaticPosterResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_URL)
    }
}

impl PosterResolver for StaticPosterResolver {
    fn resolve_poster(&self, _external_id: &ExternalId) -> PosterOutcome {
        PosterOutcome::Placeholder {
            url: self.placeholder_url.clone(),
            reason: PlaceholderReason::MissingApiKey,
        }
    }
}
