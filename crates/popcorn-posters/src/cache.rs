use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use popcorn_core::ExternalId;
use tracing::trace;

use crate::resolver::{PosterOutcome, PosterResolver};

/// Memoizes another resolver's outcomes by external id.
///
/// Transient failures are not stored, so a later call retries them.
pub struct CachedPosterResolver<R> {
    inner: R,
    entries: Mutex<HashMap<ExternalId, PosterOutcome>>,
}

impl<R: PosterResolver> CachedPosterResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Number of cached outcomes.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<R: PosterResolver> PosterResolver for CachedPosterResolver<R> {
    fn resolve_poster(&self, external_id: &ExternalId) -> PosterOutcome {
        if let Some(hit) = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(external_id)
        {
            trace!(%external_id, "poster cache hit");
            return hit.clone();
        }

        // Lock released during the lookup; concurrent misses may both fetch.
        let outcome = self.inner.resolve_poster(external_id);
        if !outcome.reason().is_some_and(|r| r.is_transient()) {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(external_id.clone(), outcome.clone());
        }
        outcome
    }
}
