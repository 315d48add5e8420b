use popcorn_core::{ExternalId, Recommendation, Recommender};
use popcorn_posters::{PosterOutcome, PosterResolver};
use serde::Serialize;
use tracing::debug;

/// A recommendation ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosterCard {
    pub title: String,
    pub external_id: ExternalId,
    pub score: f64,
    pub poster: PosterOutcome,
}

impl PosterCard {
    #[must_use]
    pub fn new(rec: Recommendation, poster: PosterOutcome) -> Self {
        Self {
            title: rec.title,
            external_id: rec.external_id,
            score: rec.score,
            poster,
        }
    }

    #[must_use]
    pub fn poster_url(&self) -> &str {
        self.poster.url()
    }
}

/// Recommends up to `k` titles and resolves one poster per result, in rank order.
///
/// Returns an empty list for a blank or unknown title.
pub fn showcase<R: PosterResolver + ?Sized>(
    engine: &Recommender,
    posters: &R,
    title: &str,
    k: usize,
) -> Vec<PosterCard> {
    let cards: Vec<PosterCard> = engine
        .recommend(title, k)
        .into_iter()
        .map(|rec| {
            let poster = posters.resolve_poster(&rec.external_id);
            PosterCard::new(rec, poster)
        })
        .collect();
    debug!(title, count = cards.len(), "showcase built");
    cards
}
