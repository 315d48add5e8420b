//! Deterministic ordering of similarity candidates.
//!
//! Candidates are ordered by finite score descending, then position
//! ascending. Non-finite scores (NaN, ±inf) sort after every finite score,
//! among themselves by position. This is a total order, so full sorts and
//! partial selections agree on the result.

use std::cmp::Ordering;

use ndarray::ArrayView1;

/// Compares two candidate positions against the same similarity row.
#[must_use]
pub fn compare_candidates(row: &ArrayView1<'_, f64>, a: usize, b: usize) -> Ordering {
    let (score_a, score_b) = (row[a], row[b]);
    let by_score = match (score_a.is_finite(), score_b.is_finite()) {
        (true, true) => score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    };
    by_score.then_with(|| a.cmp(&b))
}

fn candidates(len: usize, query: usize) -> Vec<usize> {
    (0..len).filter(|&i| i != query).collect()
}

/// Ranks every position except `query`. Each appears exactly once.
#[must_use]
pub fn rank_all(row: &ArrayView1<'_, f64>, query: usize) -> Vec<usize> {
    let mut ranked = candidates(row.len(), query);
    ranked.sort_by(|&a, &b| compare_candidates(row, a, b));
    ranked
}

/// Returns the first `k` positions of `rank_all(row, query)`.
///
/// Uses a partial selection so only the head of the ranking gets sorted.
#[must_use]
pub fn select_top_k(row: &ArrayView1<'_, f64>, query: usize, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }

    let mut ranked = candidates(row.len(), query);
    if k < ranked.len() {
        ranked.select_nth_unstable_by(k - 1, |&a, &b| compare_candidates(row, a, b));
        ranked.truncate(k);
    }
    ranked.sort_by(|&a, &b| compare_candidates(row, a, b));
    ranked
}
