//! Merging provider output into the final evidence set.
//!
//! Concatenates candidate lists in provider order, stable-sorts them by
//! relevance (descending) and truncates. No cross-provider dedup happens
//! here; the web provider already dedups its own snippets.

use crate::types::Candidate;

/// Default size of a final evidence set.
pub const MAX_SOURCES: usize = 5;

/// Merge candidate lists and keep the `limit` most relevant.
///
/// Ties keep their input order, so with encyclopedia results listed before
/// web results an equal score favours the encyclopedia.
pub fn merge(candidate_lists: Vec<Vec<Candidate>>, limit: usize) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = candidate_lists.into_iter().flatten().collect();
    sort_by_relevance(&mut merged);
    merged.truncate(limit);
    merged
}

/// Stable descending sort by relevance score.
pub fn sort_by_relevance(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
}
