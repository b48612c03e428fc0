//! Display summaries of an evidence set.
//!
//! Turns a [`ResearchResult`] into the figures shown alongside a generated
//! answer: how many sources were used, their average relevance, a 1–5
//! quality rating, and a per-source relevance bar.

use serde::Serialize;

use crate::types::{Candidate, ResearchResult, SearchDecision};

/// Cells in a relevance bar.
const BAR_CELLS: usize = 10;

/// Highest quality rating.
const MAX_RATING: u8 = 5;

/// Aggregate view of a research result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceSummary {
    /// Decision taken for the query.
    pub decision: SearchDecision,
    /// Number of sources in the evidence set.
    pub source_count: usize,
    /// Mean relevance across sources, or `None` when there are none.
    pub average_relevance: Option<f64>,
    /// Quality rating from 1 to 5, or `None` when there are no sources.
    pub quality_rating: Option<u8>,
}

impl EvidenceSummary {
    /// Summarise `result`.
    pub fn from_result(result: &ResearchResult) -> Self {
        let average_relevance = average_relevance(&result.sources);
        Self {
            decision: result.decision,
            source_count: result.sources.len(),
            average_relevance,
            quality_rating: average_relevance.map(quality_rating),
        }
    }
}

/// Mean relevance of `sources`.
pub fn average_relevance(sources: &[Candidate]) -> Option<f64> {
    if sources.is_empty() {
        return None;
    }
    let total: f64 = sources.iter().map(|c| c.relevance_score).sum();
    Some(total / sources.len() as f64)
}

/// Map an average relevance in `[0, 1]` to a rating: `min(5, floor(avg * 5) + 1)`.
pub fn quality_rating(average: f64) -> u8 {
    let steps = (average.clamp(0.0, 1.0) * f64::from(MAX_RATING)).floor() as u8;
    (steps + 1).min(MAX_RATING)
}

/// Render a relevance score as a ten-cell bar, e.g. `███████░░░` for 0.7.
pub fn relevance_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 1.0) * BAR_CELLS as f64) as usize).min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}
