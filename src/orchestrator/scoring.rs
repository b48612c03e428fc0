//! Heuristic relevance scoring of candidate text against a query.
//!
//! Formula: `score = min(1.0, overlap / |query_words| + 0.1 * quality_hits)`
//! where `overlap` counts distinct query words present in the content and
//! `quality_hits` counts quality-indicator keywords found anywhere in the
//! content as substrings.

use std::collections::HashSet;

/// Words suggesting authoritative or research-backed content.
const QUALITY_KEYWORDS: &[&str] = &[
    "official",
    "research",
    "study",
    "analysis",
    "report",
    "data",
    "statistics",
    "expert",
    "professor",
    "scientist",
    "university",
    "institute",
    "journal",
];

/// Boost added per quality keyword present in the content.
const QUALITY_BOOST: f64 = 0.1;

/// Scores content against a query. Stateless; safe to share.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    quality_keywords: &'static [&'static str],
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceScorer {
    /// Create a scorer with the built-in quality vocabulary.
    pub fn new() -> Self {
        Self {
            quality_keywords: QUALITY_KEYWORDS,
        }
    }

    /// Score `content` against `query`, case-insensitively.
    ///
    /// Always returns a value in `[0.0, 1.0]`. A query with no words has a
    /// base score of 0, though quality keywords still contribute.
    pub fn score(&self, content: &str, query: &str) -> f64 {
        let query_lower = query.to_lowercase();
        let content_lower = content.to_lowercase();

        let query_words: HashSet<&str> = query_lower.split_whitespace().collect();
        let content_words: HashSet<&str> = content_lower.split_whitespace().collect();

        let base = if query_words.is_empty() {
            0.0
        } else {
            let overlap = query_words.intersection(&content_words).count();
            overlap as f64 / query_words.len() as f64
        };

        // No cap before the final clamp: every keyword present adds 0.1.
        let quality_hits = self
            .quality_keywords
            .iter()
            .filter(|keyword| content_lower.contains(*keyword))
            .count();
        let boost = quality_hits as f64 * QUALITY_BOOST;

        (base + boost).min(1.0)
    }
}
