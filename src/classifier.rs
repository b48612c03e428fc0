//! Rule-based query classification: should this query trigger a search?
//!
//! The rules form an ordered chain; the first rule that matches decides.
//! Trigger phrases are matched as substrings of the lowercased query, not
//! on word boundaries, so `"know"` counts as containing `"now"`.

use crate::types::{Classification, SearchDecision};

/// Whole-query greetings that never warrant a search.
const BASIC_GREETINGS: &[&str] = &[
    "hello",
    "hi",
    "thanks",
    "goodbye",
    "how are you",
    "good morning",
    "good evening",
];

/// Phrases marking a factual question.
const FACTUAL_TRIGGERS: &[&str] = &[
    "who is",
    "who was",
    "what is",
    "what was",
    "where is",
    "where was",
    "when did",
    "when was",
    "how did",
    "how does",
    "tell me about",
    "explain",
    "describe",
    "define",
    "meaning of",
];

/// Keywords asking for up-to-date information.
const RECENCY_KEYWORDS: &[&str] = &["latest", "recent", "current", "today", "now", "2024", "2025"];

/// Keywords asking for comparison or deeper research.
const RESEARCH_KEYWORDS: &[&str] = &[
    "compare",
    "analysis",
    "difference",
    "versus",
    "vs",
    "research",
];

/// Minimum word count for a query with no trigger to still get an
/// encyclopedia lookup.
const MIN_SEARCH_WORDS: usize = 3;

/// Decides which providers a query warrants.
///
/// Trigger tables are fixed at construction and never mutated, so a
/// classifier can be shared freely between concurrent research calls.
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    greetings: &'static [&'static str],
    factual: &'static [&'static str],
    recency: &'static [&'static str],
    research: &'static [&'static str],
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryClassifier {
    /// Create a classifier with the built-in trigger tables.
    pub fn new() -> Self {
        Self {
            greetings: BASIC_GREETINGS,
            factual: FACTUAL_TRIGGERS,
            recency: RECENCY_KEYWORDS,
            research: RESEARCH_KEYWORDS,
        }
    }

    /// Classify a query. Pure and deterministic.
    pub fn classify(&self, query: &str) -> Classification {
        let normalised = query.trim().to_lowercase();

        if self.greetings.contains(&normalised.as_str()) {
            return verdict(SearchDecision::NoSearch, "basic greeting");
        }

        let recent = contains_any(&normalised, self.recency);

        if contains_any(&normalised, self.factual) {
            return if recent {
                verdict(SearchDecision::Both, "current factual information needed")
            } else {
                verdict(
                    SearchDecision::Both,
                    "comprehensive factual information needed",
                )
            };
        }

        if recent {
            return verdict(SearchDecision::WebOnly, "current information needed");
        }

        if contains_any(&normalised, self.research) {
            return verdict(SearchDecision::Both, "comprehensive research needed");
        }

        if normalised.split_whitespace().count() >= MIN_SEARCH_WORDS {
            return verdict(
                SearchDecision::EncyclopediaOnly,
                "general information search",
            );
        }

        verdict(SearchDecision::NoSearch, "simple query")
    }
}

fn verdict(decision: SearchDecision, reason: &'static str) -> Classification {
    Classification { decision, reason }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
