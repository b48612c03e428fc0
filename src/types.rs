//! Core types: search decisions, evidence candidates, and research results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which providers a query warrants, as decided by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDecision {
    /// Answer from internal knowledge; no provider is invoked.
    NoSearch,
    /// Query the encyclopedia only.
    EncyclopediaOnly,
    /// Query the web only.
    WebOnly,
    /// Query both the encyclopedia and the web.
    Both,
}

impl SearchDecision {
    /// Stable identifier used for display and telemetry.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoSearch => "no_search",
            Self::EncyclopediaOnly => "encyclopedia_only",
            Self::WebOnly => "web_only",
            Self::Both => "both",
        }
    }

    /// Source types this decision activates, encyclopedia first.
    pub fn sources(&self) -> &'static [SourceType] {
        match self {
            Self::NoSearch => &[],
            Self::EncyclopediaOnly => &[SourceType::Encyclopedia],
            Self::WebOnly => &[SourceType::Web],
            Self::Both => &[SourceType::Encyclopedia, SourceType::Web],
        }
    }

    /// Returns `true` if providers of `source` should run for this decision.
    pub fn wants(&self, source: SourceType) -> bool {
        self.sources().contains(&source)
    }
}

impl fmt::Display for SearchDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classifier's verdict for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Providers to invoke.
    pub decision: SearchDecision,
    /// Short human-readable label naming the rule that fired.
    pub reason: &'static str,
}

/// Kind of source a candidate came from.
///
/// Ordered encyclopedia first, which is also the order providers run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Encyclopedia article summary.
    Encyclopedia,
    /// Snippet scraped from a web search results page.
    Web,
}

impl SourceType {
    /// Returns the lowercase tag for this source type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Encyclopedia => "encyclopedia",
            Self::Web => "web",
        }
    }

    /// Fixed reliability prior for candidates of this type.
    pub fn reliability(&self) -> f64 {
        match self {
            Self::Encyclopedia => 0.9,
            Self::Web => 0.75,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One retrieved unit of evidence.
///
/// Constructors clamp `relevance_score` into `[0.0, 1.0]` and take the
/// reliability prior from the [`SourceType`]. Providers reject short or
/// boilerplate text before a candidate is ever built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Where this candidate came from.
    pub source_type: SourceType,
    /// Display label. Web candidates are labelled with the query variant used.
    pub title: String,
    /// Extracted text.
    pub content: String,
    /// Deep link, present for encyclopedia candidates only.
    pub url: Option<String>,
    /// Static prior for the source type.
    pub reliability_score: f64,
    /// Heuristic match against the query, always within `[0.0, 1.0]`.
    pub relevance_score: f64,
}

impl Candidate {
    /// Build an encyclopedia candidate.
    pub fn encyclopedia(
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
        relevance: f64,
    ) -> Self {
        Self {
            source_type: SourceType::Encyclopedia,
            title: title.into(),
            content: content.into(),
            url: Some(url.into()),
            reliability_score: SourceType::Encyclopedia.reliability(),
            relevance_score: clamp_unit(relevance),
        }
    }

    /// Build a web candidate labelled with the query variant that found it.
    pub fn web(variant: &str, content: impl Into<String>, relevance: f64) -> Self {
        Self {
            source_type: SourceType::Web,
            title: format!("Web Source ({variant})"),
            content: content.into(),
            url: None,
            reliability_score: SourceType::Web.reliability(),
            relevance_score: clamp_unit(relevance),
        }
    }
}

/// Clamp to the unit interval; NaN maps to 0.
fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// How a single provider's unit of work ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ProviderOutcome {
    /// The provider returned within its deadline (possibly with nothing).
    Completed {
        /// Number of candidates contributed.
        count: usize,
    },
    /// The deadline expired; the provider contributed nothing.
    TimedOut,
    /// The provider panicked; it contributed nothing.
    Failed,
}

/// Per-provider record attached to a [`ResearchResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderReport {
    /// Which provider ran.
    pub source: SourceType,
    /// How it finished.
    pub outcome: ProviderOutcome,
}

/// The evidence set produced for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    /// The decision actually taken.
    pub decision: SearchDecision,
    /// Why that decision was taken.
    pub reason: String,
    /// Ranked candidates, at most five by default. May be empty for any decision.
    pub sources: Vec<Candidate>,
    /// One entry per provider invoked, in invocation order.
    pub reports: Vec<ProviderReport>,
}

impl ResearchResult {
    /// A result for which no provider was invoked.
    pub fn without_search(decision: SearchDecision, reason: impl Into<String>) -> Self {
        Self {
            decision,
            reason: reason.into(),
            sources: Vec::new(),
            reports: Vec::new(),
        }
    }

    /// Returns `true` if no evidence was gathered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Render the top `limit` sources as context lines for a text generator.
    ///
    /// Each line reads `Source N [type]: content`, numbered from 1.
    pub fn context_passages(&self, limit: usize) -> Vec<String> {
        self.sources
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, source)| {
                format!("Source {} [{}]: {}", i + 1, source.source_type, source.content)
            })
            .collect()
    }
}
