//! Web search provider: scrapes result snippets from a search results page.
//!
//! Issues at most two query variants (the raw query and a recency-augmented
//! one), pausing politely between them. Snippets are pulled with a fixed
//! set of CSS selectors, filtered by length, boilerplate and relevance,
//! ranked, then deduplicated by content prefix so the best-scoring copy of
//! a repeated passage survives.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Datelike;
use url::Url;

use crate::content::{extract_fragments, is_boilerplate};
use crate::http::HttpFetch;
use crate::orchestrator::dedup::dedup_by_prefix;
use crate::orchestrator::rank::sort_by_relevance;
use crate::orchestrator::scoring::RelevanceScorer;
use crate::provider::SourceProvider;
use crate::types::{Candidate, SourceType};

/// Selectors for snippet containers on a results page.
const SNIPPET_SELECTORS: &[&str] = &[
    "div[data-content-feature=\"1\"]",
    "div.BNeawe.aCOpRe",
    "div.BNeawe.s3v9rd",
    "span.aCOpRe",
    "div.VwiC3b",
];

/// Results requested per search page.
const RESULTS_PER_PAGE: &str = "10";

/// Tuning for [`WebSearchProvider`].
#[derive(Debug, Clone)]
pub struct WebSearchSettings {
    /// Search results page URL; the query goes in the `q` parameter.
    pub search_url: String,
    /// Accepted snippet length in characters, `[min, max)`.
    pub snippet_chars: (usize, usize),
    /// Snippets must score strictly above this to survive.
    pub min_relevance: f64,
    /// Pause between successive variant requests.
    pub politeness_delay: Duration,
}

/// [`SourceProvider`] scraping a web search results page.
pub struct WebSearchProvider {
    fetcher: Arc<dyn HttpFetch>,
    settings: WebSearchSettings,
    scorer: RelevanceScorer,
    year: i32,
}

/// A snippet that passed filtering, before becoming a [`Candidate`].
struct Snippet {
    variant: String,
    content: String,
    relevance: f64,
}

impl WebSearchProvider {
    /// Create a provider that augments queries with the current year.
    pub fn new(fetcher: Arc<dyn HttpFetch>, settings: WebSearchSettings) -> Self {
        Self {
            fetcher,
            settings,
            scorer: RelevanceScorer::new(),
            year: chrono::Utc::now().year(),
        }
    }

    /// Override the year used in the augmented query variant.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    fn search_url(&self, variant: &str) -> Option<Url> {
        match Url::parse_with_params(
            &self.settings.search_url,
            &[("q", variant), ("num", RESULTS_PER_PAGE)],
        ) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!(error = %err, "invalid web search URL");
                None
            }
        }
    }

    /// Fetch one variant's results page and return the snippets worth keeping.
    async fn search_variant(&self, query: &str, variant: &str) -> Vec<Snippet> {
        let Some(url) = self.search_url(variant) else {
            return Vec::new();
        };

        let page = match self.fetcher.get(url.as_str()).await {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                tracing::warn!(status = page.status, "web search returned non-success status");
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!(error = %err, "web search request failed");
                return Vec::new();
            }
        };

        let (min_chars, max_chars) = self.settings.snippet_chars;
        extract_fragments(&page.body, SNIPPET_SELECTORS)
            .into_iter()
            .filter(|text| (min_chars..max_chars).contains(&text.chars().count()))
            .filter(|text| !is_boilerplate(text))
            .filter_map(|text| {
                let relevance = self.scorer.score(&text, query);
                (relevance > self.settings.min_relevance).then(|| Snippet {
                    variant: variant.to_owned(),
                    content: text,
                    relevance,
                })
            })
            .collect()
    }
}

/// Query variants tried in order: the raw query, then a recency-augmented one.
pub fn query_variants(query: &str, year: i32) -> Vec<String> {
    vec![
        query.to_owned(),
        format!("{query} {year} latest research"),
    ]
}

#[async_trait]
impl SourceProvider for WebSearchProvider {
    async fn fetch(&self, query: &str, max_results: usize) -> Vec<Candidate> {
        tracing::trace!(query, "web search");

        let mut snippets = Vec::new();
        for (i, variant) in query_variants(query, self.year).iter().enumerate() {
            if i > 0 && !self.settings.politeness_delay.is_zero() {
                tokio::time::sleep(self.settings.politeness_delay).await;
            }
            let found = self.search_variant(query, variant).await;
            tracing::debug!(count = found.len(), "web variant snippets kept");
            snippets.extend(found);
        }

        let mut ranked: Vec<Candidate> = snippets
            .into_iter()
            .map(|s| Candidate::web(&s.variant, s.content, s.relevance))
            .collect();
        sort_by_relevance(&mut ranked);

        let mut candidates = dedup_by_prefix(ranked, |c| c.content.as_str());
        candidates.truncate(max_results);

        tracing::debug!(count = candidates.len(), "web candidates ready");
        candidates
    }

    fn source_type(&self) -> SourceType {
        SourceType::Web
    }
}
