//! Encyclopedia provider: title search, short summaries, relevance ranking.
//!
//! Over-fetches `2 × max_results` titles, pulls a few-sentence summary for
//! each, drops short summaries, scores the rest against the query and keeps
//! the best. A failure on one title never aborts the others.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ResearchError;
use crate::orchestrator::rank::sort_by_relevance;
use crate::orchestrator::scoring::RelevanceScorer;
use crate::provider::SourceProvider;
use crate::types::{Candidate, SourceType};

/// Titles requested per wanted result.
const OVERFETCH_FACTOR: usize = 2;

/// Lookup capability of an encyclopedia backend.
#[async_trait]
pub trait EncyclopediaLookup: Send + Sync {
    /// Search article titles matching `query`, best match first.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Http`] or [`ResearchError::Parse`] if the
    /// search itself fails.
    async fn search_titles(&self, query: &str, count: usize) -> Result<Vec<String>, ResearchError>;

    /// Plain-text summary of `title`, limited to `sentences` sentences.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::NotFound`] or [`ResearchError::Ambiguous`]
    /// for titles without a usable article, or a transport/parse error.
    async fn summary(&self, title: &str, sentences: u32) -> Result<String, ResearchError>;

    /// Deep link to the article for `title`.
    fn article_url(&self, title: &str) -> String;
}

/// [`SourceProvider`] over any [`EncyclopediaLookup`].
pub struct EncyclopediaProvider {
    lookup: Arc<dyn EncyclopediaLookup>,
    scorer: RelevanceScorer,
    summary_sentences: u32,
    min_summary_chars: usize,
}

impl EncyclopediaProvider {
    /// Create a provider. Summaries shorter than `min_summary_chars`
    /// characters are discarded.
    pub fn new(
        lookup: Arc<dyn EncyclopediaLookup>,
        summary_sentences: u32,
        min_summary_chars: usize,
    ) -> Self {
        Self {
            lookup,
            scorer: RelevanceScorer::new(),
            summary_sentences,
            min_summary_chars,
        }
    }
}

#[async_trait]
impl SourceProvider for EncyclopediaProvider {
    async fn fetch(&self, query: &str, max_results: usize) -> Vec<Candidate> {
        tracing::trace!(query, "encyclopedia search");

        let titles = match self
            .lookup
            .search_titles(query, max_results.saturating_mul(OVERFETCH_FACTOR))
            .await
        {
            Ok(titles) => titles,
            Err(err) => {
                tracing::warn!(error = %err, "encyclopedia title search failed");
                return Vec::new();
            }
        };

        let mut candidates = Vec::with_capacity(titles.len());
        for title in titles {
            let summary = match self.lookup.summary(&title, self.summary_sentences).await {
                Ok(summary) => summary,
                Err(err) => {
                    tracing::debug!(title = %title, error = %err, "summary skipped");
                    continue;
                }
            };

            if summary.chars().count() < self.min_summary_chars {
                tracing::debug!(title = %title, "summary too short");
                continue;
            }

            let relevance = self.scorer.score(&summary, query);
            let url = self.lookup.article_url(&title);
            candidates.push(Candidate::encyclopedia(title, summary, url, relevance));
        }

        sort_by_relevance(&mut candidates);
        candidates.truncate(max_results);

        tracing::debug!(count = candidates.len(), "encyclopedia candidates ready");
        candidates
    }

    fn source_type(&self) -> SourceType {
        SourceType::Encyclopedia
    }
}
