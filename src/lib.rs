//! # research-engine
//!
//! Decides whether a natural-language query needs outside information,
//! gathers candidate evidence from an encyclopedia and the web concurrently,
//! and returns a small ranked evidence set for a text generator to use.
//!
//! ## Design
//!
//! - Ordered rule chain classifies each query into a [`SearchDecision`]
//! - Encyclopedia summaries via the MediaWiki API; web snippets scraped
//!   with CSS selectors from a search results page
//! - Providers run concurrently, each under its own deadline
//! - Word-overlap relevance scoring with a quality-keyword boost
//! - Graceful degradation: a failing or slow provider only means fewer
//!   sources, never an error
//!
//! ## Privacy
//!
//! - Nothing is cached or persisted between queries
//! - Queries are logged only at trace level

pub mod classifier;
pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod report;
pub mod types;

pub use classifier::QueryClassifier;
pub use config::ResearchConfig;
pub use error::{ResearchError, Result};
pub use orchestrator::research::Researcher;
pub use orchestrator::scoring::RelevanceScorer;
pub use provider::SourceProvider;
pub use report::EvidenceSummary;
pub use types::{
    Candidate, Classification, ProviderOutcome, ProviderReport, ResearchResult, SearchDecision,
    SourceType,
};

/// Research a query with the given configuration.
///
/// Builds a [`Researcher`] with the Wikipedia and web search providers and
/// runs a single research pass. Reuse a [`Researcher`] directly to share
/// its HTTP client across queries.
///
/// # Errors
///
/// Returns [`ResearchError::Config`] if `config` is invalid. Provider
/// failures never surface here; they only reduce the evidence gathered.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> research_engine::Result<()> {
/// let config = research_engine::ResearchConfig::default();
/// let result = research_engine::research("what is quantum computing", &config).await?;
/// for passage in result.context_passages(3) {
///     println!("{passage}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn research(query: &str, config: &ResearchConfig) -> Result<ResearchResult> {
    let researcher = Researcher::new(config.clone())?;
    Ok(researcher.research(query).await)
}

/// Research a query with the default configuration.
///
/// # Errors
///
/// Same as [`research`].
pub async fn research_default(query: &str) -> Result<ResearchResult> {
    research(query, &ResearchConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn research_validates_config() {
        let config = ResearchConfig {
            max_sources: 0,
            ..Default::default()
        };
        let err = research("what is rust", &config).await.unwrap_err();
        assert!(err.to_string().contains("max_sources"));
    }

    #[tokio::test]
    async fn greeting_needs_no_network() {
        let result = research_default("hello").await.expect("valid config");
        assert_eq!(result.decision, SearchDecision::NoSearch);
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    #[ignore] // Live test: run with `cargo test -- --ignored`
    async fn live_research() {
        let result = research_default("tell me about photosynthesis")
            .await
            .expect("valid config");
        assert_eq!(result.decision, SearchDecision::Both);
        assert!(result.sources.len() <= 5);
        for source in &result.sources {
            assert!(!source.content.is_empty());
            assert!((0.0..=1.0).contains(&source.relevance_score));
        }
    }
}
