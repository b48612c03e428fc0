//! Core research orchestrator: classify, fan out, merge.
//!
//! Classifies the query, launches one unit of work per active provider
//! concurrently under a per-unit deadline, and merges whatever came back
//! into a ranked, size-bounded evidence set.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;

use crate::classifier::QueryClassifier;
use crate::config::ResearchConfig;
use crate::error::ResearchError;
use crate::http::{build_client, HttpFetch, ReqwestFetcher};
use crate::provider::SourceProvider;
use crate::providers::{EncyclopediaProvider, WebSearchProvider, WebSearchSettings, WikipediaClient};
use crate::types::{
    Candidate, Classification, ProviderOutcome, ProviderReport, ResearchResult, SearchDecision,
    SourceType,
};

use super::rank::merge;

/// Drives a research pass for one query at a time.
///
/// A `Researcher` holds immutable configuration, the classifier, and its
/// providers. It keeps no per-query state, so one instance can serve many
/// concurrent [`research`](Self::research) calls; each call owns its own
/// provider futures.
pub struct Researcher {
    config: ResearchConfig,
    classifier: QueryClassifier,
    providers: Vec<Arc<dyn SourceProvider>>,
}

impl Researcher {
    /// Build a researcher with the Wikipedia and web search providers,
    /// sharing one HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if `config` is invalid, or
    /// [`ResearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ResearchConfig) -> Result<Self, ResearchError> {
        config.validate()?;

        let fetcher: Arc<dyn HttpFetch> = Arc::new(ReqwestFetcher::new(build_client(&config)?));

        let wiki = WikipediaClient::new(fetcher.clone(), &config.encyclopedia_base_url);
        let encyclopedia = EncyclopediaProvider::new(
            Arc::new(wiki),
            config.summary_sentences,
            config.min_summary_chars,
        );
        let web = WebSearchProvider::new(
            fetcher,
            WebSearchSettings {
                search_url: config.web_search_url.clone(),
                snippet_chars: config.web_snippet_chars,
                min_relevance: config.min_web_relevance,
                politeness_delay: Duration::from_millis(config.politeness_delay_ms),
            },
        );

        Self::with_providers(config, vec![Arc::new(encyclopedia), Arc::new(web)])
    }

    /// Build a researcher over an explicit provider list.
    ///
    /// At most one provider per [`SourceType`] may be registered. Providers
    /// are kept in source order, encyclopedia first.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if `config` is invalid or two
    /// providers share a source type.
    pub fn with_providers(
        config: ResearchConfig,
        mut providers: Vec<Arc<dyn SourceProvider>>,
    ) -> Result<Self, ResearchError> {
        config.validate()?;

        providers.sort_by_key(|provider| provider.source_type());
        let duplicate: Option<SourceType> = providers
            .windows(2)
            .find(|pair| pair[0].source_type() == pair[1].source_type())
            .map(|pair| pair[0].source_type());
        if let Some(source) = duplicate {
            return Err(ResearchError::Config(format!(
                "duplicate provider for source type {source}"
            )));
        }

        Ok(Self {
            config,
            classifier: QueryClassifier::new(),
            providers,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Classify a query without running any provider.
    pub fn classify(&self, query: &str) -> Classification {
        self.classifier.classify(query)
    }

    /// Research a query and return the ranked evidence set.
    ///
    /// # Pipeline
    ///
    /// 1. Classify the query (skipped when research is disabled)
    /// 2. Return immediately for [`SearchDecision::NoSearch`]
    /// 3. Select the providers the decision activates (at most one per
    ///    source type, encyclopedia first)
    /// 4. Run them concurrently, each under the provider deadline
    /// 5. Merge, stable-sort by relevance, truncate to `max_sources`
    ///
    /// Never fails: a provider that errors, panics, or times out contributes
    /// nothing and is recorded in [`ResearchResult::reports`].
    pub async fn research(&self, query: &str) -> ResearchResult {
        if !self.config.enabled {
            return ResearchResult::without_search(SearchDecision::NoSearch, "research disabled");
        }

        let Classification { decision, reason } = self.classifier.classify(query);
        tracing::trace!(query, "research query");
        tracing::debug!(%decision, reason, "search decision");

        if decision == SearchDecision::NoSearch {
            return ResearchResult::without_search(decision, reason);
        }

        let active: Vec<&Arc<dyn SourceProvider>> = self
            .providers
            .iter()
            .filter(|provider| decision.wants(provider.source_type()))
            .collect();

        let deadline = Duration::from_secs(self.config.provider_timeout_seconds);
        let per_provider = self.config.results_per_provider;

        let units = active
            .into_iter()
            .map(|provider| run_provider(provider.as_ref(), query, per_provider, deadline));
        let outcomes = futures::future::join_all(units).await;

        let (reports, lists): (Vec<ProviderReport>, Vec<Vec<Candidate>>) =
            outcomes.into_iter().unzip();
        let sources = merge(lists, self.config.max_sources);

        let result = ResearchResult {
            decision,
            reason: reason.to_owned(),
            sources,
            reports,
        };
        if result.is_empty() {
            tracing::debug!(%decision, "no evidence gathered");
        } else {
            tracing::debug!(count = result.sources.len(), "evidence set ready");
        }
        result
    }
}

/// Run one provider under `deadline`, turning every failure into an empty list.
async fn run_provider(
    provider: &dyn SourceProvider,
    query: &str,
    max_results: usize,
    deadline: Duration,
) -> (ProviderReport, Vec<Candidate>) {
    let source = provider.source_type();
    let unit = AssertUnwindSafe(provider.fetch(query, max_results)).catch_unwind();

    let (outcome, candidates) = match tokio::time::timeout(deadline, unit).await {
        Ok(Ok(mut candidates)) => {
            candidates.truncate(max_results);
            (
                ProviderOutcome::Completed {
                    count: candidates.len(),
                },
                candidates,
            )
        }
        Ok(Err(_)) => {
            tracing::warn!(provider = %source, "provider panicked");
            (ProviderOutcome::Failed, Vec::new())
        }
        Err(_) => {
            tracing::warn!(provider = %source, timeout_secs = deadline.as_secs(), "provider timed out");
            (ProviderOutcome::TimedOut, Vec::new())
        }
    };

    (ProviderReport { source, outcome }, candidates)
}
