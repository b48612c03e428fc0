//! Research configuration with sensible defaults.
//!
//! [`ResearchConfig`] controls result counts, timeouts, politeness delays,
//! content filters and the endpoints the providers talk to. The defaults
//! match the behaviour the engine was tuned for; every field can be
//! overridden from TOML.

use serde::Deserialize;
use url::Url;

use crate::error::ResearchError;
use crate::orchestrator::rank::MAX_SOURCES;

/// Configuration for a [`crate::Researcher`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// When `false`, every query yields `NoSearch` without classification.
    pub enabled: bool,
    /// Maximum number of candidates in a final evidence set, at most
    /// [`MAX_SOURCES`].
    pub max_sources: usize,
    /// Candidates requested from each provider, at most [`MAX_SOURCES`].
    pub results_per_provider: usize,
    /// Deadline for one provider's whole unit of work, in seconds.
    pub provider_timeout_seconds: u64,
    /// Per-request HTTP timeout, in seconds.
    pub request_timeout_seconds: u64,
    /// Delay between successive web query variants, in milliseconds.
    pub politeness_delay_ms: u64,
    /// Sentences requested for each encyclopedia summary.
    pub summary_sentences: u32,
    /// Encyclopedia summaries shorter than this many characters are dropped.
    pub min_summary_chars: usize,
    /// Accepted web snippet length in characters, `[min, max)`.
    pub web_snippet_chars: (usize, usize),
    /// Web snippets scoring at or below this relevance are dropped.
    pub min_web_relevance: f64,
    /// Base URL of the MediaWiki site used as the encyclopedia.
    pub encyclopedia_base_url: String,
    /// Search results page used by the web provider.
    pub web_search_url: String,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_sources: MAX_SOURCES,
            results_per_provider: 3,
            provider_timeout_seconds: 15,
            request_timeout_seconds: 8,
            politeness_delay_ms: 1000,
            summary_sentences: 4,
            min_summary_chars: 100,
            web_snippet_chars: (150, 500),
            min_web_relevance: 0.2,
            encyclopedia_base_url: "https://en.wikipedia.org".into(),
            web_search_url: "https://www.google.com/search".into(),
            user_agent: None,
        }
    }
}

impl ResearchConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if the TOML is malformed or the
    /// resulting configuration fails [`validate`](Self::validate).
    pub fn from_toml_str(raw: &str) -> Result<Self, ResearchError> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| ResearchError::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    pub fn validate(&self) -> Result<(), ResearchError> {
        if self.max_sources == 0 {
            return Err(ResearchError::Config(
                "max_sources must be greater than 0".into(),
            ));
        }
        if self.max_sources > MAX_SOURCES {
            return Err(ResearchError::Config(format!(
                "max_sources must be at most {MAX_SOURCES}"
            )));
        }
        if self.results_per_provider == 0 {
            return Err(ResearchError::Config(
                "results_per_provider must be greater than 0".into(),
            ));
        }
        if self.results_per_provider > MAX_SOURCES {
            return Err(ResearchError::Config(format!(
                "results_per_provider must be at most {MAX_SOURCES}"
            )));
        }
        if self.provider_timeout_seconds == 0 {
            return Err(ResearchError::Config(
                "provider_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ResearchError::Config(
                "request_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.summary_sentences == 0 {
            return Err(ResearchError::Config(
                "summary_sentences must be greater than 0".into(),
            ));
        }
        if self.web_snippet_chars.0 >= self.web_snippet_chars.1 {
            return Err(ResearchError::Config(
                "web_snippet_chars min must be < max".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_web_relevance) {
            return Err(ResearchError::Config(
                "min_web_relevance must be within [0, 1]".into(),
            ));
        }
        Url::parse(&self.encyclopedia_base_url).map_err(|e| {
            ResearchError::Config(format!("invalid encyclopedia_base_url: {e}"))
        })?;
        Url::parse(&self.web_search_url)
            .map_err(|e| ResearchError::Config(format!("invalid web_search_url: {e}")))?;
        Ok(())
    }
}
