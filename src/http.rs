//! Shared HTTP client and the fetch capability providers build on.
//!
//! [`build_client`] returns a [`reqwest::Client`] with browser-like
//! headers, cookie support and a rotating User-Agent. One client is built
//! per [`crate::Researcher`] and shared read-only by its providers; it
//! carries no per-query state.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::config::ResearchConfig;
use crate::error::ResearchError;

/// Realistic browser User-Agent strings, rotated per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// A fetched response: status code and body text.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl FetchedPage {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal GET capability used by the providers.
///
/// A non-success status is not an error; it is reported in
/// [`FetchedPage::status`] for the caller to decide.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Fetch `url` with the implementation's headers and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Http`] on connection failure, timeout, or
    /// an unreadable body.
    async fn get(&self, url: &str) -> Result<FetchedPage, ResearchError>;
}

/// [`HttpFetch`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Wrap an existing client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<FetchedPage, ResearchError> {
        tracing::trace!(url, "HTTP GET");

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/json")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| ResearchError::Http(format!("request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ResearchError::Http(format!("response read failed: {e}")))?;

        tracing::trace!(status, bytes = body.len(), "HTTP response received");
        Ok(FetchedPage { status, body })
    }
}

/// Build a [`reqwest::Client`] configured for research requests.
///
/// The client has:
/// - Cookie store enabled (for consent pages)
/// - Per-request timeout from config
/// - Random User-Agent from the built-in rotation list (or custom if configured)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`ResearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ResearchConfig) -> Result<reqwest::Client, ResearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ResearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array; choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&ResearchConfig::default()).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = ResearchConfig {
            user_agent: Some("ResearchBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn success_range() {
        let ok = FetchedPage {
            status: 204,
            body: String::new(),
        };
        let not_ok = FetchedPage {
            status: 429,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!not_ok.is_success());
    }

    #[tokio::test]
    async fn fetcher_reports_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/limited"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = build_client(&ResearchConfig::default()).expect("client");
        let fetcher = ReqwestFetcher::new(client);

        let page = fetcher
            .get(&format!("{}/page", server.uri()))
            .await
            .expect("fetch");
        assert!(page.is_success());
        assert_eq!(page.body, "<p>hi</p>");

        let limited = fetcher
            .get(&format!("{}/limited", server.uri()))
            .await
            .expect("fetch");
        assert_eq!(limited.status, 429);
        assert!(!limited.is_success());
    }

    #[tokio::test]
    async fn fetcher_connection_failure_is_http_error() {
        let client = build_client(&ResearchConfig::default()).expect("client");
        let fetcher = ReqwestFetcher::new(client);
        // Port 1 on loopback is not listening.
        let err = fetcher.get("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, ResearchError::Http(_)));
    }
}
