//! Wikipedia backend for the encyclopedia provider.
//!
//! Talks to the MediaWiki action API of any wiki at the configured base
//! URL: `action=opensearch` for titles and `action=query&prop=extracts`
//! for plain-text intro summaries.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::content::normalise_whitespace;
use crate::error::ResearchError;
use crate::http::HttpFetch;

use super::encyclopedia::EncyclopediaLookup;

/// MediaWiki API client.
pub struct WikipediaClient {
    fetcher: Arc<dyn HttpFetch>,
    base_url: String,
}

impl WikipediaClient {
    /// Create a client for the wiki at `base_url` (e.g. `https://en.wikipedia.org`).
    pub fn new(fetcher: Arc<dyn HttpFetch>, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn api_url(&self, params: &[(&str, &str)]) -> Result<Url, ResearchError> {
        Url::parse_with_params(&format!("{}/w/api.php", self.base_url), params)
            .map_err(|e| ResearchError::Parse(format!("invalid API URL: {e}")))
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value, ResearchError> {
        let page = self.fetcher.get(url.as_str()).await?;
        if !page.is_success() {
            return Err(ResearchError::Http(format!(
                "encyclopedia API returned status {}",
                page.status
            )));
        }
        serde_json::from_str(&page.body)
            .map_err(|e| ResearchError::Parse(format!("invalid encyclopedia JSON: {e}")))
    }
}

/// `action=query` response body (formatversion 2).
#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

#[async_trait]
impl EncyclopediaLookup for WikipediaClient {
    async fn search_titles(&self, query: &str, count: usize) -> Result<Vec<String>, ResearchError> {
        let limit = count.to_string();
        let url = self.api_url(&[
            ("action", "opensearch"),
            ("search", query),
            ("limit", &limit),
            ("namespace", "0"),
            ("format", "json"),
        ])?;

        let body = self.get_json(url).await?;
        parse_opensearch(&body)
    }

    async fn summary(&self, title: &str, sentences: u32) -> Result<String, ResearchError> {
        let sentences = sentences.to_string();
        let url = self.api_url(&[
            ("action", "query"),
            ("prop", "extracts|pageprops"),
            ("ppprop", "disambiguation"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("exsentences", &sentences),
            ("redirects", "1"),
            ("titles", title),
            ("format", "json"),
            ("formatversion", "2"),
        ])?;

        let body = self.get_json(url).await?;
        parse_summary(body, title)
    }

    fn article_url(&self, title: &str) -> String {
        format!("{}/wiki/{}", self.base_url, title.replace(' ', "_"))
    }
}

/// Titles from an opensearch response: `[query, [titles], [descriptions], [urls]]`.
fn parse_opensearch(body: &serde_json::Value) -> Result<Vec<String>, ResearchError> {
    let titles = body
        .get(1)
        .and_then(|v| v.as_array())
        .ok_or_else(|| ResearchError::Parse("opensearch response missing titles".into()))?;

    Ok(titles
        .iter()
        .filter_map(|t| t.as_str())
        .map(str::to_owned)
        .collect())
}

fn parse_summary(body: serde_json::Value, title: &str) -> Result<String, ResearchError> {
    let response: QueryResponse = serde_json::from_value(body)
        .map_err(|e| ResearchError::Parse(format!("unexpected query response: {e}")))?;

    let page = response
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(|| ResearchError::NotFound(title.to_owned()))?;

    if page.missing || page.invalid {
        return Err(ResearchError::NotFound(title.to_owned()));
    }
    if page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.disambiguation.is_some())
    {
        return Err(ResearchError::Ambiguous(title.to_owned()));
    }

    let text = normalise_whitespace(page.extract.as_deref().unwrap_or_default());
    if text.is_empty() {
        return Err(ResearchError::NotFound(title.to_owned()));
    }
    Ok(text)
}
