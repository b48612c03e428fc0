//! Text fragment extraction from search result pages.
//!
//! Applies a list of CSS selectors to a raw HTML document and returns the
//! whitespace-normalised text of every matching element, in selector order.

use scraper::{Html, Selector};

/// Substrings marking consent banners and login prompts rather than content.
const BOILERPLATE_MARKERS: &[&str] = &["cookie", "privacy", "sign in"];

/// Extract the text of every element matching any of `selectors`.
///
/// Results are grouped by selector, in the order given. Empty fragments are
/// dropped. A selector that fails to parse is skipped; the rest still run.
pub fn extract_fragments(html: &str, selectors: &[&str]) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut fragments = Vec::new();

    for selector_str in selectors {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(selector = *selector_str, error = ?e, "invalid selector skipped");
                continue;
            }
        };

        for element in document.select(&selector) {
            let text: String = element.text().collect();
            let text = normalise_whitespace(&text);
            if !text.is_empty() {
                fragments.push(text);
            }
        }
    }

    fragments
}

/// Returns `true` if `text` looks like a consent or login banner.
pub fn is_boilerplate(text: &str) -> bool {
    let lower = text.to_lowercase();
    BOILERPLATE_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Collapse all runs of whitespace (including newlines) into single spaces.
pub fn normalise_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
