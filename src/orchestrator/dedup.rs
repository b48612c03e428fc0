//! Content-prefix deduplication for scraped snippets.
//!
//! Two snippets are treated as duplicates when the first
//! [`PREFIX_CHARS`] characters of their trimmed content are equal (case
//! preserved). Distinct snippets sharing a prefix collapse too; that is
//! the intended heuristic, as search pages repeat the same passage with
//! different trailing text.

use std::collections::HashSet;

/// Number of leading characters compared.
pub const PREFIX_CHARS: usize = 100;

/// Returns the deduplication key for `content`.
pub fn prefix_key(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.char_indices().nth(PREFIX_CHARS) {
        Some((end, _)) => &trimmed[..end],
        None => trimmed,
    }
}

/// Keep the first item for every distinct content prefix, preserving order.
pub fn dedup_by_prefix<T, F>(items: Vec<T>, content: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(prefix_key(content(item)).to_owned()))
        .collect()
}
