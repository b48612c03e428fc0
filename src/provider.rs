//! Trait definition for pluggable evidence sources.
//!
//! The encyclopedia and web providers implement [`SourceProvider`]; the
//! orchestrator holds them as trait objects and never names a concrete type.

use async_trait::async_trait;

use crate::types::{Candidate, SourceType};

/// A source of evidence candidates.
///
/// Implementors handle their own:
///
/// - request construction and transport
/// - parsing and per-item filtering
/// - relevance scoring and ranking of their own candidates
/// - recovery from every failure
///
/// `fetch` is infallible by contract: transport and parse failures are
/// logged and surface only as fewer (or zero) candidates.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Gather up to `max_results` candidates for `query`, best first.
    async fn fetch(&self, query: &str, max_results: usize) -> Vec<Candidate>;

    /// Which [`SourceType`] this provider produces.
    fn source_type(&self) -> SourceType;
}
