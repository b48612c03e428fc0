//! Research orchestrator: scoring, dedup, ranking, and the concurrent fan-out.
//!
//! This module classifies queries, fans out to the active providers
//! concurrently under per-provider deadlines, and merges their candidates
//! into a ranked, size-bounded evidence set. The scoring and dedup helpers
//! are shared with the providers, which rank their own candidates first.

pub mod dedup;
pub mod rank;
pub mod research;
pub mod scoring;
