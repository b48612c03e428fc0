//! Evidence source implementations.
//!
//! Each module provides a [`crate::provider::SourceProvider`] (or a backend
//! one builds on) for a specific kind of source.

pub mod encyclopedia;
pub mod web;
pub mod wikipedia;

pub use encyclopedia::{EncyclopediaLookup, EncyclopediaProvider};
pub use web::{WebSearchProvider, WebSearchSettings};
pub use wikipedia::WikipediaClient;
