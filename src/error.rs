//! Error types for the research engine.
//!
//! Errors only travel inside component boundaries: providers turn every
//! [`ResearchError`] into a skipped item or an empty candidate list, so
//! callers of [`crate::Researcher::research`] never see one.

/// Errors raised by the building blocks of a research pass.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// An outbound HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A response body or selector could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The encyclopedia has no page for the requested title.
    #[error("not found: {0}")]
    NotFound(String),

    /// The encyclopedia title resolves to a disambiguation page.
    #[error("ambiguous title: {0}")]
    Ambiguous(String),

    /// Invalid research configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for research engine results.
pub type Result<T> = std::result::Result<T, ResearchError>;
