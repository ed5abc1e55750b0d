//! Search errors.

/// Errors from the search engine.
///
/// File I/O problems never surface here — unreadable files are skipped.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query did not compile as a regular expression.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
