//! Error types for the search engine.

use thiserror::Error;

/// Errors raised by [`crate::SearchServer`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Document id was negative.
    #[error("document id must be non-negative, got {0}")]
    NegativeId(i64),

    /// Document id already present in the index.
    #[error("document id {0} already exists")]
    DuplicateId(i64),

    /// Text (document content, stop word, or query term) contained a
    /// control byte (value `< 32`).
    #[error("text contains control characters that are not allowed: {0:?}")]
    InvalidCharacters(String),

    /// Query contained a bare `-` or a `--` prefix.
    #[error("query contains an invalid minus-word: {0:?}")]
    InvalidMinusWord(String),

    /// [`crate::SearchServer::match_document`] was called with an id not in
    /// `live_ids`.
    #[error("document id {0} does not exist")]
    UnknownDocument(i64),
}
