//! Protocol Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Protocol-level error *responses* from
//! an indexer are not represented here; see [`crate::nerror`] for those.

use derive_more::{Display, Error};

use crate::nerror::IndexerError;

/// A protocol decoding error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for protocol decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The XML document is too broken to decode.
    #[display("malformed XML in {_0} document")]
    MalformedXml(#[error(not(source))] &'static str),
    /// A date string matched none of the supported formats.
    #[display("failed to parse date '{value}' as one of {formats}")]
    DateFormat {
        /// The rejected input.
        value: String,
        /// Comma-separated list of the formats attempted.
        formats: String,
    },
    /// A boolean was neither a yes/no token nor a boolean literal.
    #[display("invalid yes/no value: '{_0}'")]
    BooleanFormat(#[error(not(source))] String),
    /// The indexer answered with an error document instead of the requested one.
    #[display("indexer responded with {_0}")]
    Indexer(#[error(not(source))] IndexerError),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Documents are decoded from memory; only the indexer itself can
        // change its answer.
        matches!(self, Self::Indexer(err) if err.code() >= 900)
    }
}
