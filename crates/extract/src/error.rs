//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use nabdex_protocol::IndexerError;

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The feed document is too broken to read.
    #[display("malformed feed XML")]
    MalformedXml,
    /// The indexer answered with an error document instead of a feed.
    #[display("indexer responded with {_0}")]
    Indexer(#[error(not(source))] IndexerError),
    /// An item carries no enclosure, so there is nothing to download.
    #[display("item has no enclosure")]
    MissingEnclosure,
    /// An enclosure or link could not be parsed as a URL.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// The enclosure points at something that is neither an NZB nor a torrent.
    #[display("unsupported file type: {_0}")]
    UnsupportedFile(#[error(not(source))] String),
    /// An extension attribute carried a value that could not be decoded.
    #[display("invalid value for attribute '{name}': {value}")]
    InvalidAttribute {
        /// The attribute name.
        name: String,
        /// The rejected value.
        value: String,
    },
    /// The file contents have not been attached yet.
    #[display("file contents have not been fetched")]
    NotFetched,
    /// The attached file contents could not be decoded or re-encoded.
    #[display("failed to (un)marshal {_0} contents")]
    Unmarshal(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Indexer(err) => err.code() >= 900,
            // Fetching the file first makes the same call succeed.
            Self::NotFetched => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabdex_protocol::nerror;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::MissingEnclosure.to_string(), "item has no enclosure");
        assert_eq!(
            ErrorKind::UnsupportedFile("http://example.com/file.zip".to_string()).to_string(),
            "unsupported file type: http://example.com/file.zip"
        );
        assert_eq!(
            ErrorKind::InvalidAttribute {
                name: "season".to_string(),
                value: "three".to_string()
            }
            .to_string(),
            "invalid value for attribute 'season': three"
        );
        assert_eq!(
            ErrorKind::Indexer(nerror::lookup(100)).to_string(),
            "indexer responded with newznab error 100: Incorrect user credentials"
        );
    }

    #[test]
    fn error_kind_retryable() {
        assert!(ErrorKind::NotFetched.is_retryable());
        assert!(ErrorKind::Indexer(nerror::lookup(910)).is_retryable());
        assert!(!ErrorKind::Indexer(nerror::lookup(101)).is_retryable());
        assert!(!ErrorKind::Unmarshal("torrent").is_retryable());
    }
}
