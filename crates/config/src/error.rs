//! Configuration Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A source could not be read or its values have the wrong shape.
    #[display("failed to load configuration")]
    Load,
    /// The configuration file has an extension no provider understands.
    #[display("unsupported configuration format: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// Values loaded fine but make no sense together.
    #[display("invalid configuration: {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
