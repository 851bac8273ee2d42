//! Protocol error responses.
//!
//! An indexer reports failures with an `<error code=".." description=".."/>`
//! document. The code space is bucketed: 1xx are account errors, 2xx API-call
//! errors, 3xx content errors and 9xx everything else. Codes with a published
//! meaning resolve to an [`NError`]; any other code resolves to the
//! [`NErrorRange`] it falls in, keeping the code that was actually sent.

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

use derive_more::{Display, Error};

/// An error with a published code and description.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[display("newznab error {code}: {description}")]
pub struct NError {
    pub code: u32,
    pub description: &'static str,
}

impl NError {
    pub const INCORRECT_USER_CREDENTIALS: Self = Self::new(100, "Incorrect user credentials");
    pub const ACCOUNT_SUSPENDED: Self = Self::new(101, "Account suspended");
    pub const INSUFFICIENT_PRIVILEGES: Self = Self::new(102, "Insufficient privileges/not authorized");
    pub const REGISTRATION_DENIED: Self = Self::new(103, "Registration denied");
    pub const REGISTRATIONS_CLOSED: Self = Self::new(104, "Registrations are closed");
    pub const EMAIL_TAKEN: Self = Self::new(105, "Invalid registration (Email Address Taken)");
    pub const EMAIL_BAD_FORMAT: Self = Self::new(106, "Invalid registration (Email Address Bad Format)");
    pub const REGISTRATION_FAILED: Self = Self::new(107, "Registration Failed (Data error)");
    pub const MISSING_PARAMETER: Self = Self::new(200, "Missing parameter");
    pub const INCORRECT_PARAMETER: Self = Self::new(201, "Incorrect parameter");
    pub const NO_SUCH_FUNCTION: Self = Self::new(202, "No such function. (Function not defined in this specification)");
    pub const FUNCTION_NOT_AVAILABLE: Self =
        Self::new(203, "Function not available. (Optional function is not implemented)");
    pub const NO_SUCH_ITEM: Self = Self::new(300, "No such item");
    pub const ITEM_ALREADY_EXISTS: Self = Self::new(310, "Item already exists");
    pub const UNKNOWN_ERROR: Self = Self::new(900, "Unknown error");
    pub const API_DISABLED: Self = Self::new(910, "API Disabled");

    pub const ALL: &'static [NError] = &[
        Self::INCORRECT_USER_CREDENTIALS,
        Self::ACCOUNT_SUSPENDED,
        Self::INSUFFICIENT_PRIVILEGES,
        Self::REGISTRATION_DENIED,
        Self::REGISTRATIONS_CLOSED,
        Self::EMAIL_TAKEN,
        Self::EMAIL_BAD_FORMAT,
        Self::REGISTRATION_FAILED,
        Self::MISSING_PARAMETER,
        Self::INCORRECT_PARAMETER,
        Self::NO_SUCH_FUNCTION,
        Self::FUNCTION_NOT_AVAILABLE,
        Self::NO_SUCH_ITEM,
        Self::ITEM_ALREADY_EXISTS,
        Self::UNKNOWN_ERROR,
        Self::API_DISABLED,
    ];

    const fn new(code: u32, description: &'static str) -> Self {
        Self { code, description }
    }
}

/// A bucket of the code space, carrying the specific code that landed in it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NErrorRange {
    pub min: u32,
    pub max: u32,
    pub description: &'static str,
    pub code: u32,
}

impl NErrorRange {
    pub const ACCOUNT: Self = Self::new(100, 199, "Account/user credentials specific error");
    pub const API_CALL: Self = Self::new(200, 299, "API-call specific error");
    pub const CONTENT: Self = Self::new(300, 399, "Content specific error");
    pub const OTHER_ERROR: Self = Self::new(900, 999, "Other error");
    /// Catch-all for codes outside every published bucket.
    pub const OTHER: Self = Self::new(0, u32::MAX, "Unrecognised error");

    /// Published buckets, in matching order.
    pub const ALL: &'static [NErrorRange] = &[Self::ACCOUNT, Self::API_CALL, Self::CONTENT, Self::OTHER_ERROR];

    const fn new(min: u32, max: u32, description: &'static str) -> Self {
        Self { min, max, description, code: 0 }
    }

    pub fn contains(&self, code: u32) -> bool {
        (self.min..=self.max).contains(&code)
    }

    /// Whether this is the catch-all bucket rather than a published one.
    pub fn is_other(&self) -> bool {
        self.min == Self::OTHER.min && self.max == Self::OTHER.max
    }

    fn with_code(self, code: u32) -> Self {
        Self { code, ..self }
    }
}
impl Display for NErrorRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_other() {
            write!(f, "unrecognised newznab error code {}", self.code)
        } else {
            write!(
                f,
                "newznab error {}: unlabelled {} (range {}-{})",
                self.code,
                self.description.to_lowercase(),
                self.min,
                self.max
            )
        }
    }
}

/// Any error an indexer can respond with.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexerError {
    #[display("{_0}")]
    Known(#[error(not(source))] NError),
    #[display("{_0}")]
    Unlabelled(#[error(not(source))] NErrorRange),
}

impl IndexerError {
    /// The code the indexer sent.
    pub fn code(&self) -> u32 {
        match self {
            Self::Known(err) => err.code,
            Self::Unlabelled(range) => range.code,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Known(err) => err.description,
            Self::Unlabelled(range) => range.description,
        }
    }

    /// Whether the code has a published meaning of its own.
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}
impl From<NError> for IndexerError {
    fn from(err: NError) -> Self {
        Self::Known(err)
    }
}
impl From<NErrorRange> for IndexerError {
    fn from(range: NErrorRange) -> Self {
        Self::Unlabelled(range)
    }
}

static KNOWN: LazyLock<HashMap<u32, NError>> =
    LazyLock::new(|| NError::ALL.iter().map(|err| (err.code, *err)).collect());

/// Resolves a code to its published error, falling back to its range.
///
/// # Examples
///
/// ```
/// use nabdex_protocol::nerror::{self, IndexerError, NError};
/// assert_eq!(nerror::lookup(102), IndexerError::Known(NError::INSUFFICIENT_PRIVILEGES));
/// assert_eq!(nerror::lookup(250).description(), "API-call specific error");
/// ```
pub fn lookup(code: u32) -> IndexerError {
    match KNOWN.get(&code) {
        Some(err) => IndexerError::Known(*err),
        None => IndexerError::Unlabelled(range_lookup(code)),
    }
}

/// Finds the first published range containing `code`, or [`NErrorRange::OTHER`].
pub fn range_lookup(code: u32) -> NErrorRange {
    NErrorRange::ALL
        .iter()
        .find(|range| range.contains(code))
        .copied()
        .unwrap_or(NErrorRange::OTHER)
        .with_code(code)
}
