//! Multi-format timestamp parsing.
//!
//! Indexers disagree on how to write a timestamp: feed items use the RSS
//! flavour of RFC 1123 with a numeric offset, while some extension attributes
//! and capability documents use RFC 3339. Both are tried in a fixed order.

use std::fmt::{Display, Formatter, Result as FmtResult};

use exn::ResultExt;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// `Mon, 02 Jan 2006 15:04:05 -0700`
const RFC1123Z: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

/// A timestamp layout accepted by [`parse_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    /// `2006-01-02T15:04:05+07:00`
    Rfc3339,
    /// `Mon, 02 Jan 2006 15:04:05 -0700`
    Rfc1123Z,
}
impl TimeFormat {
    /// Candidate formats, in the order they are attempted.
    pub const ALL: [TimeFormat; 2] = [TimeFormat::Rfc3339, TimeFormat::Rfc1123Z];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFormat::Rfc3339 => "RFC3339",
            TimeFormat::Rfc1123Z => "RFC1123Z",
        }
    }

    /// Parses `value` using only this format. The offset written in the input
    /// is kept as-is.
    pub fn parse(&self, value: &str) -> std::result::Result<OffsetDateTime, time::error::Parse> {
        match self {
            TimeFormat::Rfc3339 => OffsetDateTime::parse(value, &Rfc3339),
            TimeFormat::Rfc1123Z => OffsetDateTime::parse(value, RFC1123Z),
        }
    }
}
impl Display for TimeFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Parses a timestamp, trying each of [`TimeFormat::ALL`] in order and
/// returning the first success.
///
/// # Errors
///
/// Returns [`ErrorKind::DateFormat`] naming the input and every attempted
/// format when none of them match.
///
/// # Examples
///
/// ```
/// use nabdex_protocol::codec::parse_date;
/// let date = parse_date("Tue, 15 Nov 2011 04:11:47 +0000").unwrap();
/// assert_eq!(date.year(), 2011);
/// assert!(parse_date("last tuesday").is_err());
/// ```
#[instrument(level = "trace")]
pub fn parse_date(value: &str) -> Result<OffsetDateTime> {
    let value = value.trim();
    let mut last = None;
    for format in TimeFormat::ALL {
        match format.parse(value) {
            Ok(parsed) => return Ok(parsed),
            Err(err) => last = Some(err),
        }
    }
    let formats = TimeFormat::ALL.iter().map(TimeFormat::as_str).collect::<Vec<_>>().join(", ");
    let kind = ErrorKind::DateFormat {
        value: value.to_string(),
        formats,
    };
    match last {
        Some(err) => Err(err).or_raise(|| kind),
        None => exn::bail!(kind),
    }
}
