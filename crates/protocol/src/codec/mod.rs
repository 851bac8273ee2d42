//! Codecs for the non-standard scalar encodings used throughout the protocol.

pub mod date;
pub mod yes_no;

pub use self::date::{TimeFormat, parse_date};
pub use self::yes_no::parse_yes_no;
