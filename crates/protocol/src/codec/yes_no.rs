//! Yes/No booleans.
//!
//! Capability documents (and a handful of indexers' extension attributes)
//! spell booleans as `yes`/`no` rather than `true`/`false`.

use exn::ResultExt;
use serde::de::{Deserialize, Deserializer, Error as _};

use crate::error::{ErrorKind, Result};

/// Parses a case-insensitive `yes`/`no` token. The literals `true` and
/// `false` are accepted too; anything else (including `1`/`0`) is rejected.
///
/// # Examples
///
/// ```
/// use nabdex_protocol::codec::parse_yes_no;
/// assert_eq!(parse_yes_no("YES").unwrap(), true);
/// assert_eq!(parse_yes_no("false").unwrap(), false);
/// assert!(parse_yes_no("maybe").is_err());
/// ```
pub fn parse_yes_no(value: &str) -> Result<bool> {
    let lowered = value.trim().to_ascii_lowercase();
    let literal = match lowered.as_str() {
        "yes" => "true",
        "no" => "false",
        other => other,
    };
    literal.parse::<bool>().or_raise(|| ErrorKind::BooleanFormat(value.to_string()))
}

/// Serde adapter for XML attributes encoded as yes/no tokens, for use with
/// `#[serde(deserialize_with = "yes_no::deserialize")]`.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_yes_no(&value).map_err(|_| D::Error::custom(format!("invalid yes/no value: '{value}'")))
}
