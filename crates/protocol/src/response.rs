//! Small response documents returned by the account and cart functions, plus
//! detection of error documents.

use exn::{OptionExt, ResultExt};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::nerror::{self, IndexerError};

/// `<error code=".." description=".."/>`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDocument {
    #[serde(rename = "@code")]
    pub code: u32,
    #[serde(rename = "@description", default)]
    pub description: String,
}

impl ErrorDocument {
    pub fn from_xml(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml).or_raise(|| ErrorKind::MalformedXml("error"))
    }

    /// Resolves the code through the error taxonomy. The description sent by
    /// the indexer is informational only.
    pub fn into_error(self) -> IndexerError {
        nerror::lookup(self.code)
    }
}

/// Response to `t=register`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Register {
    #[serde(rename = "@username", default)]
    pub username: String,
    #[serde(rename = "@password", default)]
    pub password: String,
    #[serde(rename = "@apikey", default)]
    pub api_key: String,
}

/// Response to `t=cartadd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CartAdd {
    #[serde(rename = "@id")]
    pub id: i64,
}

/// Response to `t=cartdel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CartDel {
    #[serde(rename = "@id")]
    pub id: i64,
}

/// Response to `t=commentadd`; `id` is the new comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CommentAdd {
    #[serde(rename = "@id")]
    pub id: i64,
}

impl Register {
    pub fn from_xml(xml: &str) -> Result<Self> {
        decode(xml, "register")
    }
}
impl CartAdd {
    pub fn from_xml(xml: &str) -> Result<Self> {
        decode(xml, "cartadd")
    }
}
impl CartDel {
    pub fn from_xml(xml: &str) -> Result<Self> {
        decode(xml, "cartdel")
    }
}
impl CommentAdd {
    pub fn from_xml(xml: &str) -> Result<Self> {
        decode(xml, "commentadd")
    }
}

#[instrument(level = "trace", skip(xml), fields(xml_size = xml.len()))]
fn decode<T: DeserializeOwned>(xml: &str, document: &'static str) -> Result<T> {
    if let Some(err) = check(xml)? {
        exn::bail!(ErrorKind::Indexer(err));
    }
    quick_xml::de::from_str(xml).or_raise(|| ErrorKind::MalformedXml(document))
}

/// Inspects the root element of any response and returns the indexer error it
/// carries, if it is an error document. Only the root is examined, so a
/// document that is otherwise malformed is left for its own decoder to reject.
///
/// # Examples
///
/// ```
/// use nabdex_protocol::response;
/// let err = response::check(r#"<error code="910" description="API Disabled"/>"#).unwrap();
/// assert_eq!(err.map(|err| err.code()), Some(910));
/// assert!(response::check("<caps/>").unwrap().is_none());
/// ```
#[instrument(level = "trace", skip(xml))]
pub fn check(xml: &str) -> Result<Option<IndexerError>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event().or_raise(|| ErrorKind::MalformedXml("response"))? {
            Event::Start(e) | Event::Empty(e) => {
                if e.name().as_ref() != b"error" {
                    return Ok(None);
                }
                let mut code = None;
                for attr in e.attributes() {
                    let attr = attr.or_raise(|| ErrorKind::MalformedXml("error"))?;
                    if attr.key.as_ref() == b"code" {
                        let value = attr
                            .decode_and_unescape_value(reader.decoder())
                            .or_raise(|| ErrorKind::MalformedXml("error"))?;
                        code = Some(value.trim().parse::<u32>().or_raise(|| ErrorKind::MalformedXml("error"))?);
                    }
                }
                let code = code.ok_or_raise(|| ErrorKind::MalformedXml("error"))?;
                return Ok(Some(nerror::lookup(code)));
            },
            Event::Eof => return Ok(None),
            _ => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nerror::{NError, NErrorRange};

    #[test]
    fn decodes_error_document() {
        let doc = ErrorDocument::from_xml(include_str!("../fixtures/unauthorized.xml")).unwrap();
        assert_eq!(doc.code, 100);
        assert_eq!(doc.description, "Incorrect user credentials");
        assert_eq!(doc.into_error(), IndexerError::Known(NError::INCORRECT_USER_CREDENTIALS));
    }

    #[test]
    fn check_finds_error_roots() {
        let err = check(include_str!("../fixtures/unauthorized.xml")).unwrap();
        assert_eq!(err, Some(NError::INCORRECT_USER_CREDENTIALS.into()));

        let err = check(r#"<error code="250" description="whatever"></error>"#).unwrap().unwrap();
        assert_eq!(err, IndexerError::Unlabelled(range_with_code(NErrorRange::API_CALL, 250)));
    }

    #[test]
    fn check_ignores_other_roots() {
        assert_eq!(check(r#"<?xml version="1.0"?><rss><channel/></rss>"#).unwrap(), None);
        assert_eq!(check("").unwrap(), None);
    }

    #[test]
    fn check_rejects_error_without_code() {
        let err = check(r#"<error description="oops"/>"#).unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedXml("error"));
        let err = check(r#"<error code="abc"/>"#).unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedXml("error"));
    }

    #[test]
    fn decodes_register() {
        let register =
            Register::from_xml(r#"<register username="alice" password="hunter2" apikey="0123456789abcdef"/>"#)
                .unwrap();
        assert_eq!(register.username, "alice");
        assert_eq!(register.password, "hunter2");
        assert_eq!(register.api_key, "0123456789abcdef");
    }

    #[test]
    fn decodes_cart_and_comments() {
        assert_eq!(CartAdd::from_xml(r#"<cartadd id="42"/>"#).unwrap().id, 42);
        assert_eq!(CartDel::from_xml(r#"<cartdel id="7"/>"#).unwrap().id, 7);
        assert_eq!(CommentAdd::from_xml(r#"<commentadd id="-1"/>"#).unwrap().id, -1);
    }

    #[test]
    fn responses_surface_indexer_errors() {
        let err = CartAdd::from_xml(r#"<error code="104" description="Registrations are closed"/>"#).unwrap_err();
        assert_eq!(*err, ErrorKind::Indexer(NError::REGISTRATIONS_CLOSED.into()));
        let err = Register::from_xml(r#"<error code="910"/>"#).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn missing_id_is_malformed() {
        let err = CommentAdd::from_xml("<commentadd/>").unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedXml("commentadd"));
    }

    fn range_with_code(range: NErrorRange, code: u32) -> NErrorRange {
        NErrorRange { code, ..range }
    }
}
