//! A small RSS 2.0 reader covering what newznab search feeds use: the channel
//! header, item core fields, enclosures and the namespaced extension elements
//! (`<newznab:attr>`, `<newznab:response>`). It is not a general
//! purpose feed library.

use std::sync::Arc;

use exn::{OptionExt, ResultExt};
use nabdex_protocol::codec::parse_date;
use nabdex_protocol::response;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use time::OffsetDateTime;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// A decoded feed: one shared channel header plus its items in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub channel: Arc<Channel>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub link: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub author: Option<String>,
    /// Paging information from `<newznab:response offset=".." total=".."/>`.
    pub response: Option<Response>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    pub offset: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub guid: Option<String>,
    pub link: Option<String>,
    pub comments: Option<String>,
    pub published: Option<OffsetDateTime>,
    pub updated: Option<OffsetDateTime>,
    pub author: Option<String>,
    pub categories: Vec<String>,
    pub description: Option<String>,
    pub enclosures: Vec<Enclosure>,
    /// Extension attributes in document order, across every recognised namespace.
    pub attributes: Vec<Attribute>,
}

impl Item {
    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|attr| attr.name == name).map(|attr| attr.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    pub length: Option<u64>,
    pub mime: Option<String>,
}

/// A `<ns:attr name=".." value=".."/>` extension attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: String,
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Feed {
    /// Reads an RSS document, collecting extension elements from the given
    /// namespace prefixes only.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Indexer`] when the document is an indexer error response.
    /// - [`ErrorKind::MalformedXml`] when the XML is broken or has no `<channel>`.
    #[instrument(skip(xml, namespaces), fields(xml_size = xml.len()))]
    pub fn from_xml<S: AsRef<str>>(xml: &str, namespaces: &[S]) -> Result<Self> {
        if let Some(err) = response::check(xml).or_raise(|| ErrorKind::MalformedXml)? {
            exn::bail!(ErrorKind::Indexer(err));
        }
        let namespaces = namespaces.iter().map(AsRef::as_ref).collect::<Vec<&str>>();
        let feed = FeedReader::new(&namespaces).read(xml)?;
        tracing::debug!(items = feed.items.len(), "read feed");
        Ok(feed)
    }
}

struct FeedReader<'n> {
    namespaces: &'n [&'n str],
    path: Vec<String>,
    text: String,
    channel: Option<Channel>,
    item: Option<Item>,
    items: Vec<Item>,
}

impl<'n> FeedReader<'n> {
    fn new(namespaces: &'n [&'n str]) -> Self {
        Self {
            namespaces,
            path: Vec::new(),
            text: String::new(),
            channel: None,
            item: None,
            items: Vec::new(),
        }
    }

    fn read(mut self, xml: &str) -> Result<Feed> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        loop {
            match reader.read_event().or_raise(|| ErrorKind::MalformedXml)? {
                Event::Start(e) => {
                    self.open(&e, &reader)?;
                    self.path.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                    self.text.clear();
                },
                Event::Empty(e) => {
                    self.open(&e, &reader)?;
                    self.path.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                    self.text.clear();
                    self.close();
                },
                Event::Text(e) => self.text.push_str(&e.unescape().or_raise(|| ErrorKind::MalformedXml)?),
                Event::CData(e) => self.text.push_str(std::str::from_utf8(&e).or_raise(|| ErrorKind::MalformedXml)?),
                Event::End(_) => self.close(),
                Event::Eof => break,
                _ => {},
            }
        }
        let channel = self.channel.ok_or_raise(|| ErrorKind::MalformedXml)?;
        Ok(Feed {
            channel: Arc::new(channel),
            items: self.items,
        })
    }

    /// Handles elements whose data lives in their attributes.
    fn open(&mut self, e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<()> {
        let name = e.name();
        match name.as_ref() {
            b"channel" => {
                self.channel.get_or_insert_with(Channel::default);
            },
            b"item" => self.item = Some(Item::default()),
            b"enclosure" => {
                if let Some(item) = self.item.as_mut() {
                    match attribute(e, "url", reader)? {
                        Some(url) => item.enclosures.push(Enclosure {
                            url,
                            length: attribute(e, "length", reader)?.and_then(|length| length.trim().parse().ok()),
                            mime: attribute(e, "type", reader)?,
                        }),
                        None => tracing::debug!("ignoring enclosure without a url"),
                    }
                }
            },
            qualified => {
                let qualified = String::from_utf8_lossy(qualified);
                let Some((prefix, local)) = qualified.split_once(':') else {
                    return Ok(());
                };
                if !self.namespaces.contains(&prefix) {
                    return Ok(());
                }
                match local {
                    "attr" => {
                        if let Some(item) = self.item.as_mut()
                            && let Some(attr_name) = attribute(e, "name", reader)?
                        {
                            let value = attribute(e, "value", reader)?.unwrap_or_default();
                            item.attributes.push(Attribute::new(prefix, attr_name, value));
                        }
                    },
                    "response" if self.item.is_none() => {
                        if let Some(channel) = self.channel.as_mut() {
                            let number =
                                |value: Option<String>| -> u64 { value.and_then(|v| v.trim().parse().ok()).unwrap_or(0) };
                            channel.response = Some(Response {
                                offset: number(attribute(e, "offset", reader)?),
                                total: number(attribute(e, "total", reader)?),
                            });
                        }
                    },
                    _ => {},
                }
            },
        }
        Ok(())
    }

    /// Handles elements whose data is their text content.
    fn close(&mut self) {
        let Some(name) = self.path.pop() else {
            return;
        };
        let text = std::mem::take(&mut self.text);
        let text = text.trim();
        match (self.path.last().map(String::as_str), name.as_str()) {
            (_, "item") => {
                if let Some(item) = self.item.take() {
                    self.items.push(item);
                }
            },
            (Some("item"), field) => {
                if let Some(item) = self.item.as_mut() {
                    item_field(item, field, text);
                }
            },
            (Some("channel"), field) => {
                if let Some(channel) = self.channel.as_mut() {
                    channel_field(channel, field, text);
                }
            },
            _ => {},
        }
    }
}

fn item_field(item: &mut Item, field: &str, text: &str) {
    match field {
        "title" => item.title = text.to_string(),
        "guid" => item.guid = non_empty(text),
        "link" => item.link = non_empty(text),
        "comments" => item.comments = non_empty(text),
        "pubDate" => item.published = date(field, text),
        "updated" | "atom:updated" => item.updated = date(field, text),
        "author" | "dc:creator" => item.author = non_empty(text),
        "category" if !text.is_empty() => item.categories.push(text.to_string()),
        "description" => item.description = non_empty(text),
        _ => {},
    }
}

fn channel_field(channel: &mut Channel, field: &str, text: &str) {
    match field {
        "title" => channel.title = text.to_string(),
        "link" => channel.link = non_empty(text),
        "description" => channel.description = non_empty(text),
        "language" => channel.language = non_empty(text),
        "author" | "managingEditor" | "webMaster" | "dc:creator" => channel.author = non_empty(text),
        _ => {},
    }
}

fn attribute(e: &BytesStart<'_>, key: &str, reader: &Reader<&[u8]>) -> Result<Option<String>> {
    match e.try_get_attribute(key).or_raise(|| ErrorKind::MalformedXml)? {
        Some(attr) => {
            let value = attr.decode_and_unescape_value(reader.decoder()).or_raise(|| ErrorKind::MalformedXml)?;
            Ok(Some(value.into_owned()))
        },
        None => Ok(None),
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn date(field: &str, text: &str) -> Option<OffsetDateTime> {
    if text.is_empty() {
        return None;
    }
    match parse_date(text) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::debug!(field, "ignoring unparsable date: {}", *err);
            None
        },
    }
}
