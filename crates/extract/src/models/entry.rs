use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use nabdex_protocol::Category;
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

use super::{Content, File};
use crate::rss::{Channel, Item};

/// A single search result, fully decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Information about the entry itself rather than its contents.
    pub meta: Meta,
    pub release: Release,
    /// What the files contain. `None` until a content-specific attribute is seen.
    pub content: Option<Content>,
    /// The descriptor file (NZB or torrent) used to download the release.
    pub file: File,
}

impl Entry {
    /// The item this entry was decoded from.
    pub fn raw(&self) -> &Item {
        &self.meta.source.item
    }

    pub fn authoring(&self) -> Authoring<'_> {
        Authoring { entry: self }
    }
}

/// The scene release an entry describes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Release {
    /// Release name, taken from the item title.
    pub name: String,
    /// Release group, from the `team` attribute.
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    /// Nil when the indexer sent no guid or one that isn't a UUID.
    pub guid: Uuid,
    pub source: Source,
    pub categorisation: Categorisation,
    pub dates: Dates,
    pub usenet: Usenet,
    /// Number of times the entry has been downloaded.
    pub grabs: u64,
    /// Number of comments left on the entry.
    pub comments: u64,
    /// Link to the release's NFO file.
    pub nfo: Option<Url>,
}

/// Where an entry came from.
#[derive(Clone, PartialEq, Eq)]
pub struct Source {
    pub endpoint: Option<Url>,
    pub api_key: Option<String>,
    /// Shared by every entry decoded from the same feed.
    pub channel: Arc<Channel>,
    pub item: Item,
}
impl Debug for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Source")
            .field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("channel", &self.channel.title)
            .field("item", &self.item.title)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categorisation {
    /// Free-text `<category>` values from the item.
    pub rss_categories: Vec<String>,
    /// Categories from `category` attributes, in document order.
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dates {
    pub published: Option<OffsetDateTime>,
    pub updated: Option<OffsetDateTime>,
    /// When the files were posted to usenet.
    pub usenet: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usenet {
    pub poster: Option<String>,
    pub groups: Vec<String>,
}

/// Who created an entry and who supplied its content, gathered from the feed,
/// the item, the release and usenet.
#[derive(Debug, Clone, Copy)]
pub struct Authoring<'a> {
    entry: &'a Entry,
}

impl<'a> Authoring<'a> {
    pub fn feed_author(&self) -> Option<&'a str> {
        self.entry.meta.source.channel.author.as_deref()
    }

    pub fn item_author(&self) -> Option<&'a str> {
        self.entry.meta.source.item.author.as_deref()
    }

    pub fn release_group(&self) -> Option<&'a str> {
        self.entry.release.group.as_deref()
    }

    pub fn nntp_poster(&self) -> Option<&'a str> {
        self.entry.meta.usenet.poster.as_deref()
    }

    pub fn nntp_groups(&self) -> &'a [String] {
        &self.entry.meta.usenet.groups
    }
}
