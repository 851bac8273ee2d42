//! Assembly of [`Entry`] values from feed items.

pub mod attributes;
pub mod resolver;

use std::sync::Arc;

use exn::OptionExt;
use nabdex_config::Config;
use tracing::instrument;
use url::Url;
use uuid::Uuid;

use crate::error::{ErrorKind, Result};
use crate::models::{Categorisation, Dates, Entry, File, Meta, Release, Source, Usenet};
use crate::rss::{Feed, Item};

/// Turns the items of a [`Feed`] into [`Entry`] values.
///
/// The endpoint and API key are not used for decoding; they are recorded on
/// every entry so its files can be fetched later.
#[derive(Debug, Clone)]
pub struct Extractor {
    feed: Feed,
    endpoint: Option<Url>,
    api_key: Option<String>,
}

impl Extractor {
    pub fn new(feed: Feed) -> Self {
        Self {
            feed,
            endpoint: None,
            api_key: None,
        }
    }

    /// Reads the feed document, collecting extension attributes from the
    /// namespaces the configuration lists.
    ///
    /// # Errors
    ///
    /// See [`Feed::from_xml`].
    #[instrument(skip(xml, config), fields(xml_size = xml.len()))]
    pub fn from_xml(xml: &str, config: &Config) -> Result<Self> {
        Ok(Self::new(Feed::from_xml(xml, config.decode.namespaces.as_slice())?).with_config(config))
    }

    /// Takes the endpoint and API key from the indexer configuration.
    pub fn with_config(self, config: &Config) -> Self {
        Self {
            endpoint: config.indexer.endpoint.clone(),
            api_key: config.indexer.api_key.clone(),
            ..self
        }
    }

    pub fn with_endpoint(self, endpoint: Url) -> Self {
        Self {
            endpoint: Some(endpoint),
            ..self
        }
    }

    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..self
        }
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// What relative enclosure links resolve against: the endpoint, otherwise
    /// the channel link.
    fn base_url(&self) -> Option<Url> {
        self.endpoint
            .clone()
            .or_else(|| self.feed.channel.link.as_deref().and_then(|link| Url::parse(link).ok()))
    }

    /// Every item that could be assembled, in feed order. Items that cannot be
    /// assembled are logged and skipped.
    #[instrument(skip(self), fields(items = self.feed.items.len()))]
    pub fn entries(&self) -> Vec<Entry> {
        let entries: Vec<Entry> = self
            .feed
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match self.entry(item) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!(index, title = %item.title, "dropping item: {}", *err);
                    None
                },
            })
            .collect();
        tracing::debug!(entries = entries.len(), "assembled entries");
        entries
    }

    /// Assembles a single item: its enclosure decides the file kind, then its
    /// attributes are applied in one pass.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::MissingEnclosure`] when the item has nothing to download.
    /// - [`ErrorKind::UnsupportedFile`] or [`ErrorKind::InvalidUrl`] when the
    ///   enclosure is neither an NZB nor a torrent link.
    #[instrument(level = "trace", skip(self, item), fields(title = %item.title))]
    pub fn entry(&self, item: &Item) -> Result<Entry> {
        let enclosure = item.enclosures.first().ok_or_raise(|| ErrorKind::MissingEnclosure)?;
        let mut file = File::from_enclosure(&enclosure.url, self.base_url().as_ref())?;
        if let Some(length) = enclosure.length {
            file.set_advertised_size(length);
        }
        let mut entry = Entry {
            meta: Meta {
                guid: Uuid::nil(),
                source: Source {
                    endpoint: self.endpoint.clone(),
                    api_key: self.api_key.clone(),
                    channel: Arc::clone(&self.feed.channel),
                    item: item.clone(),
                },
                categorisation: Categorisation {
                    rss_categories: item.categories.clone(),
                    categories: Vec::new(),
                },
                dates: Dates {
                    published: item.published,
                    updated: item.updated,
                    usenet: None,
                },
                usenet: Usenet::default(),
                grabs: 0,
                comments: 0,
                nfo: None,
            },
            release: Release {
                name: item.title.clone(),
                group: None,
            },
            content: None,
            file,
        };
        attributes::decode(&mut entry, &item.attributes);
        Ok(entry)
    }
}

impl From<Feed> for Extractor {
    fn from(feed: Feed) -> Self {
        Self::new(feed)
    }
}
