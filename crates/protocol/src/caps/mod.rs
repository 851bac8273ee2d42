//! The capabilities (`t=caps`) document: what an indexer supports and which
//! categories, groups and genres it indexes.

mod models;
mod raw;

use exn::ResultExt;
use tracing::instrument;

pub use self::models::*;
use self::raw::CapabilitiesProxy;
use crate::error::{ErrorKind, Result};
use crate::response;

impl Capabilities {
    /// Decodes a capabilities document.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Indexer`] when the indexer answered with an error
    ///   document instead.
    /// - [`ErrorKind::MalformedXml`] when the document cannot be decoded,
    ///   including yes/no flags that are neither `yes` nor `no`.
    #[instrument(skip(xml), fields(xml_size = xml.len()))]
    pub fn from_xml(xml: &str) -> Result<Self> {
        if let Some(err) = response::check(xml)? {
            exn::bail!(ErrorKind::Indexer(err));
        }
        let proxy: CapabilitiesProxy =
            quick_xml::de::from_str(xml).or_raise(|| ErrorKind::MalformedXml("capabilities"))?;
        let caps = Self::from(proxy);
        tracing::debug!(
            categories = caps.categories.len(),
            groups = caps.groups.len(),
            genres = caps.genres.len(),
            "decoded capabilities"
        );
        Ok(caps)
    }
}
