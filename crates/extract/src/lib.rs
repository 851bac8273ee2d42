mod consts;
pub mod decode;
pub mod error;
pub mod models;
pub mod rss;

use nabdex_config::Config;
use tracing::instrument;

pub use crate::decode::Extractor;
use crate::error::Result;
use crate::models::Entry;

/// Easy, top-level entrypoint for decoding a search feed into [`Entry`] values
/// with the default configuration.
///
/// Items that cannot be assembled (no enclosure, or an enclosure that is
/// neither an NZB nor a torrent) are skipped. See [`Extractor`] for more
/// control over the source recorded on each entry.
///
/// # Errors
///
/// - [`ErrorKind::Indexer`](error::ErrorKind::Indexer) when the indexer
///   responded with an error document.
/// - [`ErrorKind::MalformedXml`](error::ErrorKind::MalformedXml) when the
///   document is not a readable RSS feed.
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn extract(xml: &str) -> Result<Vec<Entry>> {
    Ok(Extractor::from_xml(xml, &Config::default())?.entries())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{Content, File};
    use nabdex_protocol::{Category, NError};

    const FEED: &str = include_str!("../fixtures/feed.xml");

    #[test]
    fn decodes_every_item() {
        let entries = extract(FEED).unwrap();
        assert_eq!(entries.len(), 100);

        let entry = &entries[0];
        assert_eq!(entry.release.name, "White.Collar.S03E05.720p.HDTV.X264-DIMENSION");
        assert_eq!(entry.release.group.as_deref(), Some("DIMENSION"));
        assert_eq!(entry.meta.guid.simple().to_string(), "24967ef4c2e26296c65d3bbfa97aa8fe");
        assert_eq!(entry.meta.categorisation.categories, vec![Category::TV, Category::TV_HD]);
        let File::Nzb(nzb) = &entry.file else {
            panic!("expected an NZB, got {:?}", entry.file);
        };
        assert_eq!(
            entry.file.url().as_str(),
            "http://nzb.su/getnzb/24967ef4c2e26296c65d3bbfa97aa8fe.nzb&i=37292&r=xxx"
        );
        assert!(nzb.document().is_none());
        let Some(Content::Tv(tv)) = &entry.content else {
            panic!("expected TV content, got {:?}", entry.content);
        };
        assert_eq!((tv.season, tv.episode), (Some(3), Some(5)));
        assert_eq!(entry.meta.source.channel.response.map(|response| response.total), Some(12345));
        assert_eq!(entry.authoring().feed_author(), Some("info@nzb.su (nzb.su)"));
    }

    #[test]
    fn content_and_file_kinds() {
        let entries = extract(FEED).unwrap();
        let count = |kind: &str| {
            entries.iter().filter(|entry| entry.content.as_ref().map(Content::kind) == Some(kind)).count()
        };
        assert_eq!(count("tv"), 50);
        assert_eq!(count("movie"), 20);
        assert_eq!(count("music"), 10);
        assert_eq!(count("book"), 10);
        assert_eq!(entries.iter().filter(|entry| entry.content.is_none()).count(), 10);
        assert_eq!(entries.iter().filter(|entry| entry.file.is_torrent()).count(), 10);
        assert!(entries.iter().filter(|entry| entry.file.is_torrent()).all(|entry| entry.file.passworded()));
    }

    #[test]
    fn decoding_is_repeatable() {
        assert_eq!(extract(FEED).unwrap(), extract(FEED).unwrap());
    }

    #[test]
    fn error_documents_surface_as_indexer_errors() {
        let xml = r#"<?xml version="1.0"?><error code="102" description="Insufficient privileges/not authorized"/>"#;
        let err = extract(xml).unwrap_err();
        assert_eq!(*err, ErrorKind::Indexer(NError::INSUFFICIENT_PRIVILEGES.into()));
        assert!(!err.is_retryable());
    }
}
