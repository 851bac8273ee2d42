use exn::ResultExt;
use tracing::instrument;
use url::Url;

use super::{Nzb, Torrent};
use crate::error::{ErrorKind, Result};

/// The descriptor file an entry points at: the small file that tells a client
/// how to fetch the actual release.
#[derive(Debug, Clone, PartialEq)]
pub enum File {
    Nzb(Nzb),
    Torrent(Torrent),
}

/// State every descriptor kind carries, independent of its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Descriptor {
    pub(crate) url: Url,
    pub(crate) passworded: bool,
    /// Sizes as advertised by the indexer, used until the contents are attached.
    pub(crate) advertised_size: Option<u64>,
    pub(crate) advertised_files: Option<u64>,
}

impl Descriptor {
    pub(crate) fn new(url: Url) -> Self {
        Self {
            url,
            passworded: false,
            advertised_size: None,
            advertised_files: None,
        }
    }
}

impl File {
    /// Picks the descriptor kind from an enclosure URL: `.nzb` links are NZBs,
    /// `.torrent` and `magnet:` links are torrents. Relative links are resolved
    /// against `base` when one is given.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::UnsupportedFile`] for anything else.
    /// - [`ErrorKind::InvalidUrl`] when the link cannot be parsed, or is
    ///   relative and there is no base.
    #[instrument(level = "trace", skip(base))]
    pub fn from_enclosure(url: &str, base: Option<&Url>) -> Result<Self> {
        let trimmed = url.trim();
        let is_nzb = trimmed.contains(".nzb");
        let is_torrent = trimmed.contains(".torrent") || trimmed.starts_with("magnet:");
        if !is_nzb && !is_torrent {
            exn::bail!(ErrorKind::UnsupportedFile(trimmed.to_string()));
        }
        let parsed = match (Url::parse(trimmed), base) {
            (Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => base.join(trimmed),
            (parsed, _) => parsed,
        }
        .or_raise(|| ErrorKind::InvalidUrl(trimmed.to_string()))?;
        let descriptor = Descriptor::new(parsed);
        Ok(if is_nzb {
            Self::Nzb(Nzb::new(descriptor))
        } else {
            Self::Torrent(Torrent::new(descriptor))
        })
    }

    fn descriptor(&self) -> &Descriptor {
        match self {
            Self::Nzb(nzb) => &nzb.descriptor,
            Self::Torrent(torrent) => &torrent.descriptor,
        }
    }

    fn descriptor_mut(&mut self) -> &mut Descriptor {
        match self {
            Self::Nzb(nzb) => &mut nzb.descriptor,
            Self::Torrent(torrent) => &mut torrent.descriptor,
        }
    }

    /// Where the descriptor file can be downloaded from.
    pub fn url(&self) -> &Url {
        &self.descriptor().url
    }

    /// Whether the release contents need a password to extract.
    pub fn passworded(&self) -> bool {
        self.descriptor().passworded
    }

    /// Total size of the release contents in bytes. `None` when it is unknown
    /// or the attached contents cannot be decoded.
    pub fn size(&self) -> Option<u64> {
        match self {
            Self::Nzb(nzb) => nzb.size(),
            Self::Torrent(torrent) => torrent.size(),
        }
    }

    /// Number of files in the release.
    pub fn file_count(&self) -> Option<u64> {
        match self {
            Self::Nzb(nzb) => nzb.file_count(),
            Self::Torrent(torrent) => torrent.file_count(),
        }
    }

    /// Raw bytes of the attached descriptor file.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::NotFetched`] when nothing has been attached.
    /// - [`ErrorKind::Unmarshal`] when the contents cannot be re-encoded.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::Nzb(nzb) => nzb.bytes(),
            Self::Torrent(torrent) => torrent.bytes(),
        }
    }

    /// Attaches the fetched descriptor file. Once attached, size and file count
    /// come from the contents rather than the indexer's attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Unmarshal`] when the bytes don't decode as this kind of file.
    pub fn attach(&mut self, bytes: impl AsRef<[u8]>) -> Result<()> {
        match self {
            Self::Nzb(nzb) => nzb.attach(bytes),
            Self::Torrent(torrent) => torrent.attach(bytes),
        }
    }

    pub fn is_nzb(&self) -> bool {
        matches!(self, Self::Nzb(_))
    }

    pub fn is_torrent(&self) -> bool {
        matches!(self, Self::Torrent(_))
    }

    /// Points the descriptor somewhere else, e.g. a mirror or a URL carrying
    /// different credentials.
    pub fn set_url(&mut self, url: Url) {
        self.descriptor_mut().url = url;
    }

    pub(crate) fn set_passworded(&mut self, passworded: bool) {
        self.descriptor_mut().passworded = passworded;
    }

    pub(crate) fn set_advertised_size(&mut self, size: u64) {
        self.descriptor_mut().advertised_size = Some(size);
    }

    pub(crate) fn set_advertised_files(&mut self, files: u64) {
        self.descriptor_mut().advertised_files = Some(files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://nzb.su/getnzb/24967ef4c2e26296c65d3bbfa97aa8fe.nzb&i=37292&r=xxx", true)]
    #[case("https://indexer.example/api?t=get&id=abc.nzb", true)]
    #[case("https://tracker.example/download/123.torrent", false)]
    #[case("magnet:?xt=urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a", false)]
    fn chooses_variant_from_url(#[case] url: &str, #[case] nzb: bool) {
        let file = File::from_enclosure(url, None).unwrap();
        assert_eq!(file.is_nzb(), nzb);
        assert_eq!(file.is_torrent(), !nzb);
        assert_eq!(file.url().as_str(), url);
        assert!(!file.passworded());
    }

    #[rstest]
    #[case("https://indexer.example/file.zip")]
    #[case("")]
    #[case("https://indexer.example/details/abc")]
    fn rejects_unknown_kinds(#[case] url: &str) {
        let err = File::from_enclosure(url, None).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedFile(url.to_string()));
    }

    #[rstest]
    #[case("/getnzb/abc.nzb&i=1&r=key", "https://indexer.example/getnzb/abc.nzb&i=1&r=key")]
    #[case("getnzb/abc.nzb", "https://indexer.example/getnzb/abc.nzb")]
    #[case("//cdn.example/abc.torrent", "https://cdn.example/abc.torrent")]
    #[case("http://nzb.su/getnzb/abc.nzb", "http://nzb.su/getnzb/abc.nzb")]
    fn resolves_relative_urls(#[case] url: &str, #[case] expected: &str) {
        let base = Url::parse("https://indexer.example/api").unwrap();
        let file = File::from_enclosure(url, Some(&base)).unwrap();
        assert_eq!(file.url().as_str(), expected);
    }

    #[rstest]
    #[case("/getnzb/abc.nzb", None)]
    #[case("http://[bad.nzb", None)]
    #[case("http://[bad.nzb", Some("https://indexer.example/api"))]
    fn rejects_unresolvable_urls(#[case] url: &str, #[case] base: Option<&str>) {
        let base = base.map(|base| Url::parse(base).unwrap());
        let err = File::from_enclosure(url, base.as_ref()).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidUrl(url.to_string()));
    }

    #[test]
    fn advertised_values_before_fetch() {
        let mut file = File::from_enclosure("https://indexer.example/abc.nzb", None).unwrap();
        assert_eq!(file.size(), None);
        assert_eq!(file.file_count(), None);
        file.set_advertised_size(1024);
        file.set_advertised_files(3);
        file.set_passworded(true);
        assert_eq!(file.size(), Some(1024));
        assert_eq!(file.file_count(), Some(3));
        assert!(file.passworded());
        assert_eq!(*file.bytes().unwrap_err(), ErrorKind::NotFetched);

        file.set_url(Url::parse("https://mirror.example/abc.nzb").unwrap());
        assert_eq!(file.url().as_str(), "https://mirror.example/abc.nzb");
    }
}
