use std::io::Read;

use exn::{OptionExt, ResultExt};
use flate2::read::GzDecoder;
use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;
use tracing::instrument;

use super::file::Descriptor;
use crate::error::{ErrorKind, Result};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// An NZB descriptor. The NZB itself is only available once fetched and
/// [attached](Nzb::attach); until then size and file count come from the
/// indexer's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nzb {
    pub(crate) descriptor: Descriptor,
    raw: Option<Vec<u8>>,
    document: Option<NzbDocument>,
}

impl Nzb {
    pub(crate) fn new(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            raw: None,
            document: None,
        }
    }

    /// Attaches the fetched NZB. Gzip-compressed payloads are inflated first;
    /// the inflated XML is what [`bytes`](Self::bytes) returns afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Unmarshal`] when the payload is not a readable NZB.
    /// The previously attached contents, if any, are kept in that case.
    #[instrument(skip(self, bytes), fields(size = bytes.as_ref().len()))]
    pub fn attach(&mut self, bytes: impl AsRef<[u8]>) -> Result<()> {
        let bytes = bytes.as_ref();
        let raw = if bytes.starts_with(&GZIP_MAGIC) {
            let mut inflated = Vec::new();
            GzDecoder::new(bytes).read_to_end(&mut inflated).or_raise(|| ErrorKind::Unmarshal("nzb"))?;
            inflated
        } else {
            bytes.to_vec()
        };
        let xml = std::str::from_utf8(&raw).or_raise(|| ErrorKind::Unmarshal("nzb"))?;
        let document: NzbDocument = quick_xml::de::from_str(xml).or_raise(|| ErrorKind::Unmarshal("nzb"))?;
        tracing::debug!(files = document.files.len(), "attached nzb");
        self.document = Some(document);
        self.raw = Some(raw);
        Ok(())
    }

    pub fn document(&self) -> Option<&NzbDocument> {
        self.document.as_ref()
    }

    pub fn size(&self) -> Option<u64> {
        match &self.document {
            Some(document) => Some(document.size()),
            None => self.descriptor.advertised_size,
        }
    }

    pub fn file_count(&self) -> Option<u64> {
        match &self.document {
            Some(document) => Some(document.files.len() as u64),
            None => self.descriptor.advertised_files,
        }
    }

    /// The password declared in the NZB head, if any.
    pub fn password(&self) -> Option<&str> {
        self.document.as_ref()?.meta("password")
    }

    pub fn bytes(&self) -> Result<Vec<u8>> {
        self.raw.clone().ok_or_raise(|| ErrorKind::NotFetched)
    }
}

/// The parts of an NZB document that describe its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NzbDocument {
    #[serde(default)]
    pub head: Option<NzbHead>,
    #[serde(rename = "file", default)]
    pub files: Vec<NzbFile>,
}

impl NzbDocument {
    /// Sum of every segment's size.
    pub fn size(&self) -> u64 {
        self.files.iter().map(NzbFile::size).sum()
    }

    /// First `<meta type="..">` value with the given type.
    pub fn meta(&self, kind: &str) -> Option<&str> {
        self.head
            .as_ref()?
            .meta
            .iter()
            .find(|meta| meta.kind.eq_ignore_ascii_case(kind))
            .map(|meta| meta.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NzbHead {
    #[serde(default)]
    pub meta: Vec<NzbMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NzbMeta {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NzbFile {
    #[serde(rename = "@poster", default)]
    pub poster: String,
    /// Unix timestamp of the post.
    #[serde(rename = "@date", default)]
    pub date: i64,
    #[serde(rename = "@subject", default)]
    pub subject: String,
    #[serde(default, deserialize_with = "groups")]
    pub groups: Vec<String>,
    #[serde(default, deserialize_with = "segments")]
    pub segments: Vec<NzbSegment>,
}

impl NzbFile {
    pub fn size(&self) -> u64 {
        self.segments.iter().map(|segment| segment.bytes).sum()
    }

    pub fn posted(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.date).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NzbSegment {
    #[serde(rename = "@bytes", default)]
    pub bytes: u64,
    #[serde(rename = "@number", default)]
    pub number: u32,
    /// Usenet message ID, without angle brackets.
    #[serde(rename = "$text", default)]
    pub message_id: String,
}

fn groups<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    struct Groups {
        #[serde(default)]
        group: Vec<String>,
    }
    Ok(Groups::deserialize(deserializer)?.group)
}

fn segments<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<NzbSegment>, D::Error> {
    #[derive(Deserialize)]
    struct Segments {
        #[serde(default)]
        segment: Vec<NzbSegment>,
    }
    Ok(Segments::deserialize(deserializer)?.segment)
}
