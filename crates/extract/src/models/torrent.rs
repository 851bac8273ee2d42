use std::sync::OnceLock;

use exn::{OptionExt, ResultExt};
use serde::Deserialize;
use serde_bencode::value::Value;
use serde_bytes::ByteBuf;
use tracing::instrument;

use super::file::Descriptor;
use crate::error::{ErrorKind, Result};

/// A torrent descriptor. Magnet links never carry metainfo; `.torrent` links
/// do once the file is fetched and [attached](Torrent::attach).
#[derive(Debug, Clone)]
pub struct Torrent {
    pub(crate) descriptor: Descriptor,
    /// The attached file as decoded, keys the typed view ignores included.
    raw: Option<Value>,
    metainfo: Option<MetaInfo>,
    /// Decoded `info` dictionary. Decoding happens at most once per attached
    /// metainfo; a failure is remembered as `None`.
    info: OnceLock<Option<Info>>,
}

impl PartialEq for Torrent {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor && self.raw == other.raw
    }
}

impl Torrent {
    pub(crate) fn new(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            raw: None,
            metainfo: None,
            info: OnceLock::new(),
        }
    }

    /// Attaches a fetched `.torrent` file. Only the outer dictionary is decoded
    /// here; the `info` dictionary is decoded on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Unmarshal`] when the payload is not bencoded metainfo.
    #[instrument(skip(self, bytes), fields(size = bytes.as_ref().len()))]
    pub fn attach(&mut self, bytes: impl AsRef<[u8]>) -> Result<()> {
        let raw: Value = serde_bencode::from_bytes(bytes.as_ref()).or_raise(|| ErrorKind::Unmarshal("torrent"))?;
        let metainfo: MetaInfo =
            serde_bencode::from_bytes(bytes.as_ref()).or_raise(|| ErrorKind::Unmarshal("torrent"))?;
        self.raw = Some(raw);
        self.metainfo = Some(metainfo);
        self.info = OnceLock::new();
        Ok(())
    }

    pub fn metainfo(&self) -> Option<&MetaInfo> {
        self.metainfo.as_ref()
    }

    /// The decoded `info` dictionary, or `None` when nothing is attached or it
    /// cannot be decoded.
    pub fn info(&self) -> Option<&Info> {
        let metainfo = self.metainfo.as_ref()?;
        self.info
            .get_or_init(|| match metainfo.decode_info() {
                Ok(info) => Some(info),
                Err(err) => {
                    tracing::debug!("failed to decode torrent info: {}", *err);
                    None
                },
            })
            .as_ref()
    }

    pub fn size(&self) -> Option<u64> {
        match &self.metainfo {
            Some(_) => self.info().map(Info::total_length),
            None => self.descriptor.advertised_size,
        }
    }

    pub fn file_count(&self) -> Option<u64> {
        match &self.metainfo {
            Some(_) => self.info().map(Info::file_count),
            None => self.descriptor.advertised_files,
        }
    }

    /// Re-encodes the attached file. Every key survives, including ones
    /// [`MetaInfo`] has no field for.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let raw = self.raw.as_ref().ok_or_raise(|| ErrorKind::NotFetched)?;
        serde_bencode::to_bytes(raw).or_raise(|| ErrorKind::Unmarshal("torrent"))
    }
}

/// The well-known keys of a `.torrent` file's outer dictionary. `info` is kept
/// as a raw value and decoded separately by [`MetaInfo::decode_info`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetaInfo {
    #[serde(default)]
    pub announce: Option<String>,
    #[serde(rename = "announce-list", default)]
    pub announce_list: Option<Vec<Vec<String>>>,
    pub info: Value,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "created by", default)]
    pub created_by: Option<String>,
    #[serde(rename = "creation date", default)]
    pub creation_date: Option<i64>,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl MetaInfo {
    pub fn decode_info(&self) -> Result<Info> {
        let raw = serde_bencode::to_bytes(&self.info).or_raise(|| ErrorKind::Unmarshal("torrent info"))?;
        serde_bencode::from_bytes(&raw).or_raise(|| ErrorKind::Unmarshal("torrent info"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Info {
    pub name: String,
    #[serde(rename = "piece length")]
    pub piece_length: u64,
    #[serde(default)]
    pub pieces: ByteBuf,
    /// Present for single-file torrents.
    #[serde(default)]
    pub length: Option<u64>,
    /// Present for multi-file torrents.
    #[serde(default)]
    pub files: Option<Vec<InfoFile>>,
    #[serde(default)]
    pub private: Option<u8>,
}

impl Info {
    pub fn total_length(&self) -> u64 {
        match &self.files {
            Some(files) => files.iter().map(|file| file.length).sum(),
            None => self.length.unwrap_or(0),
        }
    }

    pub fn file_count(&self) -> u64 {
        match &self.files {
            Some(files) => files.len() as u64,
            None => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InfoFile {
    pub length: u64,
    pub path: Vec<String>,
}
