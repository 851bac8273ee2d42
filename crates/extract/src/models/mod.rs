mod content;
mod entry;
mod file;
mod nzb;
mod torrent;

pub use self::content::{Artwork, Audio, Book, Content, Movie, Music, Tv, Video};
pub use self::entry::{Authoring, Categorisation, Dates, Entry, Meta, Release, Source, Usenet};
pub use self::file::File;
pub use self::nzb::{Nzb, NzbDocument, NzbFile, NzbHead, NzbMeta, NzbSegment};
pub use self::torrent::{Info, InfoFile, MetaInfo, Torrent};
