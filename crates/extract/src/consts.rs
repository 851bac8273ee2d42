//! Names of the extension attributes carried by feed items (`<newznab:attr name=".." value=".."/>`).

// Entry-level.
pub(crate) const CATEGORY: &str = "category";
pub(crate) const GUID: &str = "guid";
pub(crate) const SIZE: &str = "size";
pub(crate) const FILES: &str = "files";
pub(crate) const POSTER: &str = "poster";
pub(crate) const GROUP: &str = "group";
pub(crate) const TEAM: &str = "team";
pub(crate) const GRABS: &str = "grabs";
pub(crate) const COMMENTS: &str = "comments";
pub(crate) const PASSWORD: &str = "password";
pub(crate) const INFO: &str = "info";
pub(crate) const USENET_DATE: &str = "usenetdate";
pub(crate) const YEAR: &str = "year";

// TV.
pub(crate) const SEASON: &str = "season";
pub(crate) const EPISODE: &str = "episode";
pub(crate) const RAGE_ID: &str = "rageid";
pub(crate) const TV_TITLE: &str = "tvtitle";
pub(crate) const TV_AIR_DATE: &str = "tvairdate";
pub(crate) const TVDB_ID: &str = "tvdbid";
pub(crate) const TVMAZE_ID: &str = "tvmazeid";

// Movie.
pub(crate) const IMDB: &str = "imdb";
pub(crate) const IMDB_SCORE: &str = "imdbscore";
pub(crate) const IMDB_TITLE: &str = "imdbtitle";
pub(crate) const IMDB_TAGLINE: &str = "imdbtagline";
pub(crate) const IMDB_PLOT: &str = "imdbplot";
pub(crate) const IMDB_YEAR: &str = "imdbyear";
pub(crate) const IMDB_DIRECTOR: &str = "imdbdirector";
pub(crate) const IMDB_ACTORS: &str = "imdbactors";

// Music.
pub(crate) const ARTIST: &str = "artist";
pub(crate) const ALBUM: &str = "album";
pub(crate) const TRACKS: &str = "tracks";

// Book.
pub(crate) const BOOK_TITLE: &str = "booktitle";
pub(crate) const PUBLISH_DATE: &str = "publishdate";
pub(crate) const AUTHOR: &str = "author";
pub(crate) const PAGES: &str = "pages";

// Shared between content kinds.
pub(crate) const VIDEO: &str = "video";
pub(crate) const AUDIO: &str = "audio";
pub(crate) const RESOLUTION: &str = "resolution";
pub(crate) const FRAMERATE: &str = "framerate";
pub(crate) const LANGUAGE: &str = "language";
pub(crate) const SUBS: &str = "subs";
pub(crate) const GENRE: &str = "genre";
pub(crate) const COVER_URL: &str = "coverurl";
pub(crate) const BACKDROP_COVER_URL: &str = "backdropcoverurl";
pub(crate) const REVIEW: &str = "review";
pub(crate) const PUBLISHER: &str = "publisher";
