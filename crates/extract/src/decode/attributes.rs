//! Decoding of an item's extension attributes onto its [`Entry`].
//!
//! Attributes are visited once, in document order. Every attribute either
//! applies or fails on its own; a failure leaves the field it targets as it
//! was. Values shared between content kinds are buffered and merged once the
//! pass is over, so the outcome never depends on attribute order.

use std::str::FromStr;

use exn::ResultExt;
use nabdex_protocol::Category;
use nabdex_protocol::codec::{parse_date, parse_yes_no};
use time::OffsetDateTime;
use tracing::instrument;
use url::Url;
use uuid::Uuid;

use super::resolver::{Variant, ensure};
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{Artwork, Audio, Book, Content, Entry, Movie, Music, Tv, Video};
use crate::rss::Attribute;

/// Applies every attribute to the entry. Attributes that cannot be decoded are
/// logged and skipped.
#[instrument(level = "trace", skip_all, fields(attributes = attributes.len()))]
pub fn decode(entry: &mut Entry, attributes: &[Attribute]) {
    let mut shared = Shared::default();
    for attribute in attributes {
        if let Err(err) = apply(entry, &mut shared, attribute) {
            tracing::debug!(name = %attribute.name, value = %attribute.value, "discarding attribute: {}", *err);
        }
    }
    shared.merge(&mut entry.content);
}

/// Applies a single attribute.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidAttribute`] when the value cannot be decoded.
pub fn apply(entry: &mut Entry, shared: &mut Shared, attribute: &Attribute) -> Result<()> {
    let value = attribute.value.trim();
    match attribute.name.as_str() {
        consts::CATEGORY => entry.meta.categorisation.categories.push(Category::from_code(number(attribute, value)?)),
        consts::GUID => {
            // A rejected guid leaves the nil UUID behind.
            entry.meta.guid = Uuid::nil();
            entry.meta.guid = Uuid::parse_str(value).or_raise(|| invalid(attribute))?;
        },
        consts::SIZE => entry.file.set_advertised_size(number(attribute, value)?),
        consts::FILES => entry.file.set_advertised_files(number(attribute, value)?),
        consts::POSTER => entry.meta.usenet.poster = text(value),
        consts::GROUP => {
            let groups = &mut entry.meta.usenet.groups;
            for group in list(value, ',') {
                if !groups.contains(&group) {
                    groups.push(group);
                }
            }
        },
        consts::TEAM => entry.release.group = text(value),
        consts::GRABS => entry.meta.grabs = number(attribute, value)?,
        consts::COMMENTS => entry.meta.comments = number(attribute, value)?,
        consts::PASSWORD => entry.file.set_passworded(password(attribute, value)?),
        consts::INFO => entry.meta.nfo = Some(url(attribute, value)?),
        consts::USENET_DATE => entry.meta.dates.usenet = Some(date(attribute, value)?),
        consts::YEAR => shared.year = Some(number(attribute, value)?),

        consts::SEASON
        | consts::EPISODE
        | consts::RAGE_ID
        | consts::TV_TITLE
        | consts::TV_AIR_DATE
        | consts::TVDB_ID
        | consts::TVMAZE_ID => {
            with_variant::<Tv>(&mut entry.content, attribute, |variant| tv(variant, attribute, value))?
        },

        consts::IMDB
        | consts::IMDB_SCORE
        | consts::IMDB_TITLE
        | consts::IMDB_TAGLINE
        | consts::IMDB_PLOT
        | consts::IMDB_YEAR
        | consts::IMDB_DIRECTOR
        | consts::IMDB_ACTORS => {
            with_variant::<Movie>(&mut entry.content, attribute, |variant| movie(variant, attribute, value))?
        },

        consts::ARTIST | consts::ALBUM | consts::TRACKS => {
            with_variant::<Music>(&mut entry.content, attribute, |variant| music(variant, attribute, value))?
        },

        consts::BOOK_TITLE | consts::PUBLISH_DATE | consts::AUTHOR | consts::PAGES => {
            with_variant::<Book>(&mut entry.content, attribute, |variant| book(variant, attribute, value))?
        },

        consts::VIDEO => shared.video.codec = text(value),
        consts::RESOLUTION => shared.video.resolution = text(value),
        consts::FRAMERATE => shared.video.framerate = Some(number(attribute, value)?),
        consts::SUBS => shared.video.subtitles = list(value, ','),
        consts::AUDIO => shared.audio.codec = text(value),
        consts::LANGUAGE => shared.audio.languages = list(value, ','),
        consts::GENRE => shared.genre = text(value),
        consts::COVER_URL => shared.artwork.cover = Some(url(attribute, value)?),
        consts::BACKDROP_COVER_URL => shared.artwork.backdrop = Some(url(attribute, value)?),
        consts::REVIEW => shared.review_score = Some(score(attribute, value)?),
        consts::PUBLISHER => shared.publisher = text(value),

        name => tracing::trace!(name, "ignoring unrecognised attribute"),
    }
    Ok(())
}

/// Values carried by more than one content kind, held until the pass is over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shared {
    pub video: Video,
    pub audio: Audio,
    pub artwork: Artwork,
    pub genre: Option<String>,
    pub review_score: Option<f32>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
}

impl Shared {
    /// Hands each value to the content, if it carries that field. Values with
    /// nowhere to go are dropped.
    pub fn merge(self, content: &mut Option<Content>) {
        match content {
            Some(Content::Tv(tv)) => {
                tv.video = self.video;
                tv.audio = self.audio;
                tv.artwork = self.artwork;
                tv.genre = self.genre;
            },
            Some(Content::Movie(movie)) => {
                movie.video = self.video;
                movie.audio = self.audio;
                movie.artwork = self.artwork;
                movie.genre = self.genre;
                movie.review_score = self.review_score;
                if movie.imdb_year.is_none() {
                    movie.imdb_year = self.year;
                }
            },
            Some(Content::Music(music)) => {
                music.audio = self.audio;
                music.artwork = self.artwork;
                music.genre = self.genre;
                music.review_score = self.review_score;
                music.publisher = self.publisher;
                music.year = self.year;
            },
            Some(Content::Book(book)) => {
                book.cover = self.artwork.cover;
                book.review_score = self.review_score;
                book.publisher = self.publisher;
            },
            None => {},
        }
    }
}

fn with_variant<V: Variant>(
    content: &mut Option<Content>,
    attribute: &Attribute,
    apply: impl FnOnce(&mut V) -> Result<()>,
) -> Result<()> {
    match ensure::<V>(content) {
        Some(variant) => apply(variant),
        None => {
            tracing::trace!(name = %attribute.name, "attribute belongs to another kind of content");
            Ok(())
        },
    }
}

fn tv(tv: &mut Tv, attribute: &Attribute, value: &str) -> Result<()> {
    match attribute.name.as_str() {
        consts::SEASON => tv.season = Some(number(attribute, strip_marker(value, 'S'))?),
        consts::EPISODE => {
            // "5/12" is episode five of twelve.
            let episode = strip_marker(value, 'E').split('/').next().unwrap_or_default();
            tv.episode = Some(number(attribute, episode.trim())?);
        },
        consts::RAGE_ID => tv.tvrage_id = Some(number(attribute, value)?),
        consts::TV_TITLE => tv.tvrage_title = text(value),
        consts::TV_AIR_DATE => tv.aired = Some(date(attribute, value)?),
        consts::TVDB_ID => tv.tvdb_id = Some(number(attribute, value)?),
        consts::TVMAZE_ID => tv.tvmaze_id = Some(number(attribute, value)?),
        _ => {},
    }
    Ok(())
}

fn movie(movie: &mut Movie, attribute: &Attribute, value: &str) -> Result<()> {
    match attribute.name.as_str() {
        consts::IMDB => {
            let id = value.strip_prefix("tt").unwrap_or(value);
            movie.imdb_id = Some(number(attribute, id)?);
        },
        consts::IMDB_SCORE => movie.imdb_score = Some(score(attribute, value)?),
        consts::IMDB_TITLE => movie.imdb_title = text(value),
        consts::IMDB_TAGLINE => movie.imdb_tagline = text(value),
        consts::IMDB_PLOT => movie.imdb_plot = text(value),
        consts::IMDB_YEAR => movie.imdb_year = Some(number(attribute, value)?),
        consts::IMDB_DIRECTOR => movie.imdb_director = text(value),
        consts::IMDB_ACTORS => movie.imdb_actors = list(value, ','),
        _ => {},
    }
    Ok(())
}

fn music(music: &mut Music, attribute: &Attribute, value: &str) -> Result<()> {
    match attribute.name.as_str() {
        consts::ARTIST => music.artist = text(value),
        consts::ALBUM => music.album = text(value),
        consts::TRACKS => music.tracks = list(value, '|'),
        _ => {},
    }
    Ok(())
}

fn book(book: &mut Book, attribute: &Attribute, value: &str) -> Result<()> {
    match attribute.name.as_str() {
        consts::BOOK_TITLE => book.title = text(value),
        consts::PUBLISH_DATE => book.published = Some(date(attribute, value)?),
        consts::AUTHOR => book.author = text(value),
        consts::PAGES => book.pages = Some(number(attribute, value)?),
        _ => {},
    }
    Ok(())
}

fn invalid(attribute: &Attribute) -> ErrorKind {
    ErrorKind::InvalidAttribute {
        name: attribute.name.clone(),
        value: attribute.value.clone(),
    }
}

fn number<T>(attribute: &Attribute, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse::<T>().or_raise(|| invalid(attribute))
}

/// Scores are sometimes written out of ten, e.g. `7.5/10`.
fn score(attribute: &Attribute, value: &str) -> Result<f32> {
    let score = value.split('/').next().unwrap_or_default();
    number(attribute, score.trim())
}

fn date(attribute: &Attribute, value: &str) -> Result<OffsetDateTime> {
    parse_date(value).or_raise(|| invalid(attribute))
}

fn url(attribute: &Attribute, value: &str) -> Result<Url> {
    Url::parse(value).or_raise(|| invalid(attribute))
}

/// Indexers disagree on how to say a release is passworded: some send `0`,
/// `1` or `2` (none, passworded, possibly passworded), others yes/no.
fn password(attribute: &Attribute, value: &str) -> Result<bool> {
    match value.parse::<u8>() {
        Ok(flag) => Ok(flag != 0),
        Err(_) => parse_yes_no(value).or_raise(|| invalid(attribute)),
    }
}

fn strip_marker(value: &str, marker: char) -> &str {
    value.strip_prefix([marker, marker.to_ascii_lowercase()]).unwrap_or(value)
}

fn text(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn list(value: &str, separator: char) -> Vec<String> {
    value.split(separator).map(str::trim).filter(|part| !part.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Categorisation, Dates, File, Meta, Release, Source, Usenet};
    use rstest::rstest;
    use std::sync::Arc;
    use time::macros::datetime;

    fn entry() -> Entry {
        Entry {
            meta: Meta {
                guid: Uuid::nil(),
                source: Source {
                    endpoint: None,
                    api_key: None,
                    channel: Arc::default(),
                    item: Default::default(),
                },
                categorisation: Categorisation::default(),
                dates: Dates::default(),
                usenet: Usenet::default(),
                grabs: 0,
                comments: 0,
                nfo: None,
            },
            release: Release::default(),
            content: None,
            file: File::from_enclosure("https://indexer.example/getnzb/abc.nzb", None).unwrap(),
        }
    }

    fn attrs(pairs: &[(&str, &str)]) -> Vec<Attribute> {
        pairs.iter().map(|(name, value)| Attribute::new("newznab", *name, *value)).collect()
    }

    fn decoded(pairs: &[(&str, &str)]) -> Entry {
        let mut entry = entry();
        decode(&mut entry, &attrs(pairs));
        entry
    }

    #[test]
    fn entry_level_attributes() {
        let entry = decoded(&[
            ("category", "5000"),
            ("category", "5040"),
            ("category", "not-a-number"),
            ("guid", "24967ef4c2e26296c65d3bbfa97aa8fe"),
            ("size", "1073741824"),
            ("files", "42"),
            ("poster", "poster@example.com (Poster)"),
            ("group", "alt.binaries.teevee"),
            ("group", "alt.binaries.teevee, alt.binaries.multimedia"),
            ("team", "DIMENSION"),
            ("grabs", "17"),
            ("comments", "3"),
            ("password", "1"),
            ("info", "https://indexer.example/api?t=info&id=abc"),
            ("usenetdate", "Tue, 15 Nov 2011 04:11:47 +0000"),
        ]);
        assert_eq!(entry.meta.categorisation.categories, vec![Category::TV, Category::TV_HD]);
        assert_eq!(entry.meta.guid.simple().to_string(), "24967ef4c2e26296c65d3bbfa97aa8fe");
        assert_eq!(entry.file.size(), Some(1073741824));
        assert_eq!(entry.file.file_count(), Some(42));
        assert_eq!(entry.meta.usenet.poster.as_deref(), Some("poster@example.com (Poster)"));
        assert_eq!(entry.meta.usenet.groups, vec!["alt.binaries.teevee", "alt.binaries.multimedia"]);
        assert_eq!(entry.release.group.as_deref(), Some("DIMENSION"));
        assert_eq!(entry.meta.grabs, 17);
        assert_eq!(entry.meta.comments, 3);
        assert!(entry.file.passworded());
        assert_eq!(entry.meta.nfo.as_ref().map(Url::as_str), Some("https://indexer.example/api?t=info&id=abc"));
        assert_eq!(entry.meta.dates.usenet, Some(datetime!(2011-11-15 04:11:47 UTC)));
        assert_eq!(entry.content, None);
    }

    #[test]
    fn invalid_guid_resets_to_nil() {
        let entry = decoded(&[("guid", "24967ef4c2e26296c65d3bbfa97aa8fe"), ("guid", "not-a-uuid")]);
        assert!(entry.meta.guid.is_nil());
    }

    #[test]
    fn failed_values_keep_the_previous_value() {
        let entry = decoded(&[("grabs", "10"), ("grabs", "many"), ("usenetdate", "yesterday")]);
        assert_eq!(entry.meta.grabs, 10);
        assert_eq!(entry.meta.dates.usenet, None);

        let mut entry = entry;
        let err = apply(&mut entry, &mut Shared::default(), &Attribute::new("newznab", "grabs", "many")).unwrap_err();
        assert_eq!(
            *err,
            ErrorKind::InvalidAttribute {
                name: "grabs".to_string(),
                value: "many".to_string(),
            }
        );
    }

    #[rstest]
    #[case("0", false)]
    #[case("1", true)]
    #[case("2", true)]
    #[case("yes", true)]
    #[case("No", false)]
    #[case("true", true)]
    fn password_encodings(#[case] value: &str, #[case] expected: bool) {
        let entry = decoded(&[("password", value)]);
        assert_eq!(entry.file.passworded(), expected);
    }

    #[rstest]
    #[case("3", "5", Some(3), Some(5))]
    #[case("S03", "E05", Some(3), Some(5))]
    #[case("s03", "e05", Some(3), Some(5))]
    #[case("3", "5/12", Some(3), Some(5))]
    #[case("three", "five", None, None)]
    fn season_and_episode(
        #[case] season: &str,
        #[case] episode: &str,
        #[case] expected_season: Option<u32>,
        #[case] expected_episode: Option<u32>,
    ) {
        let entry = decoded(&[("season", season), ("episode", episode)]);
        let Some(Content::Tv(tv)) = entry.content else {
            panic!("expected TV content, got {:?}", entry.content);
        };
        assert_eq!(tv.season, expected_season);
        assert_eq!(tv.episode, expected_episode);
    }

    #[test]
    fn tv_attributes() {
        let entry = decoded(&[
            ("rageid", "20720"),
            ("tvtitle", "White Collar"),
            ("tvairdate", "Tue, 15 Nov 2011 02:00:00 +0000"),
            ("tvdbid", "108611"),
            ("tvmazeid", "147"),
            ("video", "x264"),
            ("resolution", "1280x720"),
            ("framerate", "23.976"),
            ("subs", "English, French"),
            ("audio", "AC3"),
            ("language", "English"),
            ("genre", "Drama"),
            ("coverurl", "https://images.example/cover.jpg"),
            ("publisher", "ignored for tv"),
        ]);
        let content = entry.content.unwrap();
        assert_eq!(content.title(), Some("White Collar"));
        assert_eq!(content.release_year(), Some(2011));
        let Content::Tv(tv) = content else {
            panic!("expected TV content");
        };
        assert_eq!(tv.tvrage_id, Some(20720));
        assert_eq!(tv.tvdb_id, Some(108611));
        assert_eq!(tv.tvmaze_id, Some(147));
        assert_eq!(
            tv.video,
            Video {
                codec: Some("x264".to_string()),
                resolution: Some("1280x720".to_string()),
                framerate: Some(23.976),
                subtitles: vec!["English".to_string(), "French".to_string()],
            }
        );
        assert_eq!(tv.audio.codec.as_deref(), Some("AC3"));
        assert_eq!(tv.audio.languages, vec!["English"]);
        assert_eq!(tv.genre.as_deref(), Some("Drama"));
        assert_eq!(tv.artwork.cover.as_ref().map(Url::as_str), Some("https://images.example/cover.jpg"));
    }

    #[test]
    fn movie_attributes() {
        let entry = decoded(&[
            ("year", "1995"),
            ("imdb", "0111161"),
            ("imdbscore", "9.3"),
            ("imdbtitle", "The Shawshank Redemption"),
            ("imdbtagline", "Fear can hold you prisoner. Hope can set you free."),
            ("imdbplot", "Two imprisoned men bond over a number of years."),
            ("imdbyear", "1994"),
            ("imdbdirector", "Frank Darabont"),
            ("imdbactors", "Tim Robbins, Morgan Freeman"),
            ("review", "8.5/10"),
        ]);
        let Some(Content::Movie(movie)) = entry.content else {
            panic!("expected movie content, got {:?}", entry.content);
        };
        assert_eq!(movie.imdb_id, Some(111161));
        assert_eq!(movie.imdb_tt().as_deref(), Some("tt0111161"));
        assert_eq!(movie.imdb_score, Some(9.3));
        assert_eq!(movie.imdb_year, Some(1994));
        assert_eq!(movie.imdb_director.as_deref(), Some("Frank Darabont"));
        assert_eq!(movie.imdb_actors, vec!["Tim Robbins", "Morgan Freeman"]);
        assert_eq!(movie.review_score, Some(8.5));
    }

    #[test]
    fn movie_year_falls_back_to_year() {
        let entry = decoded(&[("year", "1994"), ("imdb", "tt0111161")]);
        assert_eq!(entry.content.and_then(|content| content.release_year()), Some(1994));
    }

    #[test]
    fn music_attributes() {
        let entry = decoded(&[
            ("genre", "Jazz"),
            ("artist", "Miles Davis"),
            ("album", "Kind of Blue"),
            ("tracks", "So What|Freddie Freeloader|Blue in Green"),
            ("year", "1959"),
            ("publisher", "Columbia"),
            ("resolution", "ignored for music"),
        ]);
        let content = entry.content.unwrap();
        assert_eq!(content.title(), Some("Kind of Blue"));
        assert_eq!(content.release_year(), Some(1959));
        let Content::Music(music) = content else {
            panic!("expected music content");
        };
        assert_eq!(music.artist.as_deref(), Some("Miles Davis"));
        assert_eq!(music.tracks, vec!["So What", "Freddie Freeloader", "Blue in Green"]);
        assert_eq!(music.genre.as_deref(), Some("Jazz"));
        assert_eq!(music.publisher.as_deref(), Some("Columbia"));
    }

    #[test]
    fn book_attributes() {
        let entry = decoded(&[
            ("booktitle", "Dune"),
            ("publishdate", "1965-08-01T00:00:00Z"),
            ("author", "Frank Herbert"),
            ("pages", "412"),
            ("coverurl", "https://images.example/dune.jpg"),
            ("backdropcoverurl", "https://images.example/ignored.jpg"),
            ("publisher", "Chilton Books"),
        ]);
        let content = entry.content.unwrap();
        assert_eq!(content.title(), Some("Dune"));
        assert_eq!(content.release_year(), Some(1965));
        let Content::Book(book) = content else {
            panic!("expected book content");
        };
        assert_eq!(book.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(book.pages, Some(412));
        assert_eq!(book.cover.as_ref().map(Url::as_str), Some("https://images.example/dune.jpg"));
        assert_eq!(book.publisher.as_deref(), Some("Chilton Books"));
    }

    #[test]
    fn first_content_kind_wins() {
        let entry = decoded(&[("season", "1"), ("imdb", "0111161"), ("artist", "Someone"), ("episode", "2")]);
        assert_eq!(
            entry.content,
            Some(Content::Tv(Tv {
                season: Some(1),
                episode: Some(2),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn shared_values_without_content_are_dropped() {
        let entry = decoded(&[("genre", "Drama"), ("video", "x264"), ("unknown", "value")]);
        assert_eq!(entry.content, None);
    }

    #[test]
    fn attribute_order_does_not_matter() {
        let pairs = [
            ("genre", "Drama"),
            ("episode", "5"),
            ("season", "3"),
            ("video", "x264"),
            ("category", "5040"),
            ("tvtitle", "White Collar"),
        ];
        let forwards = decoded(&pairs);
        let mut reversed = pairs;
        reversed.reverse();
        let backwards = decoded(&reversed);
        assert_eq!(forwards.content, backwards.content);
        assert_eq!(forwards.meta, backwards.meta);
    }
}
