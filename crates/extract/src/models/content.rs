use time::OffsetDateTime;
use url::Url;

/// What an entry's files contain.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Tv(Tv),
    Movie(Movie),
    Music(Music),
    Book(Book),
}

impl Content {
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Tv(tv) => tv.tvrage_title.as_deref(),
            Self::Movie(movie) => movie.imdb_title.as_deref(),
            Self::Music(music) => music.album.as_deref(),
            Self::Book(book) => book.title.as_deref(),
        }
    }

    pub fn release_year(&self) -> Option<i32> {
        match self {
            Self::Tv(tv) => tv.aired.map(|aired| aired.year()),
            Self::Movie(movie) => movie.imdb_year,
            Self::Music(music) => music.year,
            Self::Book(book) => book.published.map(|published| published.year()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tv(_) => "tv",
            Self::Movie(_) => "movie",
            Self::Music(_) => "music",
            Self::Book(_) => "book",
        }
    }
}

/// Video stream details, carried by TV and movies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Video {
    pub codec: Option<String>,
    pub resolution: Option<String>,
    pub framerate: Option<f32>,
    pub subtitles: Vec<String>,
}

/// Audio stream details, carried by TV, movies and music.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audio {
    pub codec: Option<String>,
    pub languages: Vec<String>,
}

/// Cover images, carried by TV, movies and music.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artwork {
    pub cover: Option<Url>,
    pub backdrop: Option<Url>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tv {
    pub season: Option<u32>,
    /// Episode number within the season.
    pub episode: Option<u32>,
    pub tvrage_id: Option<u64>,
    pub tvrage_title: Option<String>,
    pub aired: Option<OffsetDateTime>,
    pub tvdb_id: Option<u64>,
    pub tvmaze_id: Option<u64>,
    pub video: Video,
    pub audio: Audio,
    pub artwork: Artwork,
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Movie {
    /// Numeric part of the IMDB identifier (`tt0111161` is `111161`).
    pub imdb_id: Option<u32>,
    pub imdb_score: Option<f32>,
    pub imdb_title: Option<String>,
    pub imdb_tagline: Option<String>,
    pub imdb_plot: Option<String>,
    pub imdb_year: Option<i32>,
    pub imdb_director: Option<String>,
    pub imdb_actors: Vec<String>,
    pub video: Video,
    pub audio: Audio,
    pub artwork: Artwork,
    pub genre: Option<String>,
    pub review_score: Option<f32>,
}

impl Movie {
    /// The IMDB identifier in its canonical `tt0000000` form.
    pub fn imdb_tt(&self) -> Option<String> {
        self.imdb_id.map(|id| format!("tt{id:07}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Music {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub tracks: Vec<String>,
    pub year: Option<i32>,
    pub audio: Audio,
    pub artwork: Artwork,
    pub genre: Option<String>,
    pub review_score: Option<f32>,
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    pub title: Option<String>,
    pub published: Option<OffsetDateTime>,
    pub author: Option<String>,
    pub pages: Option<u32>,
    pub cover: Option<Url>,
    pub review_score: Option<f32>,
    pub publisher: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn title_and_year_per_variant() {
        let tv = Content::Tv(Tv {
            tvrage_title: Some("White Collar".to_string()),
            aired: Some(datetime!(2011-11-15 00:00 UTC)),
            ..Default::default()
        });
        assert_eq!(tv.title(), Some("White Collar"));
        assert_eq!(tv.release_year(), Some(2011));

        let movie = Content::Movie(Movie {
            imdb_title: Some("The Shawshank Redemption".to_string()),
            imdb_year: Some(1994),
            ..Default::default()
        });
        assert_eq!(movie.title(), Some("The Shawshank Redemption"));
        assert_eq!(movie.release_year(), Some(1994));

        let music = Content::Music(Music {
            album: Some("Kind of Blue".to_string()),
            year: Some(1959),
            ..Default::default()
        });
        assert_eq!(music.title(), Some("Kind of Blue"));
        assert_eq!(music.release_year(), Some(1959));

        let book = Content::Book(Book::default());
        assert_eq!(book.title(), None);
        assert_eq!(book.release_year(), None);
        assert_eq!(book.kind(), "book");
    }

    #[test]
    fn imdb_identifier_is_zero_padded() {
        let movie = Movie {
            imdb_id: Some(111161),
            ..Default::default()
        };
        assert_eq!(movie.imdb_tt().as_deref(), Some("tt0111161"));
        assert_eq!(Movie::default().imdb_tt(), None);
    }
}
