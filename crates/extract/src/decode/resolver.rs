//! Lazy creation of an entry's [`Content`] variant.
//!
//! An entry learns what it contains from its attributes, one at a time and in
//! no particular order. The first content-specific attribute decides the
//! variant; attributes belonging to any other variant are discarded.

use crate::models::{Book, Content, Movie, Music, Tv};

/// A [`Content`] variant that can be created empty and found again.
pub trait Variant: Default {
    fn wrap(self) -> Content;
    fn peek(content: &mut Content) -> Option<&mut Self>;
}

/// Returns the entry's content as `V`, creating an empty `V` when the entry has
/// no content yet. Returns `None` when the content is already another variant.
pub fn ensure<V: Variant>(content: &mut Option<Content>) -> Option<&mut V> {
    V::peek(content.get_or_insert_with(|| V::default().wrap()))
}

impl Variant for Tv {
    fn wrap(self) -> Content {
        Content::Tv(self)
    }

    fn peek(content: &mut Content) -> Option<&mut Self> {
        match content {
            Content::Tv(tv) => Some(tv),
            _ => None,
        }
    }
}

impl Variant for Movie {
    fn wrap(self) -> Content {
        Content::Movie(self)
    }

    fn peek(content: &mut Content) -> Option<&mut Self> {
        match content {
            Content::Movie(movie) => Some(movie),
            _ => None,
        }
    }
}

impl Variant for Music {
    fn wrap(self) -> Content {
        Content::Music(self)
    }

    fn peek(content: &mut Content) -> Option<&mut Self> {
        match content {
            Content::Music(music) => Some(music),
            _ => None,
        }
    }
}

impl Variant for Book {
    fn wrap(self) -> Content {
        Content::Book(self)
    }

    fn peek(content: &mut Content) -> Option<&mut Self> {
        match content {
            Content::Book(book) => Some(book),
            _ => None,
        }
    }
}
