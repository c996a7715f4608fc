//! Payloads for creating catalog entities. Identifiers are never part of an
//! input; the store assigns them.

use quickcheck::{Arbitrary, Gen};

use crate::AuthorId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
}

impl NewAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: String,
    pub author_id: AuthorId,
    pub year: i32,
    pub genre: String,
}

impl NewBook {
    /// A book with no publication year and no genre.
    pub fn new(name: impl Into<String>, author_id: AuthorId) -> Self {
        Self {
            name: name.into(),
            author_id,
            year: 0,
            genre: String::new(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }
}

impl Arbitrary for NewAuthor {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            name: String::arbitrary(g),
        }
    }
}

impl Arbitrary for NewBook {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            name: String::arbitrary(g),
            // Keep author ids in a small range so that generated books
            // actually collide with generated authors.
            author_id: (u8::arbitrary(g) % 16) as AuthorId,
            year: i32::arbitrary(g),
            genre: String::arbitrary(g),
        }
    }
}
