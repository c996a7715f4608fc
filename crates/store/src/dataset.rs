use std::fs::File;
use std::path::Path;

use anyhow::Context;
use bookshelf_common_types::{Author, AuthorId, Book, BookId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The initial contents of a [`crate::Store`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Dataset {
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl Dataset {
    /// Reads a YAML-encoded dataset from disk.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open dataset file {}", path.display()))?;
        serde_yaml::from_reader(file).context("invalid dataset file")
    }

    /// The demo catalog the server ships with.
    pub fn builtin() -> Self {
        let authors = [
            (1, "Hans Christian Andersen"),
            (2, "J. K. Rowling"),
            (3, "F. Scott Fitzgerald"),
            (4, "Dan Brown"),
            (5, "Fyodor Dostoevsky"),
        ]
        .into_iter()
        .map(|(id, name)| Author {
            id,
            name: name.to_string(),
        })
        .collect();

        let books: [(BookId, &str, AuthorId, i32, &str); 12] = [
            (1, "Mala sirena", 1, 1837, "bajka"),
            (2, "Djevojčica sa šibicama", 1, 1845, "bajka"),
            (3, "Carevo novo ruho", 1, 1837, "bajka"),
            (4, "Snježna kraljica", 1, 1844, "bajka"),
            (5, "Harry Potter i kamen mudraca", 2, 1997, "fantastika"),
            (6, "Čudesne zvijeri i gdje ih naći", 2, 2001, "fantastika"),
            (7, "Nemirna krv", 2, 2020, "fantastika"),
            (8, "Harry Potter i Darovi smrti", 2, 2007, "fantastika"),
            (9, "Veliki Gatsby", 3, 1925, "Modernistički roman"),
            (10, "Da Vincijev kod", 4, 2003, "kriminalistički triler"),
            (11, "Zločin i kazna", 5, 1866, "kriminalistički triler"),
            (12, "Braća Karamazovi", 5, 1880, "filozofski dramski roman"),
        ];
        let books = books
            .into_iter()
            .map(|(id, name, author_id, year, genre)| Book {
                id,
                name: name.to_string(),
                author_id,
                year,
                genre: genre.to_string(),
            })
            .collect();

        Self { authors, books }
    }
}
