//! In-memory storage of the book catalog.

mod catalog;
mod dataset;

use std::sync::Arc;

use bookshelf_common_types::{Author, AuthorId, Book, BookId, NewAuthor, NewBook};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use self::catalog::Catalog;
pub use self::dataset::Dataset;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("author id {0} appears more than once in the dataset")]
    DuplicateAuthorId(AuthorId),
    #[error("book id {0} appears more than once in the dataset")]
    DuplicateBookId(BookId),
    #[error("ids must be positive, got {0}")]
    NonPositiveId(i32),
    #[error("no {0} ids left to hand out")]
    IdsExhausted(&'static str),
}

/// The outcome of [`Store::delete_author`]. Dependent books are removed even
/// when no author with the given id exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorRemoval {
    pub author: Option<Author>,
    pub books: Vec<Book>,
}

/// An abstraction over all catalog operations. It uses [`Arc`] internally, so
/// it's cheaply cloneable, and every clone sees the same data.
///
/// All reads and writes go through a single [`RwLock`], so each operation is
/// atomic with respect to every other one, cascading deletes included.
#[derive(Clone, Default)]
pub struct Store {
    catalog: Arc<RwLock<Catalog>>,
}

impl Store {
    /// Builds a store seeded with `dataset`. Newly created entities get ids
    /// strictly greater than any seeded id.
    pub fn new(dataset: Dataset) -> Result<Self, StoreError> {
        let catalog = Catalog::seeded(dataset)?;
        info!(
            authors = catalog.authors.len(),
            books = catalog.books.len(),
            "Store seeded"
        );
        Ok(Self {
            catalog: Arc::new(RwLock::new(catalog)),
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn author(&self, id: AuthorId) -> Option<Author> {
        self.catalog.read().authors.get(&id).cloned()
    }

    pub fn book(&self, id: BookId) -> Option<Book> {
        self.catalog.read().books.get(&id).cloned()
    }

    /// All authors, in ascending id order.
    pub fn authors(&self) -> Vec<Author> {
        self.catalog.read().authors.values().cloned().collect()
    }

    /// All books, in ascending id order.
    pub fn books(&self) -> Vec<Book> {
        self.catalog.read().books.values().cloned().collect()
    }

    pub fn books_by_author(&self, author_id: AuthorId) -> Vec<Book> {
        self.catalog
            .read()
            .books
            .values()
            .filter(|book| book.author_id == author_id)
            .cloned()
            .collect()
    }

    /// Inserts an author under a fresh id. Fails only once every positive id
    /// has been used.
    pub fn insert_author(&self, new_author: NewAuthor) -> Result<Author, StoreError> {
        let mut catalog = self.catalog.write();
        let author = Author {
            id: catalog.next_author_id()?,
            name: new_author.name,
        };
        catalog.authors.insert(author.id, author.clone());

        debug!(author_id = author.id, "Inserted author");
        Ok(author)
    }

    /// Inserts a book. The author it points to doesn't need to exist.
    pub fn insert_book(&self, new_book: NewBook) -> Result<Book, StoreError> {
        let mut catalog = self.catalog.write();
        if !catalog.authors.contains_key(&new_book.author_id) {
            warn!(
                author_id = new_book.author_id,
                "Inserting a book for an unknown author"
            );
        }

        let book = Book {
            id: catalog.next_book_id()?,
            name: new_book.name,
            author_id: new_book.author_id,
            year: new_book.year,
            genre: new_book.genre,
        };
        catalog.books.insert(book.id, book.clone());

        debug!(book_id = book.id, author_id = book.author_id, "Inserted book");
        Ok(book)
    }

    /// Renames an author in place. Returns the renamed author, or `None` if
    /// there's no author with that id, in which case nothing changes.
    pub fn rename_author(&self, id: AuthorId, new_name: &str) -> Option<Author> {
        let mut catalog = self.catalog.write();
        let author = catalog.authors.get_mut(&id)?;
        author.name = new_name.to_string();

        debug!(author_id = id, "Renamed author");
        Some(author.clone())
    }

    /// Same as [`Store::rename_author`], for books.
    pub fn rename_book(&self, id: BookId, new_name: &str) -> Option<Book> {
        let mut catalog = self.catalog.write();
        let book = catalog.books.get_mut(&id)?;
        book.name = new_name.to_string();

        debug!(book_id = id, "Renamed book");
        Some(book.clone())
    }

    /// Deletes the author with the given id together with **all** books
    /// whose `author_id` matches it.
    pub fn delete_author(&self, id: AuthorId) -> AuthorRemoval {
        let mut catalog = self.catalog.write();
        let author = catalog.authors.remove(&id);
        let books = catalog.remove_books_where(|book| book.author_id == id);

        debug!(
            author_id = id,
            found = author.is_some(),
            removed_books = books.len(),
            "Deleted author"
        );
        AuthorRemoval { author, books }
    }

    pub fn delete_book(&self, id: BookId) -> Option<Book> {
        let removed = self.catalog.write().books.remove(&id);

        debug!(book_id = id, found = removed.is_some(), "Deleted book");
        removed
    }
}
