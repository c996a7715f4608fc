use std::collections::BTreeMap;

use bookshelf_common_types::{Author, AuthorId, Book, BookId};

use crate::{Dataset, StoreError};

/// The data behind a [`crate::Store`]. Ids are handed out by monotonic
/// counters and never reused, so ascending id order is also creation order.
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    pub authors: BTreeMap<AuthorId, Author>,
    pub books: BTreeMap<BookId, Book>,
    last_author_id: AuthorId,
    last_book_id: BookId,
}

impl Catalog {
    pub fn seeded(dataset: Dataset) -> Result<Self, StoreError> {
        let mut catalog = Self::default();

        for author in dataset.authors {
            if author.id <= 0 {
                return Err(StoreError::NonPositiveId(author.id));
            }
            catalog.last_author_id = catalog.last_author_id.max(author.id);
            if let Some(dup) = catalog.authors.insert(author.id, author) {
                return Err(StoreError::DuplicateAuthorId(dup.id));
            }
        }
        for book in dataset.books {
            if book.id <= 0 {
                return Err(StoreError::NonPositiveId(book.id));
            }
            catalog.last_book_id = catalog.last_book_id.max(book.id);
            if let Some(dup) = catalog.books.insert(book.id, book) {
                return Err(StoreError::DuplicateBookId(dup.id));
            }
        }

        Ok(catalog)
    }

    pub fn next_author_id(&mut self) -> Result<AuthorId, StoreError> {
        self.last_author_id = self
            .last_author_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted("author"))?;
        Ok(self.last_author_id)
    }

    pub fn next_book_id(&mut self) -> Result<BookId, StoreError> {
        self.last_book_id = self
            .last_book_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted("book"))?;
        Ok(self.last_book_id)
    }

    /// Removes and returns every book matching `predicate`, in id order.
    pub fn remove_books_where(&mut self, predicate: impl Fn(&Book) -> bool) -> Vec<Book> {
        let ids: Vec<BookId> = self
            .books
            .values()
            .filter(|book| predicate(book))
            .map(|book| book.id)
            .collect();

        ids.into_iter()
            .filter_map(|id| self.books.remove(&id))
            .collect()
    }
}
