use bookshelf_common_types::{Author, Book};
use bookshelf_store::{Dataset, Store};

/// A wrapper around a [`Store`] seeded with a tiny, predictable catalog:
/// author 1 ("A") with books 1 and 2, and author 2 ("B") with book 3.
#[derive(derive_more::Deref)]
pub struct SeededStoreForTesting {
    #[deref]
    store: Store,
    pub dataset: Dataset,
}

impl SeededStoreForTesting {
    pub fn new() -> Self {
        let dataset = Dataset {
            authors: vec![author(1, "A"), author(2, "B")],
            books: vec![book(1, "A1", 1), book(2, "A2", 1), book(3, "B1", 2)],
        };
        let store = Store::new(dataset.clone()).unwrap();
        Self { store, dataset }
    }
}

pub fn author(id: i32, name: &str) -> Author {
    Author {
        id,
        name: name.to_string(),
    }
}

pub fn book(id: i32, name: &str, author_id: i32) -> Book {
    Book {
        id,
        name: name.to_string(),
        author_id,
        year: 2000,
        genre: "test".to_string(),
    }
}
