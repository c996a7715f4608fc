use bookshelf_common_types::{Author, Book};
use bookshelf_store::{Dataset, Store};

use crate::event_bus::EventBus;
use crate::graphql_api::{api_schema, ApiSchema, ApiSchemaContext};

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

/// Author 1 ("A") with two books, author 2 ("B") with one.
pub fn small_dataset() -> Dataset {
    Dataset {
        authors: vec![author(1, "A"), author(2, "B")],
        books: vec![book(1, "A1", 1), book(2, "A2", 1), book(3, "B1", 2)],
    }
}

/// A full API schema over a fresh store and event bus, with handles to both
/// so tests can inspect them directly.
pub struct TestApi {
    pub schema: ApiSchema,
    pub store: Store,
    pub event_bus: EventBus,
}

impl TestApi {
    pub fn new(dataset: Dataset) -> Self {
        let store = Store::new(dataset).expect("Invalid test dataset");
        let event_bus = EventBus::new();
        let schema = api_schema(ApiSchemaContext::new(store.clone(), event_bus.clone()));

        Self {
            schema,
            store,
            event_bus,
        }
    }

    /// Executes `query` and returns its `data` as JSON, panicking on any
    /// GraphQL error.
    pub async fn execute(&self, query: &str) -> serde_json::Value {
        let response = self.schema.execute(query).await;
        assert!(
            response.errors.is_empty(),
            "GraphQL errors: {:?}",
            response.errors
        );
        response.data.into_json().unwrap()
    }
}
