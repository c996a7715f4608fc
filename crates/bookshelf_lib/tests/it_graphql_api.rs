use bookshelf_lib::test_utils::{author, small_dataset, TestApi};
use bookshelf_store::Dataset;
use serde_json::json;

#[tokio::test]
async fn query_single_entities_and_relations() {
    let api = TestApi::new(small_dataset());

    let data = api
        .execute(r#"{ book(id: 3) { id name authorId year genre author { id name } } }"#)
        .await;

    assert_eq!(
        data,
        json!({
            "book": {
                "id": 3,
                "name": "B1",
                "authorId": 2,
                "year": 2000,
                "genre": "test",
                "author": { "id": 2, "name": "B" }
            }
        })
    );

    let data = api.execute("{ author(id: 1) { name books { id } } }").await;
    assert_eq!(
        data,
        json!({ "author": { "name": "A", "books": [{ "id": 1 }, { "id": 2 }] } })
    );
}

#[tokio::test]
async fn missing_ids_resolve_to_null() {
    let api = TestApi::new(small_dataset());

    let data = api.execute("{ book(id: 404) { id } author(id: 404) { id } }").await;

    assert_eq!(data, json!({ "book": null, "author": null }));
}

#[tokio::test]
async fn list_queries() {
    let api = TestApi::new(small_dataset());

    let data = api.execute("{ authors { id } books { id } }").await;

    assert_eq!(
        data,
        json!({
            "authors": [{ "id": 1 }, { "id": 2 }],
            "books": [{ "id": 1 }, { "id": 2 }, { "id": 3 }]
        })
    );
}

#[tokio::test]
async fn add_book_assigns_a_fresh_id() {
    let api = TestApi::new(Dataset {
        authors: vec![author(1, "A")],
        books: vec![],
    });

    let data = api
        .execute(r#"mutation { addBook(name: "B1", authorId: 1) { id name authorId year genre } }"#)
        .await;
    assert_eq!(
        data,
        json!({
            "addBook": { "id": 1, "name": "B1", "authorId": 1, "year": 0, "genre": "" }
        })
    );

    let data = api.execute("{ books { name authorId author { name } } }").await;
    assert_eq!(
        data,
        json!({ "books": [{ "name": "B1", "authorId": 1, "author": { "name": "A" } }] })
    );
}

#[tokio::test]
async fn add_book_with_year_genre_and_unknown_author() {
    let api = TestApi::new(small_dataset());

    let data = api
        .execute(
            r#"mutation {
                addBook(name: "Orphan", authorId: 77, year: 1984, genre: "dystopia") {
                    id year genre author { id }
                }
            }"#,
        )
        .await;

    assert_eq!(
        data,
        json!({ "addBook": { "id": 4, "year": 1984, "genre": "dystopia", "author": null } })
    );
}

#[tokio::test]
async fn add_author_ids_are_unique() {
    let api = TestApi::new(small_dataset());

    let first = api.execute(r#"mutation { addAuthor(name: "C") { id } }"#).await;
    api.execute("mutation { removeAuthor(id: 3) { id } }").await;
    let second = api.execute(r#"mutation { addAuthor(name: "D") { id } }"#).await;

    assert_eq!(first, json!({ "addAuthor": { "id": 3 } }));
    assert_eq!(second, json!({ "addAuthor": { "id": 4 } }));
}

#[tokio::test]
async fn add_author_fails_once_ids_run_out() {
    let api = TestApi::new(Dataset {
        authors: vec![author(i32::MAX, "Last")],
        books: vec![],
    });

    let response = api
        .schema
        .execute(r#"mutation { addAuthor(name: "Overflow") { id } }"#)
        .await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("no author ids left"));
    assert_eq!(api.store.authors().len(), 1);
}

#[tokio::test]
async fn update_mutations() {
    let api = TestApi::new(small_dataset());

    let data = api
        .execute(
            r#"mutation {
                updateAuthor(id: 1, newName: "Alpha") { id name }
                updateBook(id: 3, newName: "Beta") { id name }
            }"#,
        )
        .await;

    assert_eq!(
        data,
        json!({
            "updateAuthor": { "id": 1, "name": "Alpha" },
            "updateBook": { "id": 3, "name": "Beta" }
        })
    );
    assert_eq!(api.store.author(1).unwrap().name, "Alpha");
}

#[tokio::test]
async fn update_unknown_author_leaves_catalog_unchanged() {
    let api = TestApi::new(small_dataset());
    let before = api.store.authors();

    let data = api
        .execute(r#"mutation { updateAuthor(id: 404, newName: "Ghost") { id } }"#)
        .await;

    assert_eq!(data, json!({ "updateAuthor": null }));
    assert_eq!(api.store.authors(), before);
}

#[tokio::test]
async fn remove_author_cascades_to_books() {
    // Author 1 has two books.
    let api = TestApi::new(small_dataset());

    let data = api.execute("mutation { removeAuthor(id: 1) { id name } }").await;
    assert_eq!(data, json!({ "removeAuthor": { "id": 1, "name": "A" } }));

    let data = api.execute("{ authors { id } books { id } }").await;
    assert_eq!(
        data,
        json!({ "authors": [{ "id": 2 }], "books": [{ "id": 3 }] })
    );
    assert!(api.store.books_by_author(1).is_empty());
}

#[tokio::test]
async fn remove_book_and_unknown_ids() {
    let api = TestApi::new(small_dataset());

    let data = api
        .execute(
            r#"mutation {
                removed: removeBook(id: 2) { name }
                missing: removeBook(id: 404) { name }
                missingAuthor: removeAuthor(id: 404) { name }
            }"#,
        )
        .await;

    assert_eq!(
        data,
        json!({ "removed": { "name": "A2" }, "missing": null, "missingAuthor": null })
    );
    assert_eq!(api.store.books().len(), 2);
}

#[tokio::test]
async fn missing_required_argument_is_a_validation_error() {
    let api = TestApi::new(small_dataset());

    let response = api.schema.execute("mutation { addAuthor { id } }").await;

    assert!(!response.errors.is_empty());
    assert_eq!(api.store.authors().len(), 2);
}

#[test]
fn schema_exposes_all_operations() {
    let api = TestApi::new(Dataset::default());
    let sdl = api.schema.sdl();

    for field in [
        "book(id: Int!): Book",
        "books: [Book!]!",
        "author(id: Int!): Author",
        "authors: [Author!]!",
        "addAuthor(name: String!): Author!",
        "removeAuthor(id: Int!): Author",
        "AuthorAdded: Author!",
        "BookAdded: Book!",
    ] {
        assert!(sdl.contains(field), "missing `{field}` in:\n{sdl}");
    }
}
