use async_graphql::{Context, Object};
use bookshelf_common_types::{AuthorId, BookId, NewAuthor, NewBook};
use tracing::info;

use super::{api_types, ctx_data};
use crate::event_bus::Event;
use crate::metrics;

fn record_mutation(operation: &str) {
    metrics().mutations.with_label_values(&[operation]).inc();
}

pub struct MutationRoot;

/// Update and remove mutations never fail on unknown ids: they leave the
/// catalog untouched and resolve to `null`.
#[Object]
impl MutationRoot {
    /// Creates an author and notifies `AuthorAdded` subscribers.
    async fn add_author(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> async_graphql::Result<api_types::Author> {
        record_mutation("addAuthor");
        let ctx_data = ctx_data(ctx);

        let (author, listeners) = {
            let _additions = ctx_data.additions.lock();
            let author = ctx_data.store.insert_author(NewAuthor::new(name))?;
            let listeners = ctx_data
                .event_bus
                .publish(Event::AuthorAdded(author.clone()));
            (author, listeners)
        };

        info!(author_id = author.id, listeners, "Author added");
        Ok(author.into())
    }

    /// Creates a book and notifies `BookAdded` subscribers. The author
    /// doesn't need to exist.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        author_id: AuthorId,
        #[graphql(default, desc = "Publication year. Defaults to 0 (unknown).")] year: i32,
        #[graphql(default)] genre: String,
    ) -> async_graphql::Result<api_types::Book> {
        record_mutation("addBook");
        let ctx_data = ctx_data(ctx);

        let new_book = NewBook::new(name, author_id)
            .with_year(year)
            .with_genre(genre);
        let (book, listeners) = {
            let _additions = ctx_data.additions.lock();
            let book = ctx_data.store.insert_book(new_book)?;
            let listeners = ctx_data.event_bus.publish(Event::BookAdded(book.clone()));
            (book, listeners)
        };

        info!(book_id = book.id, author_id, listeners, "Book added");
        Ok(book.into())
    }

    /// Renames an author. Resolves to the renamed author.
    async fn update_author(
        &self,
        ctx: &Context<'_>,
        id: AuthorId,
        new_name: String,
    ) -> Option<api_types::Author> {
        record_mutation("updateAuthor");
        ctx_data(ctx)
            .store
            .rename_author(id, &new_name)
            .map(Into::into)
    }

    /// Renames a book. Resolves to the renamed book.
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: BookId,
        new_name: String,
    ) -> Option<api_types::Book> {
        record_mutation("updateBook");
        ctx_data(ctx)
            .store
            .rename_book(id, &new_name)
            .map(Into::into)
    }

    /// Removes an author and **all** books referencing them. Resolves to the
    /// removed author.
    async fn remove_author(&self, ctx: &Context<'_>, id: AuthorId) -> Option<api_types::Author> {
        record_mutation("removeAuthor");
        let removal = ctx_data(ctx).store.delete_author(id);

        info!(
            author_id = id,
            found = removal.author.is_some(),
            removed_books = removal.books.len(),
            "Author removed"
        );
        removal.author.map(Into::into)
    }

    /// Removes a single book. Resolves to the removed book.
    async fn remove_book(&self, ctx: &Context<'_>, id: BookId) -> Option<api_types::Book> {
        record_mutation("removeBook");
        ctx_data(ctx).store.delete_book(id).map(Into::into)
    }
}
