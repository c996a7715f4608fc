use async_graphql::{Context, Object};
use bookshelf_common_types::{AuthorId, BookId};

use super::{api_types, ctx_data};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetches a single book by id, or `null` if there's no such book.
    async fn book(&self, ctx: &Context<'_>, id: BookId) -> Option<api_types::Book> {
        ctx_data(ctx).store.book(id).map(Into::into)
    }

    /// Lists all books, oldest first.
    async fn books(&self, ctx: &Context<'_>) -> Vec<api_types::Book> {
        ctx_data(ctx)
            .store
            .books()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Fetches a single author by id, or `null` if there's no such author.
    async fn author(&self, ctx: &Context<'_>, id: AuthorId) -> Option<api_types::Author> {
        ctx_data(ctx).store.author(id).map(Into::into)
    }

    /// Lists all authors, oldest first.
    async fn authors(&self, ctx: &Context<'_>) -> Vec<api_types::Author> {
        ctx_data(ctx)
            .store
            .authors()
            .into_iter()
            .map(Into::into)
            .collect()
    }
}
