use async_graphql::{Context, Object};
use bookshelf_common_types as common;
use common::{AuthorId, BookId};

use super::ctx_data;

/// An author, together with the books that reference them.
#[derive(Clone, Debug, derive_more::From)]
pub struct Author {
    model: common::Author,
}

#[Object]
impl Author {
    async fn id(&self) -> AuthorId {
        self.model.id
    }

    async fn name(&self) -> &str {
        &self.model.name
    }

    /// All books whose `authorId` is this author's id.
    async fn books(&self, ctx: &Context<'_>) -> Vec<Book> {
        ctx_data(ctx)
            .store
            .books_by_author(self.model.id)
            .into_iter()
            .map(Into::into)
            .collect()
    }
}

/// A book. Its `authorId` may point to an author that doesn't exist (anymore).
#[derive(Clone, Debug, derive_more::From)]
pub struct Book {
    model: common::Book,
}

#[Object]
impl Book {
    async fn id(&self) -> BookId {
        self.model.id
    }

    async fn name(&self) -> &str {
        &self.model.name
    }

    async fn author_id(&self) -> AuthorId {
        self.model.author_id
    }

    /// Publication year, 0 if unknown.
    async fn year(&self) -> i32 {
        self.model.year
    }

    async fn genre(&self) -> &str {
        &self.model.genre
    }

    /// The author referenced by `authorId`, if there is one.
    async fn author(&self, ctx: &Context<'_>) -> Option<Author> {
        ctx_data(ctx)
            .store
            .author(self.model.author_id)
            .map(Into::into)
    }
}
