use async_graphql::{Context, Subscription};
use futures::{Stream, StreamExt};

use super::{api_types, ctx_data};

pub struct SubscriptionRoot;

/// Each subscription registers its own listener on the event bus when it
/// starts and unregisters it when the client goes away. Events published
/// before that are not replayed.
#[Subscription]
impl SubscriptionRoot {
    /// Every author created by `addAuthor` from now on.
    #[graphql(name = "AuthorAdded")]
    async fn author_added(&self, ctx: &Context<'_>) -> impl Stream<Item = api_types::Author> {
        ctx_data(ctx).event_bus.authors_added().map(api_types::Author::from)
    }

    /// Every book created by `addBook` from now on.
    #[graphql(name = "BookAdded")]
    async fn book_added(&self, ctx: &Context<'_>) -> impl Stream<Item = api_types::Book> {
        ctx_data(ctx).event_bus.books_added().map(api_types::Book::from)
    }
}
