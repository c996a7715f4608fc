pub mod api_types;
mod mutation_root;
mod server;
mod subscription_root;

use async_graphql::{Context, Schema, SchemaBuilder};
use bookshelf_store::Store;
use parking_lot::Mutex;

pub use self::mutation_root::MutationRoot;
pub use self::server::QueryRoot;
pub use self::subscription_root::SubscriptionRoot;
use crate::event_bus::EventBus;

pub type ApiSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

pub struct ApiSchemaContext {
    pub store: Store,
    pub event_bus: EventBus,
    /// Held across an insert and its publish, so that subscribers see new
    /// entities in id order.
    pub additions: Mutex<()>,
}

impl ApiSchemaContext {
    pub fn new(store: Store, event_bus: EventBus) -> Self {
        Self {
            store,
            event_bus,
            additions: Mutex::new(()),
        }
    }
}

pub fn api_schema_builder() -> SchemaBuilder<QueryRoot, MutationRoot, SubscriptionRoot> {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
}

pub fn api_schema(ctx: ApiSchemaContext) -> ApiSchema {
    api_schema_builder().data(ctx).finish()
}

pub fn ctx_data<'a>(ctx: &'a Context) -> &'a ApiSchemaContext {
    ctx.data::<ApiSchemaContext>()
        .expect("Failed to get API context")
}
