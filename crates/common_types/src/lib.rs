//! Catalog entity types.
//!
//! These are shared between the store, which owns them, and the GraphQL API,
//! which wraps them in its own object types.

pub mod inputs;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use inputs::{NewAuthor, NewBook};

/// Author identifiers map directly onto GraphQL's `Int`.
pub type AuthorId = i32;
/// Book identifiers map directly onto GraphQL's `Int`.
pub type BookId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub name: String,
    /// Not guaranteed to reference an existing [`Author`].
    pub author_id: AuthorId,
    /// Publication year.
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub genre: String,
}

/// The categories of notifications emitted when the catalog changes.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    // strum gives us stable metric labels.
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    AuthorAdded,
    BookAdded,
}
