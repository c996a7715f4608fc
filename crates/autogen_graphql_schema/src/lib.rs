//! Regenerates `schema.graphql`, the SDL of the Bookshelf GraphQL API, every
//! time this crate is built.
