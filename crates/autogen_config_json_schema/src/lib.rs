//! Regenerates `schema.json`, the JSON Schema of Bookshelf's YAML
//! configuration file, every time this crate is built.
