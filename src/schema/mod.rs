//! # Using Schema Definitions
//!
//! The `graphql_validate::schema` module contains the schema object model that documents
//! are validated against, and a parser to create it from schema definition language text.
//! The schema in this crate is never executable and serves only for metadata and type
//! information; it's what a "Client Schema" would be on a GraphQL client.
//!
//! ```
//! use graphql_validate::{ast::ASTContext, schema::Schema};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
//! assert_eq!(schema.query_type().unwrap().name, "Query");
//! ```
//!
//! [More information on the Schema struct.](Schema)

#[allow(clippy::module_inception)]
mod schema;
mod sdl;

pub use schema::*;
