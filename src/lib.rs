//! `graphql_validate`
//! =========
//!
//! _Schema-aware static validation for the GraphQL Query Language._
//!
//! The **`graphql_validate`** library decides whether a parsed GraphQL query document is
//! executable against a schema, and reports a precise error otherwise. It follows two
//! goals:
//!
//! - To support a pleasant-to-use API for validating GraphQL Query Language documents
//! - To be fast and allocation-friendly while checking individual GraphQL requests
//!
//! The crate intentionally stops short of full server-side GraphQL execution: schemas are
//! metadata-only "client schemas" built from SDL text, and validation is a pure function
//! over one schema and one document. This makes the library a fit for intermediary
//! GraphQL layers which operate inbetween GraphQL clients and GraphQL servers and need to
//! reject broken documents before forwarding them.
//!
//! Validation is a single arena-allocated, depth-first walk: the [visit] module drives
//! [`Visitor`](visit::Visitor) callbacks over the AST, while the rules in
//! [`validate::rules`] check the semantic invariants of the GraphQL specification against
//! the accumulated [`ValidationContext`](validate::ValidationContext). The first rule
//! violation aborts the walk and surfaces as the error.
//!
//! ```
//! use graphql_validate::ast::*;
//! use graphql_validate::schema::Schema;
//! use graphql_validate::validate::validate;
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
//! let document = Document::parse(&ctx, "{ hello }").unwrap();
//! assert!(validate(&ctx, schema, document).is_ok());
//! ```
//!
//! [A good place to start learning more about this crate is the `ast` module...](ast)

pub mod ast;
pub mod error;
pub mod schema;
pub mod validate;
pub mod visit;

pub use bumpalo;
