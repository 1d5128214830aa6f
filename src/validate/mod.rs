//! # Validation of GraphQL documents against a schema
//!
//! This module contains the logic to statically decide whether a query language document
//! is executable against a given [`Schema`](crate::schema::Schema), and to report a
//! precise error otherwise.
//!
//! Validation is a single depth-first walk over the document driven by the
//! [visit](crate::visit) module. The [`TypeInfo`] visitor keeps the shared
//! [`ValidationContext`] up to date — the fragment index, the set of used fragments, and a
//! stack of type environments — and each rule in [rules] checks one semantic invariant
//! against that context. Validation is fail-fast: the first rule violation aborts the
//! walk and becomes the returned error.
//!
//! The common entry point is [`validate`], which runs the full [`DefaultRules`] rule set:
//!
//! ```
//! use graphql_validate::ast::*;
//! use graphql_validate::schema::Schema;
//! use graphql_validate::validate::validate;
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
//! let document = Document::parse(&ctx, "{ hello }").unwrap();
//!
//! validate(&ctx, schema, document).unwrap();
//! ```
//!
//! Individual rules can also be run on their own, or combined through
//! [`ComposedVisitor`](crate::visit::ComposedVisitor), via the [`ValidationRule`] trait:
//!
//! ```
//! use graphql_validate::ast::*;
//! use graphql_validate::schema::Schema;
//! use graphql_validate::validate::*;
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
//! let document = Document::parse(&ctx, "{ hello }").unwrap();
//!
//! document.validate::<NoFragmentCycles>(&ctx, schema).unwrap();
//! ```

mod context;
mod type_info;

#[allow(clippy::module_inception)]
mod validate;

pub mod rules;

pub use context::{TypeFrame, ValidationContext};
pub use rules::*;
pub use type_info::TypeInfo;
pub use validate::*;
