//! # Visiting GraphQL ASTs
//!
//! The `graphql_validate::visit` module contains the traversal engine that validation is
//! built on. Mainly, this module exposes two traits relevant to this task:
//!
//! - The [Visitor] trait can be used to implement a visitor with `enter_` and `leave_`
//!   callbacks per AST node kind.
//! - The [`VisitNode`] trait drives a visitor over an AST node tree in depth-first order.
//!
//! Callbacks return [`VisitFlow`] signals to continue, skip a subtree, or abort the
//! traversal, and [`ComposedVisitor`] runs two visitors in a single walk.
//!
//! In this example we define a visitor that counts all operations in a document:
//!
//! ```
//! use graphql_validate::{ast::*, visit::*};
//!
//! #[derive(Default)]
//! struct CountOperations {
//!     operations: usize,
//! }
//!
//! impl<'a> Visitor<'a> for CountOperations {
//!     fn enter_fragment(
//!         &mut self,
//!         _ctx: &mut (),
//!         _fragment: &'a FragmentDefinition<'a>,
//!     ) -> VisitFlow {
//!         // Fragment subtrees contain no operations and don't need to be walked
//!         VisitFlow::Skip
//!     }
//!
//!     fn enter_operation(
//!         &mut self,
//!         _ctx: &mut (),
//!         _operation: &'a OperationDefinition<'a>,
//!     ) -> VisitFlow {
//!         self.operations += 1;
//!         VisitFlow::Next
//!     }
//! }
//!
//! let ctx = ASTContext::new();
//! let document = Document::parse(&ctx, "{ field }").unwrap();
//! let mut visitor = CountOperations::default();
//! document.visit(&mut (), &mut visitor);
//! assert_eq!(visitor.operations, 1);
//! ```

mod compose;
mod visitor;

pub use compose::ComposedVisitor;
pub use visitor::*;
