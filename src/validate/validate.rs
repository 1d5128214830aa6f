use std::borrow::Borrow;

use super::context::ValidationContext;
use super::rules::DefaultRules;
use super::type_info::TypeInfo;
use crate::ast::{ASTContext, Document};
use crate::error::Result;
use crate::schema::Schema;
use crate::visit::{ComposedVisitor, VisitNode, Visitor};

/// Trait for a `ValidationRule` that checks a given GraphQL document against a schema
/// using a visitor.
///
/// A rule always implements a visitor and accepts the [`ValidationContext`] structure as
/// its passed context. The [`TypeInfo`] visitor is composed in front of the rule, so the
/// context's fragment index and type stack are up to date by the time the rule's own
/// callbacks run.
///
/// Rules implement the `Default` trait, which allows them to be instantiated easily. Any
/// state a rule needs accumulates on the [`ValidationContext`] rather than on the rule
/// itself.
pub trait ValidationRule<'a>: Visitor<'a, ValidationContext<'a>> + Default {
    /// Run this `ValidationRule` against the given document and return a result which
    /// errors if the rule fails on the document.
    ///
    /// Validation is fail-fast: the first failing rule aborts the walk and its error is
    /// surfaced.
    #[inline]
    fn validate(
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
        document: &'a Document<'a>,
    ) -> Result<()> {
        let mut validation = ValidationContext::new(ctx, schema);
        let mut visitor = ComposedVisitor::new(TypeInfo, Self::default());
        document.visit(&mut validation, &mut visitor);
        validation.into_result()
    }
}

impl<'a, A, B> Default for ComposedVisitor<'a, ValidationContext<'a>, A, B>
where
    A: ValidationRule<'a>,
    B: ValidationRule<'a>,
{
    #[inline]
    fn default() -> Self {
        ComposedVisitor::new(A::default(), B::default())
    }
}

impl<'a, A, B> ValidationRule<'a> for ComposedVisitor<'a, ValidationContext<'a>, A, B>
where
    A: ValidationRule<'a>,
    B: ValidationRule<'a>,
{
}

/// Trait to run a [`ValidationRule`] on a given GraphQL Document node.
pub trait ValidateNode<'a>
where
    Self: Borrow<Document<'a>>,
{
    /// Run the generic validation rule on the document node against the given schema and
    /// return a result which errors if the validation rule fails.
    ///
    /// `document.validate::<YourValidationRule>(&ctx, schema)`
    #[inline]
    fn validate<Rule: ValidationRule<'a>>(
        &'a self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
    ) -> Result<()> {
        Rule::validate(ctx, schema, self.borrow())
    }
}

impl<'a> ValidateNode<'a> for Document<'a> {}

/// Validates a query document against a schema with the [`DefaultRules`] rule set.
///
/// This is the crate's main entry point: it returns `Ok(())` when the document is
/// executable against the schema and surfaces the first rule violation otherwise.
pub fn validate<'a>(
    ctx: &'a ASTContext,
    schema: &'a Schema<'a>,
    document: &'a Document<'a>,
) -> Result<()> {
    DefaultRules::validate(ctx, schema, document)
}
