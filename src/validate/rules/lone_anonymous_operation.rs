use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that a document only contains a single anonymous operation or any number of
/// named operations.
///
/// The check fires at the offending operation itself: either an anonymous operation is
/// entered while other operations were already passed, or a named operation is entered
/// while an anonymous one was already seen. The former reads the operation names that
/// [`super::UniqueOperationNames`] records on the context, so this rule must run after it
/// on each operation.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Lone-Anonymous-Operation)
#[derive(Default)]
pub struct LoneAnonymousOperation;

impl<'a> ValidationRule<'a> for LoneAnonymousOperation {}

impl<'a> Visitor<'a, ValidationContext<'a>> for LoneAnonymousOperation {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
    ) -> VisitFlow {
        if operation.name.is_none() {
            if !ctx.operation_names.is_empty() || ctx.has_anonymous_operation {
                return ctx.add_error("Anonymous operation must be the only defined operation.");
            }
            ctx.has_anonymous_operation = true;
        } else if ctx.has_anonymous_operation {
            return ctx.add_error("Anonymous operation must be the only defined operation.");
        }
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::super::UniqueOperationNames;
    use super::*;
    use crate::visit::ComposedVisitor;

    type OperationRules<'a> =
        ComposedVisitor<'a, ValidationContext<'a>, UniqueOperationNames, LoneAnonymousOperation>;

    #[test]
    fn lone_operation() {
        let ctx = ASTContext::new();
        let schema = crate::schema::Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(&ctx, "{ hello }").unwrap();
        OperationRules::validate(&ctx, schema, document).unwrap();
    }

    #[test]
    fn named_operations() {
        let ctx = ASTContext::new();
        let schema = crate::schema::Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(&ctx, "query A { hello } query B { hello }").unwrap();
        OperationRules::validate(&ctx, schema, document).unwrap();
    }

    #[test]
    fn two_anonymous() {
        let ctx = ASTContext::new();
        let schema = crate::schema::Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(&ctx, "{ hello } { hello }").unwrap();
        LoneAnonymousOperation::validate(&ctx, schema, document).unwrap_err();
    }

    #[test]
    fn anonymous_beside_named() {
        let ctx = ASTContext::new();
        let schema = crate::schema::Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();

        let document = Document::parse(&ctx, "{ hello } query B { hello }").unwrap();
        OperationRules::validate(&ctx, schema, document).unwrap_err();

        let document = Document::parse(&ctx, "query A { hello } { hello }").unwrap();
        OperationRules::validate(&ctx, schema, document).unwrap_err();
    }
}
