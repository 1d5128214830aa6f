use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no operations the document defines have duplicate names.
/// Note: Operations and Fragments are allowed to share names.
///
/// Passed operation names are recorded on the [`ValidationContext`] so that
/// [`super::LoneAnonymousOperation`], which runs after this rule on each operation, can
/// consult them.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Operation-Name-Uniqueness)
#[derive(Default)]
pub struct UniqueOperationNames;

impl<'a> ValidationRule<'a> for UniqueOperationNames {}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueOperationNames {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
    ) -> VisitFlow {
        if let Some(name) = operation.name {
            if ctx.operation_names.contains(&name.name) {
                return ctx.add_error(format!(
                    "Document must not contain multiple operations named \"{}\"",
                    name.name
                ));
            }
            ctx.operation_names.push(name.name);
        }
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn unique_names() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document =
            Document::parse(&ctx, "query A { hello } query B { hello }").unwrap();
        UniqueOperationNames::validate(&ctx, schema, document).unwrap();
    }

    #[test]
    fn duplicate_names() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document =
            Document::parse(&ctx, "query A { hello } mutation A { hello }").unwrap();
        let error = UniqueOperationNames::validate(&ctx, schema, document).unwrap_err();
        assert!(error.message().contains("multiple operations"));
    }

    #[test]
    fn fragments_may_share_names() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(
            &ctx,
            "query Shared { ...Shared } fragment Shared on Query { hello }",
        )
        .unwrap();
        UniqueOperationNames::validate(&ctx, schema, document).unwrap();
    }
}
