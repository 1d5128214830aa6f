use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that fragment type conditions name a known composite type.
///
/// Fragments apply to objects, interfaces, and unions; a condition on a leaf or input
/// type could never match anything at execution.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragments-On-Composite-Types)
#[derive(Default)]
pub struct FragmentsOnCompositeTypes;

impl<'a> ValidationRule<'a> for FragmentsOnCompositeTypes {}

fn check_type_condition<'a>(ctx: &mut ValidationContext<'a>, condition: &str) -> VisitFlow {
    match ctx.schema.get_type(condition) {
        None => ctx.add_error(format!(
            "Unknown type \"{}\" in fragment type condition",
            condition
        )),
        Some(of_type) if !of_type.is_composite() => ctx.add_error(format!(
            "Fragment type condition \"{}\" must be an object, interface, or union type",
            condition
        )),
        Some(_) => VisitFlow::Next,
    }
}

impl<'a> Visitor<'a, ValidationContext<'a>> for FragmentsOnCompositeTypes {
    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        inline_fragment: &'a InlineFragment<'a>,
    ) -> VisitFlow {
        match inline_fragment.type_condition {
            Some(condition) => check_type_condition(ctx, condition.name),
            None => VisitFlow::Next,
        }
    }

    fn enter_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
    ) -> VisitFlow {
        check_type_condition(ctx, fragment.type_condition.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    fn schema(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse_sdl(
            ctx,
            "type Query { me: User } type User { name: String } enum Kind { A }",
        )
        .unwrap()
    }

    #[test]
    fn composite_conditions() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            "{ me { ... on User { name } ...Named } } fragment Named on User { name }",
        )
        .unwrap();
        FragmentsOnCompositeTypes::validate(&ctx, schema(&ctx), document).unwrap();
    }

    #[test]
    fn unknown_condition() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ me { ... on Alien { name } } }").unwrap();
        let error =
            FragmentsOnCompositeTypes::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert_eq!(
            error.message(),
            "Unknown type \"Alien\" in fragment type condition"
        );
    }

    #[test]
    fn leaf_condition() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "fragment F on Kind { x } { me { name } ...F }")
            .unwrap();
        FragmentsOnCompositeTypes::validate(&ctx, schema(&ctx), document).unwrap_err();

        let document = Document::parse(&ctx, "{ me { ... on String { x } } }").unwrap();
        FragmentsOnCompositeTypes::validate(&ctx, schema(&ctx), document).unwrap_err();
    }
}
