use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that every directive a document uses is defined by the schema.
///
/// Directives are checked while entering the node they annotate — operations, fields,
/// fragment spreads, inline fragments, and fragment definitions — so an unknown directive
/// fails before any of the node's children (arguments included) are visited.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Directives-Are-Defined)
#[derive(Default)]
pub struct KnownDirectives;

impl<'a> ValidationRule<'a> for KnownDirectives {}

fn check_directives<'a>(
    ctx: &mut ValidationContext<'a>,
    directives: &'a Directives<'a>,
) -> VisitFlow {
    for directive in directives.children.iter() {
        if ctx.schema.get_directive(directive.name).is_none() {
            return ctx.add_error(format!("Unknown directive \"@{}\"", directive.name));
        }
    }
    VisitFlow::Next
}

impl<'a> Visitor<'a, ValidationContext<'a>> for KnownDirectives {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
    ) -> VisitFlow {
        check_directives(ctx, &operation.directives)
    }

    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        check_directives(ctx, &field.directives)
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        inline_fragment: &'a InlineFragment<'a>,
    ) -> VisitFlow {
        check_directives(ctx, &inline_fragment.directives)
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment_spread: &'a FragmentSpread<'a>,
    ) -> VisitFlow {
        check_directives(ctx, &fragment_spread.directives)
    }

    fn enter_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
    ) -> VisitFlow {
        check_directives(ctx, &fragment.directives)
    }
}
