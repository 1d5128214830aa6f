use hashbrown::HashSet;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no argument list anywhere contains duplicate names, on fields and on
/// directives alike.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Argument-Uniqueness)
#[derive(Default)]
pub struct UniqueArgumentNames;

impl<'a> ValidationRule<'a> for UniqueArgumentNames {}

fn check_duplicates<'a>(
    ctx: &mut ValidationContext<'a>,
    arguments: &'a Arguments<'a>,
) -> VisitFlow {
    if arguments.children.len() > 1 {
        let mut seen = HashSet::new_in(ctx.arena);
        for argument in arguments.children.iter() {
            if !seen.insert(argument.name) {
                return ctx.add_error(format!(
                    "Argument \"{}\" must only be passed once",
                    argument.name
                ));
            }
        }
    }
    VisitFlow::Next
}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueArgumentNames {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        check_duplicates(ctx, &field.arguments)
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a Directive<'a>,
    ) -> VisitFlow {
        check_duplicates(ctx, &directive.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn unique_arguments() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { test(a: Int, b: Int): Int }").unwrap();
        let document = Document::parse(&ctx, "{ test(a: 1, b: 2) }").unwrap();
        UniqueArgumentNames::validate(&ctx, schema, document).unwrap();
    }

    #[test]
    fn duplicate_arguments() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { test(a: Int): Int }").unwrap();
        let document = Document::parse(&ctx, "{ test(a: 1, a: 2) }").unwrap();
        UniqueArgumentNames::validate(&ctx, schema, document).unwrap_err();
    }

    #[test]
    fn duplicate_directive_arguments() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { test: Int }").unwrap();
        let document =
            Document::parse(&ctx, "{ test @skip(if: true, if: false) }").unwrap();
        UniqueArgumentNames::validate(&ctx, schema, document).unwrap_err();
    }
}
