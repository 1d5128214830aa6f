use hashbrown::HashSet;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no operation defines duplicate variable names in its variable
/// definitions.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Variable-Uniqueness)
#[derive(Default)]
pub struct UniqueVariableNames;

impl<'a> ValidationRule<'a> for UniqueVariableNames {}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueVariableNames {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
    ) -> VisitFlow {
        if operation.variable_definitions.children.len() > 1 {
            let mut seen = HashSet::new_in(ctx.arena);
            for var_def in operation.variable_definitions.children.iter() {
                if !seen.insert(var_def.variable.name) {
                    return ctx.add_error(format!(
                        "Variable \"${}\" must only be defined once",
                        var_def.variable.name
                    ));
                }
            }
        }
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn unique_variables() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document =
            Document::parse(&ctx, "query ($a: Int, $b: Int) { hello }").unwrap();
        UniqueVariableNames::validate(&ctx, schema, document).unwrap();
    }

    #[test]
    fn duplicate_variables() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document =
            Document::parse(&ctx, "query ($a: Int, $a: Int) { hello }").unwrap();
        UniqueVariableNames::validate(&ctx, schema, document).unwrap_err();
    }
}
