use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that every argument passed to a field is declared on that field's definition.
///
/// When the field itself has no definition the rule abstains; the missing field is
/// [`super::FieldsOnCorrectType`]'s error to raise.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Argument-Names)
#[derive(Default)]
pub struct KnownArgumentNames;

impl<'a> ValidationRule<'a> for KnownArgumentNames {}

impl<'a> Visitor<'a, ValidationContext<'a>> for KnownArgumentNames {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        if field.arguments.is_empty() {
            return VisitFlow::Next;
        }
        let schema_field = match ctx.parent_field(field.name) {
            Some(schema_field) => schema_field,
            None => return VisitFlow::Next,
        };
        for argument in field.arguments.children.iter() {
            if schema_field.get_argument(argument.name).is_none() {
                return ctx.add_error(format!(
                    "Unknown argument \"{}\" on field \"{}\"",
                    argument.name, field.name
                ));
            }
        }
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    fn schema(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse_sdl(ctx, "type Query { pick(x: Int, y: Int): Int }").unwrap()
    }

    #[test]
    fn known_arguments() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ pick(x: 1, y: 2) }").unwrap();
        KnownArgumentNames::validate(&ctx, schema(&ctx), document).unwrap();
    }

    #[test]
    fn unknown_argument() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ pick(z: 3) }").unwrap();
        let error = KnownArgumentNames::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert_eq!(error.message(), "Unknown argument \"z\" on field \"pick\"");
    }
}
