use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that every non-null argument a field declares is supplied by the document.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Required-Arguments)
#[derive(Default)]
pub struct ProvidedRequiredArguments;

impl<'a> ValidationRule<'a> for ProvidedRequiredArguments {}

impl<'a> Visitor<'a, ValidationContext<'a>> for ProvidedRequiredArguments {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        let schema_field = match ctx.parent_field(field.name) {
            Some(schema_field) => schema_field,
            None => return VisitFlow::Next,
        };
        for (name, input_field) in schema_field.arguments.iter() {
            let supplied = field
                .arguments
                .children
                .iter()
                .any(|argument| argument.name == *name);
            if input_field.is_required() && !supplied {
                return ctx.add_error(format!(
                    "Required argument \"{}\" was not supplied.",
                    name
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
        Schema::parse_sdl(ctx, "type Query { pick(x: Int!, y: Int): Int }").unwrap()
    }

    #[test]
    fn required_argument_supplied() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ pick(x: 1) }").unwrap();
        ProvidedRequiredArguments::validate(&ctx, schema(&ctx), document).unwrap();
    }

    #[test]
    fn required_argument_missing() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ pick }").unwrap();
        let error =
            ProvidedRequiredArguments::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert_eq!(error.message(), "Required argument \"x\" was not supplied.");
    }

    #[test]
    fn optional_argument_missing() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ pick(x: 1) }").unwrap();
        ProvidedRequiredArguments::validate(&ctx, schema(&ctx), document).unwrap();
    }
}
