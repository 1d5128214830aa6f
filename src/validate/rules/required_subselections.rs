use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that fields of a composite type carry a subselection.
///
/// Objects, interfaces, and unions cannot be resolved to a response value without the
/// document selecting fields on them.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Leaf-Field-Selections)
#[derive(Default)]
pub struct RequiredSubselections;

impl<'a> ValidationRule<'a> for RequiredSubselections {}

impl<'a> Visitor<'a, ValidationContext<'a>> for RequiredSubselections {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        if !field.selection_set.is_empty() {
            return VisitFlow::Next;
        }
        match ctx.current_type() {
            Some(of_type) if of_type.is_composite() => {
                ctx.add_error("Composite types must have subselections")
            }
            _ => VisitFlow::Next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    fn schema(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse_sdl(ctx, "type Query { me: User } type User { name: String }").unwrap()
    }

    #[test]
    fn composite_with_subselection() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ me { name } }").unwrap();
        RequiredSubselections::validate(&ctx, schema(&ctx), document).unwrap();
    }

    #[test]
    fn composite_without_subselection() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ me }").unwrap();
        let error = RequiredSubselections::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert_eq!(error.message(), "Composite types must have subselections");
    }
}
