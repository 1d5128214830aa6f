use super::super::{ValidationContext, ValidationRule};
use crate::schema::SchemaType;
use crate::{ast::*, visit::*};

/// Validates that fields of a leaf type carry no subselections.
///
/// Scalars and enums are resolved to leaf values at execution, so there is nothing a
/// selection set below them could select.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Leaf-Field-Selections)
#[derive(Default)]
pub struct ScalarLeafs;

impl<'a> ValidationRule<'a> for ScalarLeafs {}

impl<'a> Visitor<'a, ValidationContext<'a>> for ScalarLeafs {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        if field.selection_set.is_empty() {
            return VisitFlow::Next;
        }
        match ctx.current_type() {
            Some(SchemaType::Scalar(_)) => {
                ctx.add_error("Scalar values cannot have subselections")
            }
            Some(SchemaType::Enum(_)) => ctx.add_error("Enum values cannot have subselections"),
            _ => VisitFlow::Next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    fn schema(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse_sdl(
            ctx,
            "type Query { id: ID me: User kind: Kind } type User { name: String } enum Kind { A B }",
        )
        .unwrap()
    }

    #[test]
    fn leaf_selections() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ id me { name } kind }").unwrap();
        ScalarLeafs::validate(&ctx, schema(&ctx), document).unwrap();
    }

    #[test]
    fn scalar_with_subselection() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ id { x } }").unwrap();
        let error = ScalarLeafs::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert_eq!(error.message(), "Scalar values cannot have subselections");
    }

    #[test]
    fn enum_with_subselection() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ kind { x } }").unwrap();
        let error = ScalarLeafs::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert_eq!(error.message(), "Enum values cannot have subselections");
    }
}
