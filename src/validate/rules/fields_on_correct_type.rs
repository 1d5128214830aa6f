use super::super::context::TypeFrame;
use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that every selected field is defined on the type it's selected on.
///
/// By the time this rule runs, the context's type stack has gained a frame for the field:
/// an [`TypeFrame::Absent`] top frame means the field's name resolved to no definition on
/// the parent type. When the parent itself is unknown the rule abstains, since there is no
/// type to check against.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Field-Selections)
#[derive(Default)]
pub struct FieldsOnCorrectType;

impl<'a> ValidationRule<'a> for FieldsOnCorrectType {}

impl<'a> Visitor<'a, ValidationContext<'a>> for FieldsOnCorrectType {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        if let Some(TypeFrame::Absent) = ctx.current_frame() {
            if let Some(parent) = ctx.parent_type() {
                if parent.is_composite() {
                    return ctx.add_error(format!(
                        "Field \"{}\" does not exist on type \"{}\"",
                        field.name,
                        parent.name()
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

    fn schema(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse_sdl(
            ctx,
            "type Query { me: User } type User { name: String } union Thing = User",
        )
        .unwrap()
    }

    #[test]
    fn known_fields() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ me { name __typename } }").unwrap();
        FieldsOnCorrectType::validate(&ctx, schema(&ctx), document).unwrap();
    }

    #[test]
    fn unknown_field() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ me { nickname } }").unwrap();
        let error = FieldsOnCorrectType::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert_eq!(
            error.message(),
            "Field \"nickname\" does not exist on type \"User\""
        );
    }

    #[test]
    fn unknown_root_field() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ you }").unwrap();
        let error = FieldsOnCorrectType::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert_eq!(error.message(), "Field \"you\" does not exist on type \"Query\"");
    }

    #[test]
    fn unions_carry_no_fields() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(
            &ctx,
            "type Query { thing: Thing } type User { name: String } union Thing = User",
        )
        .unwrap();
        let document = Document::parse(&ctx, "{ thing { name } }").unwrap();
        FieldsOnCorrectType::validate(&ctx, schema, document).unwrap_err();
    }
}
