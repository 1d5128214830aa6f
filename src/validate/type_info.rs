use super::context::{TypeFrame, ValidationContext};
use crate::ast::*;
use crate::schema::SchemaType;
use crate::visit::{VisitFlow, Visitor};

/// Maintains the [`ValidationContext`] while a document is walked.
///
/// `TypeInfo` is composed in front of every rule so that by the time a rule's `enter_`
/// callback runs, the context has been brought up to date for the node: fragment
/// definitions are indexed before any definition subtree is entered, fragment spreads mark
/// the fragment they use, and the type stack gains a frame for every operation, field,
/// fragment spread, inline fragment, and fragment definition. Frames are popped in the
/// matching `leave_` callbacks, so a completed traversal leaves the stack empty.
#[derive(Default)]
pub struct TypeInfo;

#[inline]
fn resolve<'a>(ctx: &ValidationContext<'a>, name: &str) -> TypeFrame<'a> {
    match ctx.schema.get_type(name) {
        Some(of_type) => TypeFrame::Resolved(of_type),
        None => TypeFrame::Absent,
    }
}

impl<'a> Visitor<'a, ValidationContext<'a>> for TypeInfo {
    fn enter_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        document: &'a Document<'a>,
    ) -> VisitFlow {
        ctx.fragments = document.fragments(ctx.arena);
        VisitFlow::Next
    }

    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
    ) -> VisitFlow {
        let frame = match ctx.schema.get_root_type(operation.operation) {
            Some(object) => TypeFrame::Resolved(SchemaType::Object(object)),
            None => TypeFrame::Absent,
        };
        ctx.push_frame(frame);
        VisitFlow::Next
    }

    fn leave_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _operation: &'a OperationDefinition<'a>,
    ) -> VisitFlow {
        ctx.pop_frame();
        VisitFlow::Next
    }

    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        let frame = match ctx.current_type() {
            // The type name meta field is selectable on any composite type
            Some(parent) if field.name == "__typename" && parent.is_composite() => {
                resolve(ctx, "String")
            }
            Some(parent) => match parent.field(field.name) {
                Some(schema_field) => match schema_field.output_type.of_type(ctx.schema) {
                    Some(of_type) => TypeFrame::Resolved(of_type),
                    None => TypeFrame::Absent,
                },
                None => TypeFrame::Absent,
            },
            None => TypeFrame::Absent,
        };
        ctx.push_frame(frame);
        VisitFlow::Next
    }

    fn leave_field(&mut self, ctx: &mut ValidationContext<'a>, _field: &'a Field<'a>) -> VisitFlow {
        ctx.pop_frame();
        VisitFlow::Next
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        inline_fragment: &'a InlineFragment<'a>,
    ) -> VisitFlow {
        let frame = match inline_fragment.type_condition {
            Some(condition) => resolve(ctx, condition.name),
            // Without a type condition the fragment applies to the surrounding type
            None => ctx.current_frame().unwrap_or(TypeFrame::Absent),
        };
        ctx.push_frame(frame);
        VisitFlow::Next
    }

    fn leave_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _inline_fragment: &'a InlineFragment<'a>,
    ) -> VisitFlow {
        ctx.pop_frame();
        VisitFlow::Next
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment_spread: &'a FragmentSpread<'a>,
    ) -> VisitFlow {
        ctx.used_fragments.insert(fragment_spread.name.name);
        let frame = match ctx.fragments.get(fragment_spread.name.name) {
            Some(fragment) => resolve(ctx, fragment.type_condition.name),
            None => TypeFrame::Absent,
        };
        ctx.push_frame(frame);
        VisitFlow::Next
    }

    fn leave_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _fragment_spread: &'a FragmentSpread<'a>,
    ) -> VisitFlow {
        ctx.pop_frame();
        VisitFlow::Next
    }

    fn enter_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
    ) -> VisitFlow {
        let frame = resolve(ctx, fragment.type_condition.name);
        ctx.push_frame(frame);
        VisitFlow::Next
    }

    fn leave_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _fragment: &'a FragmentDefinition<'a>,
    ) -> VisitFlow {
        ctx.pop_frame();
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ParseNode;
    use crate::schema::Schema;
    use crate::visit::VisitNode;

    #[test]
    fn stack_is_balanced() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(
            &ctx,
            "type Query { me: User } type User { name: String friends: [User] }",
        )
        .unwrap();
        let document = Document::parse(
            &ctx,
            "{ me { name friends { ...Names ... on User { name } } } } fragment Names on User { name }",
        )
        .unwrap();

        let mut validation = ValidationContext::new(&ctx, schema);
        document.visit(&mut validation, &mut TypeInfo);
        assert!(validation.type_stack.is_empty());
        assert!(validation.used_fragments.contains("Names"));
        assert!(validation.fragments.contains_key("Names"));
    }

    #[test]
    fn resolves_field_types() {
        struct AssertUser;
        impl<'a> Visitor<'a, ValidationContext<'a>> for AssertUser {
            fn enter_selection_set(
                &mut self,
                ctx: &mut ValidationContext<'a>,
                selection_set: &'a crate::ast::SelectionSet<'a>,
            ) -> VisitFlow {
                if !selection_set.is_empty() {
                    assert!(ctx.current_type().is_some());
                }
                VisitFlow::Next
            }
        }

        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(
            &ctx,
            "type Query { me: User } type User { name: String }",
        )
        .unwrap();
        let document = Document::parse(&ctx, "{ me { name __typename } }").unwrap();

        let mut validation = ValidationContext::new(&ctx, schema);
        let mut visitor = crate::visit::ComposedVisitor::new(TypeInfo, AssertUser);
        document.visit(&mut validation, &mut visitor);
        assert!(validation.type_stack.is_empty());
    }
}
