use hashbrown::HashSet;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no fragments the document defines have duplicate names.
/// Note: Operations and Fragments are allowed to share names.
///
/// The document's definitions are scanned once on entry, before any definition subtree is
/// walked, so a duplicate fails validation ahead of any deeper rule.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragment-Name-Uniqueness)
#[derive(Default)]
pub struct UniqueFragmentNames;

impl<'a> ValidationRule<'a> for UniqueFragmentNames {}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueFragmentNames {
    fn enter_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        document: &'a Document<'a>,
    ) -> VisitFlow {
        let mut seen = HashSet::new_in(ctx.arena);
        for definition in document.definitions.iter() {
            if let Some(fragment) = definition.fragment() {
                if !seen.insert(fragment.name.name) {
                    return ctx.add_error(format!(
                        "All defined fragments must have unique names, but \"{}\" is defined more than once",
                        fragment.name.name
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
    fn unique_names() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(
            &ctx,
            "{ ...A ...B } fragment A on Query { hello } fragment B on Query { hello }",
        )
        .unwrap();
        UniqueFragmentNames::validate(&ctx, schema, document).unwrap();
    }

    #[test]
    fn duplicate_names() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(
            &ctx,
            "fragment A on Query { hello } fragment A on Query { hello }",
        )
        .unwrap();
        UniqueFragmentNames::validate(&ctx, schema, document).unwrap_err();
    }
}
