use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that all spread fragments are defined in the same document.
///
/// The context's fragment index is fully populated before any definition subtree is
/// entered, so an unknown spread target fails right at the spread.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragment-spread-target-defined)
#[derive(Default)]
pub struct KnownFragmentNames;

impl<'a> ValidationRule<'a> for KnownFragmentNames {}

impl<'a> Visitor<'a, ValidationContext<'a>> for KnownFragmentNames {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment_spread: &'a FragmentSpread<'a>,
    ) -> VisitFlow {
        if !ctx.fragments.contains_key(fragment_spread.name.name) {
            return ctx.add_error(format!(
                "Unknown fragment \"{}\"",
                fragment_spread.name.name
            ));
        }
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn known_spread() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(
            &ctx,
            "query { ...Root } fragment Root on Query { hello }",
        )
        .unwrap();
        KnownFragmentNames::validate(&ctx, schema, document).unwrap();
    }

    #[test]
    fn forward_reference() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(
            &ctx,
            "fragment A on Query { ...B } fragment B on Query { hello } query { ...A }",
        )
        .unwrap();
        KnownFragmentNames::validate(&ctx, schema, document).unwrap();
    }

    #[test]
    fn unknown_spread() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(&ctx, "query { ...Unknown }").unwrap();
        let error = KnownFragmentNames::validate(&ctx, schema, document).unwrap_err();
        assert_eq!(error.message(), "Unknown fragment \"Unknown\"");
    }
}
