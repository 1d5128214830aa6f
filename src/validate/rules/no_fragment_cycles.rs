use bumpalo::Bump;
use hashbrown::{hash_map::DefaultHashBuilder, HashSet};

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no fragment is spread within itself, directly or transitively, to avoid
/// looping during execution.
///
/// Each fragment definition's selection sets are scanned on entry, following every spread
/// exactly once through one shared seen-set. A fragment name that comes up a second time
/// during the scan fails validation; the message doesn't point at the specific cycle edge.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragment-spreads-must-not-form-cycles)
#[derive(Default)]
pub struct NoFragmentCycles;

impl<'a> ValidationRule<'a> for NoFragmentCycles {}

impl<'a> Visitor<'a, ValidationContext<'a>> for NoFragmentCycles {
    fn enter_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
    ) -> VisitFlow {
        let mut seen = HashSet::new_in(ctx.arena);
        seen.insert(fragment.name.name);
        if spreads_cycle(ctx, &fragment.selection_set, &mut seen) {
            return ctx.add_error("Cannot spread fragments within themselves");
        }
        VisitFlow::Next
    }
}

fn spreads_cycle<'a>(
    ctx: &ValidationContext<'a>,
    selection_set: &'a SelectionSet<'a>,
    seen: &mut HashSet<&'a str, DefaultHashBuilder, &'a Bump>,
) -> bool {
    for selection in selection_set.selections.iter() {
        match selection {
            Selection::Field(field) => {
                if spreads_cycle(ctx, &field.selection_set, seen) {
                    return true;
                }
            }
            Selection::InlineFragment(inline_fragment) => {
                if spreads_cycle(ctx, &inline_fragment.selection_set, seen) {
                    return true;
                }
            }
            Selection::FragmentSpread(fragment_spread) => {
                let name = fragment_spread.name.name;
                if !seen.insert(name) {
                    return true;
                }
                if let Some(fragment) = ctx.fragments.get(name) {
                    if spreads_cycle(ctx, &fragment.selection_set, seen) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn acyclic_spreads() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(
            &ctx,
            "fragment A on Query { ...B } fragment B on Query { hello }",
        )
        .unwrap();
        NoFragmentCycles::validate(&ctx, schema, document).unwrap();
    }

    #[test]
    fn direct_cycle() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(&ctx, "fragment A on Query { ...A }").unwrap();
        NoFragmentCycles::validate(&ctx, schema, document).unwrap_err();
    }

    #[test]
    fn transitive_cycle() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(
            &ctx,
            "fragment A on Query { ...B } fragment B on Query { ...C } fragment C on Query { ...A }",
        )
        .unwrap();
        NoFragmentCycles::validate(&ctx, schema, document).unwrap_err();
    }

    #[test]
    fn cycle_through_inline_fragment() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(&ctx, "type Query { hello: String }").unwrap();
        let document = Document::parse(
            &ctx,
            "fragment A on Query { ... on Query { ...A } }",
        )
        .unwrap();
        NoFragmentCycles::validate(&ctx, schema, document).unwrap_err();
    }
}
