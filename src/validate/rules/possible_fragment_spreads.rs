use bumpalo::collections::Vec;

use super::super::{ValidationContext, ValidationRule};
use crate::schema::SchemaType;
use crate::{ast::*, visit::*};

/// Validates that a fragment can possibly apply at the position it's spread.
///
/// A spread is possible when the set of object types assignable to the surrounding type
/// intersects the set assignable to the fragment's type condition: an object is assignable
/// to itself, an interface to its implementors, and a union to its members. When either
/// side cannot be resolved the rule abstains; other rules report the unknown name.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragment-spread-is-possible)
#[derive(Default)]
pub struct PossibleFragmentSpreads;

impl<'a> ValidationRule<'a> for PossibleFragmentSpreads {}

fn possible_types<'a>(
    ctx: &ValidationContext<'a>,
    of_type: SchemaType<'a>,
) -> Option<Vec<'a, &'a str>> {
    match of_type {
        SchemaType::Object(object) => {
            let mut possible = Vec::new_in(ctx.arena);
            possible.push(object.name);
            Some(possible)
        }
        SchemaType::Interface(interface) => ctx
            .schema
            .get_implementors(interface.name)
            .map(|names| Vec::from_iter_in(names.iter().copied(), ctx.arena)),
        SchemaType::Union(schema_union) => Some(Vec::from_iter_in(
            schema_union.possible_types.iter().copied(),
            ctx.arena,
        )),
        _ => None,
    }
}

fn check_spread<'a>(ctx: &mut ValidationContext<'a>) -> VisitFlow {
    let target = match ctx.current_type() {
        Some(of_type) => of_type,
        None => return VisitFlow::Next,
    };
    let parent = match ctx.parent_type() {
        Some(of_type) => of_type,
        None => return VisitFlow::Next,
    };
    let target_set = match possible_types(ctx, target) {
        Some(set) => set,
        None => return VisitFlow::Next,
    };
    let parent_set = match possible_types(ctx, parent) {
        Some(set) => set,
        None => return VisitFlow::Next,
    };
    if target_set.iter().any(|name| parent_set.contains(name)) {
        VisitFlow::Next
    } else {
        ctx.add_error("Fragment type condition is not possible for given type")
    }
}

impl<'a> Visitor<'a, ValidationContext<'a>> for PossibleFragmentSpreads {
    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _inline_fragment: &'a InlineFragment<'a>,
    ) -> VisitFlow {
        check_spread(ctx)
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _fragment_spread: &'a FragmentSpread<'a>,
    ) -> VisitFlow {
        check_spread(ctx)
    }
}
