use bumpalo::Bump;
use hashbrown::{hash_map::DefaultHashBuilder, HashMap, HashSet};

use super::super::{ValidationContext, ValidationRule};
use crate::schema::{SchemaType, TypeRef};
use crate::{ast::*, visit::*};

/// Validates that fields sharing one output key could be merged into one response entry.
///
/// Every selection set is flattened into a map keyed by output key (the alias when given,
/// the field name otherwise), descending through inline fragments and fragment spreads
/// while carrying the type condition each of them applies. Two entries under the same key
/// conflict when their field names differ, when their resolved return types differ, or
/// when their argument lists differ in anything but order. Selections recorded on two
/// different object types are exempt: those can never be resolved for the same value.
///
/// A fragment that was already expanded during the scan of one selection set ends that
/// scan early, leaving later sibling selections unchecked. This mirrors the behavior of
/// the reference implementation this crate tracks.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Field-Selection-Merging)
#[derive(Default)]
pub struct OverlappingFields;

impl<'a> ValidationRule<'a> for OverlappingFields {}

struct SeenField<'a> {
    name: &'a str,
    parent: Option<SchemaType<'a>>,
    output_type: Option<&'a TypeRef<'a>>,
    arguments: &'a Arguments<'a>,
}

impl<'a> Visitor<'a, ValidationContext<'a>> for OverlappingFields {
    fn enter_selection_set(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        selection_set: &'a SelectionSet<'a>,
    ) -> VisitFlow {
        if selection_set.is_empty() {
            return VisitFlow::Next;
        }
        let parent = ctx.current_type();
        let mut fields = HashMap::new_in(ctx.arena);
        let mut seen_fragments = HashSet::new_in(ctx.arena);
        match collect(ctx, selection_set, parent, &mut fields, &mut seen_fragments) {
            Ok(()) => VisitFlow::Next,
            Err(message) => ctx.add_error(message),
        }
    }
}

fn collect<'a>(
    ctx: &ValidationContext<'a>,
    selection_set: &'a SelectionSet<'a>,
    parent: Option<SchemaType<'a>>,
    fields: &mut HashMap<&'a str, SeenField<'a>, DefaultHashBuilder, &'a Bump>,
    seen_fragments: &mut HashSet<&'a str, DefaultHashBuilder, &'a Bump>,
) -> Result<(), String> {
    for selection in selection_set.selections.iter() {
        match selection {
            Selection::Field(field) => {
                let schema_field = match parent {
                    Some(parent_type) => parent_type.field(field.name),
                    None => None,
                };
                let entry = SeenField {
                    name: field.name,
                    parent,
                    output_type: schema_field.map(|schema_field| schema_field.output_type),
                    arguments: &field.arguments,
                };
                match fields.get(field.alias_or_name()) {
                    Some(existing) => check_merge(ctx, existing, &entry)?,
                    None => {
                        fields.insert(field.alias_or_name(), entry);
                    }
                }
            }
            Selection::InlineFragment(inline_fragment) => {
                let inline_parent = match inline_fragment.type_condition {
                    Some(condition) => ctx.schema.get_type(condition.name),
                    None => parent,
                };
                collect(ctx, &inline_fragment.selection_set, inline_parent, fields, seen_fragments)?;
            }
            Selection::FragmentSpread(fragment_spread) => {
                if !seen_fragments.insert(fragment_spread.name.name) {
                    return Ok(());
                }
                if let Some(fragment) = ctx.fragments.get(fragment_spread.name.name) {
                    let fragment_parent = ctx.schema.get_type(fragment.type_condition.name);
                    collect(ctx, &fragment.selection_set, fragment_parent, fields, seen_fragments)?;
                }
            }
        }
    }
    Ok(())
}

fn check_merge<'a>(
    ctx: &ValidationContext<'a>,
    existing: &SeenField<'a>,
    incoming: &SeenField<'a>,
) -> Result<(), String> {
    let disjoint_objects = match (existing.parent, incoming.parent) {
        (Some(SchemaType::Object(left)), Some(SchemaType::Object(right))) => {
            left.name != right.name
        }
        _ => false,
    };
    if disjoint_objects {
        return Ok(());
    }
    if existing.name != incoming.name {
        return Err("Type name mismatch".into());
    }
    if let (Some(left), Some(right)) = (existing.output_type, incoming.output_type) {
        if left != right {
            return Err("Return type mismatch".into());
        }
    }
    if !arguments_equal(ctx, existing.arguments, incoming.arguments) {
        return Err("Argument mismatch".into());
    }
    Ok(())
}

fn arguments_equal<'a>(
    ctx: &ValidationContext<'a>,
    left: &'a Arguments<'a>,
    right: &'a Arguments<'a>,
) -> bool {
    if left.children.len() != right.children.len() {
        return false;
    }
    if left.children.is_empty() {
        return true;
    }
    let right_values = right.as_map(ctx.arena);
    left.children.iter().all(|argument| {
        right_values
            .get(argument.name)
            .map_or(false, |value| **value == argument.value)
    })
}
