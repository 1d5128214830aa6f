use hashbrown::HashSet;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no input object literal provides the same field twice, at any nesting
/// depth of an argument's value.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Object-Field-Uniqueness)
#[derive(Default)]
pub struct UniqueInputFieldNames;

impl<'a> ValidationRule<'a> for UniqueInputFieldNames {}

fn check_value<'a>(ctx: &mut ValidationContext<'a>, value: &'a Value<'a>) -> VisitFlow {
    match value {
        Value::List(list) => {
            for element in list.children.iter() {
                if check_value(ctx, element) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
            }
            VisitFlow::Next
        }
        Value::Object(object) => {
            let mut seen = HashSet::new_in(ctx.arena);
            for field in object.children.iter() {
                if !seen.insert(field.name) {
                    return ctx.add_error(format!(
                        "Input object field \"{}\" must only be provided once",
                        field.name
                    ));
                }
            }
            for field in object.children.iter() {
                if check_value(ctx, &field.value) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
            }
            VisitFlow::Next
        }
        _ => VisitFlow::Next,
    }
}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueInputFieldNames {
    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        argument: &'a Argument<'a>,
    ) -> VisitFlow {
        check_value(ctx, &argument.value)
    }
}
