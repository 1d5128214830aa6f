use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that a document uses all the fragments it defines at least once.
///
/// Runs when the document is left, after the operation and fragment subtrees have marked
/// every spread fragment on the context's used set.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragments-Must-Be-Used)
#[derive(Default)]
pub struct NoUnusedFragments;

impl<'a> ValidationRule<'a> for NoUnusedFragments {}

impl<'a> Visitor<'a, ValidationContext<'a>> for NoUnusedFragments {
    fn leave_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        document: &'a Document<'a>,
    ) -> VisitFlow {
        for definition in document.definitions.iter() {
            if let Some(fragment) = definition.fragment() {
                if !ctx.used_fragments.contains(fragment.name.name) {
                    return ctx.add_error(format!(
                        "Fragment \"{}\" was not used.",
                        fragment.name.name
                    ));
                }
            }
        }
        VisitFlow::Next
    }
}
