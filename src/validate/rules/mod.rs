use super::context::ValidationContext;
use super::validate::ValidationRule;
use crate::ast::*;
use crate::visit::{VisitFlow, Visitor};

mod arguments_of_correct_type;
mod fields_on_correct_type;
mod fragments_on_composite_types;
mod known_argument_names;
mod known_directives;
mod known_fragment_names;
mod lone_anonymous_operation;
mod no_fragment_cycles;
mod no_unused_fragments;
mod overlapping_fields;
mod possible_fragment_spreads;
mod provided_required_arguments;
mod required_subselections;
mod scalar_leafs;
mod unique_argument_names;
mod unique_fragment_names;
mod unique_input_field_names;
mod unique_operation_names;
mod unique_variable_names;

pub use arguments_of_correct_type::*;
pub use fields_on_correct_type::*;
pub use fragments_on_composite_types::*;
pub use known_argument_names::*;
pub use known_directives::*;
pub use known_fragment_names::*;
pub use lone_anonymous_operation::*;
pub use no_fragment_cycles::*;
pub use no_unused_fragments::*;
pub use overlapping_fields::*;
pub use possible_fragment_spreads::*;
pub use provided_required_arguments::*;
pub use required_subselections::*;
pub use scalar_leafs::*;
pub use unique_argument_names::*;
pub use unique_fragment_names::*;
pub use unique_input_field_names::*;
pub use unique_operation_names::*;
pub use unique_variable_names::*;

/// Runs rule callbacks in their declared order and stops at the first one that doesn't
/// continue the traversal.
macro_rules! run {
    ($($hook:expr),+ $(,)?) => {{
        $(
            match $hook {
                VisitFlow::Next => {}
                flow => return flow,
            }
        )+
        VisitFlow::Next
    }};
}

/// All of this crate's validation rules combined into one `ValidationRule`, in the order
/// the validator runs them per node kind.
///
/// The rules this rule set is composed of are:
///
/// - [`UniqueFragmentNames`]: checks that no fragments share the same name
/// - [`UniqueOperationNames`]: checks that no operations share the same name
/// - [`LoneAnonymousOperation`]: validates that an anonymous operation is alone
/// - [`UniqueVariableNames`]: checks that no variables per operation share the same name
/// - [`UnambiguousSelections`](OverlappingFields): validates that overlapping fields can
///   be merged
/// - [`FieldsOnCorrectType`]: validates that all fields are defined on their parent type
/// - [`KnownArgumentNames`]: validates that all passed arguments are declared
/// - [`ScalarLeafs`]: validates that leaf-typed fields have no subselections
/// - [`RequiredSubselections`]: validates that composite-typed fields have subselections
/// - [`UniqueArgumentNames`]: checks for arguments to not contain duplicates
/// - [`ArgumentsOfCorrectType`]: validates argument literals against declared input types
/// - [`ProvidedRequiredArguments`]: validates that required arguments are supplied
/// - [`FragmentsOnCompositeTypes`]: validates fragment type conditions
/// - [`KnownFragmentNames`]: validates that all spread fragments are defined
/// - [`NoFragmentCycles`]: validates that no fragment is spread within itself
/// - [`PossibleFragmentSpreads`]: validates that fragment spreads can apply
/// - [`UniqueInputFieldNames`]: checks input object literals for duplicate fields
/// - [`KnownDirectives`]: validates that all used directives are defined
/// - [`NoUnusedFragments`]: validates that all defined fragments are spread at least once
#[derive(Default)]
pub struct DefaultRules {
    unique_fragment_names: UniqueFragmentNames,
    unique_operation_names: UniqueOperationNames,
    lone_anonymous_operation: LoneAnonymousOperation,
    unique_variable_names: UniqueVariableNames,
    overlapping_fields: OverlappingFields,
    fields_on_correct_type: FieldsOnCorrectType,
    known_argument_names: KnownArgumentNames,
    scalar_leafs: ScalarLeafs,
    required_subselections: RequiredSubselections,
    unique_argument_names: UniqueArgumentNames,
    arguments_of_correct_type: ArgumentsOfCorrectType,
    provided_required_arguments: ProvidedRequiredArguments,
    fragments_on_composite_types: FragmentsOnCompositeTypes,
    known_fragment_names: KnownFragmentNames,
    no_fragment_cycles: NoFragmentCycles,
    possible_fragment_spreads: PossibleFragmentSpreads,
    unique_input_field_names: UniqueInputFieldNames,
    known_directives: KnownDirectives,
    no_unused_fragments: NoUnusedFragments,
}

impl<'a> ValidationRule<'a> for DefaultRules {}

impl<'a> Visitor<'a, ValidationContext<'a>> for DefaultRules {
    fn enter_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        document: &'a Document<'a>,
    ) -> VisitFlow {
        run!(self.unique_fragment_names.enter_document(ctx, document))
    }

    fn leave_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        document: &'a Document<'a>,
    ) -> VisitFlow {
        run!(self.no_unused_fragments.leave_document(ctx, document))
    }

    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
    ) -> VisitFlow {
        run!(
            self.unique_operation_names.enter_operation(ctx, operation),
            self.lone_anonymous_operation.enter_operation(ctx, operation),
            self.known_directives.enter_operation(ctx, operation),
            self.unique_variable_names.enter_operation(ctx, operation),
        )
    }

    fn enter_selection_set(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        selection_set: &'a SelectionSet<'a>,
    ) -> VisitFlow {
        run!(self.overlapping_fields.enter_selection_set(ctx, selection_set))
    }

    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        run!(
            self.fields_on_correct_type.enter_field(ctx, field),
            self.known_argument_names.enter_field(ctx, field),
            self.scalar_leafs.enter_field(ctx, field),
            self.required_subselections.enter_field(ctx, field),
            self.unique_argument_names.enter_field(ctx, field),
            self.arguments_of_correct_type.enter_field(ctx, field),
            self.provided_required_arguments.enter_field(ctx, field),
            self.known_directives.enter_field(ctx, field),
        )
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        inline_fragment: &'a InlineFragment<'a>,
    ) -> VisitFlow {
        run!(
            self.fragments_on_composite_types
                .enter_inline_fragment(ctx, inline_fragment),
            self.possible_fragment_spreads
                .enter_inline_fragment(ctx, inline_fragment),
            self.known_directives.enter_inline_fragment(ctx, inline_fragment),
        )
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment_spread: &'a FragmentSpread<'a>,
    ) -> VisitFlow {
        run!(
            self.known_fragment_names
                .enter_fragment_spread(ctx, fragment_spread),
            self.possible_fragment_spreads
                .enter_fragment_spread(ctx, fragment_spread),
            self.known_directives.enter_fragment_spread(ctx, fragment_spread),
        )
    }

    fn enter_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
    ) -> VisitFlow {
        run!(
            self.fragments_on_composite_types.enter_fragment(ctx, fragment),
            self.no_fragment_cycles.enter_fragment(ctx, fragment),
            self.known_directives.enter_fragment(ctx, fragment),
        )
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        argument: &'a Argument<'a>,
    ) -> VisitFlow {
        run!(self.unique_input_field_names.enter_argument(ctx, argument))
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a Directive<'a>,
    ) -> VisitFlow {
        run!(self.unique_argument_names.enter_directive(ctx, directive))
    }
}
