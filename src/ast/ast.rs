use bumpalo::Bump;
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};

/// A context for a GraphQL document which holds an arena allocator.
///
/// For the duration of parsing, validating, and traversing an AST it's performant and
/// convenient to allocate memory in one chunk for all of the AST's operations. This context
/// represents the lifetime of an AST and its derivatives: once a query has been checked the
/// entire allocation is dropped at once. It's hence inadvisable to reuse an AST Context
/// across multiple incoming GraphQL requests.
pub struct ASTContext {
    /// An arena allocator that holds the memory allocated for the AST Context's lifetime
    pub arena: Bump,
}

impl ASTContext {
    /// Create a new AST context with a preallocated arena.
    pub fn new() -> Self {
        ASTContext { arena: Bump::new() }
    }

    /// Put the value of `item` onto the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    ///
    /// This is useful when the original slice has an undefined lifetime.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }

    /// Puts a `String` onto the arena and returns a reference to it to tie the `String`'s
    /// lifetime to this AST context without reallocating or copying it.
    #[inline]
    pub fn alloc_string(&self, str: String) -> &str {
        self.arena.alloc(str)
    }
}

impl Default for ASTContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for AST nodes whose empty default must be allocated inside an arena.
pub trait DefaultIn<'a> {
    fn default_in(arena: &'a Bump) -> Self;
}

impl<'a, T> DefaultIn<'a> for T
where
    T: Default,
{
    fn default_in(_arena: &'a Bump) -> Self {
        Self::default()
    }
}

macro_rules! default_in {
    ($($for_type:ident => $field:ident),+ $(,)?) => {
        $(
            impl<'a> DefaultIn<'a> for $for_type<'a> {
                fn default_in(arena: &'a Bump) -> Self {
                    $for_type {
                        $field: bumpalo::collections::Vec::new_in(arena),
                    }
                }
            }
        )+
    };
}

default_in!(
    Arguments => children,
    Directives => children,
    VariableDefinitions => children,
    SelectionSet => selections,
);

/// AST Node of a boolean value
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Boolean-Value)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct BooleanValue {
    pub value: bool,
}

/// AST Node of a variable identifier value.
///
/// These are identifiers prefixed with a `$` sign, typically in variable definitions.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Variables)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Variable<'a> {
    pub name: &'a str,
}

/// AST Node of an enum value.
///
/// These are typically written in all caps and snake case, e.g. "`MOBILE_WEB`".
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Enum-Value)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct EnumValue<'a> {
    pub value: &'a str,
}

/// AST Node of an integer value.
///
/// Integers in GraphQL are limited to 32-bit signed, non-fractional values.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Int)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct IntValue<'a> {
    pub value: &'a str,
}

/// AST Node of a floating point value.
///
/// Floats in GraphQL are signed, double precision values as defined by
/// [IEEE 754](https://en.wikipedia.org/wiki/IEEE_754), limited to finite values.
/// [Reference](https://spec.graphql.org/October2021/#sec-Float)
#[derive(Debug, Clone, Copy)]
pub struct FloatValue<'a> {
    pub value: &'a str,
}

// Floats are compared by their source text. This keeps `PartialEq` on the value
// nodes total without comparing parsed IEEE 754 values.
impl<'a> PartialEq for FloatValue<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<'a> Eq for FloatValue<'a> {}

/// AST Node of a string value.
///
/// GraphQL has a number of escaped characters that are normalised away when parsing and
/// hence this `value` is expected to not contain escaped characters.
/// [Reference](https://spec.graphql.org/October2021/#sec-String)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct StringValue<'a> {
    pub value: &'a str,
}

/// AST Node of possible input values in GraphQL.
///
/// Fields and Directives accept input values as arguments.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Values)
#[derive(Debug, PartialEq, Clone)]
pub enum Value<'a> {
    Variable(Variable<'a>),
    String(StringValue<'a>),
    Float(FloatValue<'a>),
    Int(IntValue<'a>),
    Boolean(BooleanValue),
    Enum(EnumValue<'a>),
    List(ListValue<'a>),
    Object(ObjectValue<'a>),
    /// Representing JSON-like `null` values or the absence of a value
    Null,
}

/// AST Node for a List of values.
///
/// Lists in GraphQL are ordered sequences and serialize to JSON arrays. Its
/// contents may be any arbitrary value literal or variable.
/// [Reference](https://spec.graphql.org/October2021/#sec-List-Value)
#[derive(Debug, PartialEq, Clone)]
pub struct ListValue<'a> {
    pub children: bumpalo::collections::Vec<'a, Value<'a>>,
}

impl<'a> ListValue<'a> {
    /// Checks whether this List contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for a field of an Object value.
///
/// Objects in GraphQL are unordered lists of keyed input values and serialize to JSON
/// objects.
/// [Reference](https://spec.graphql.org/October2021/#ObjectField)
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectField<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// AST Node for an Object value, which is a list of Object fields.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Object-Values)
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectValue<'a> {
    pub children: bumpalo::collections::Vec<'a, ObjectField<'a>>,
}

impl<'a> ObjectValue<'a> {
    /// Checks whether this Object contains any fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for an Argument, which carries a name and a value.
///
/// Arguments in GraphQL are unordered lists of inputs to a field's or directive's arguments.
/// [Reference](https://spec.graphql.org/October2021/#Argument)
#[derive(Debug, PartialEq, Clone)]
pub struct Argument<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// AST Node for a list of Arguments, which are similar to parameterized inputs to a function.
///
/// [Reference](https://spec.graphql.org/October2021/#Arguments)
#[derive(Debug, PartialEq, Clone)]
pub struct Arguments<'a> {
    pub children: bumpalo::collections::Vec<'a, Argument<'a>>,
}

impl<'a> Arguments<'a> {
    /// Checks whether this list of Arguments contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns a `Map` keyed by all arguments' names mapped to their values.
    ///
    /// Argument order is not significant, so comparisons between argument lists go
    /// through this map.
    pub fn as_map(
        &'a self,
        arena: &'a Bump,
    ) -> HashMap<&'a str, &'a Value<'a>, DefaultHashBuilder, &'a Bump> {
        let mut map = HashMap::new_in(arena);
        for argument in self.children.iter() {
            map.insert(argument.name, &argument.value);
        }
        map
    }
}

/// AST Node for GraphQL Directives, which provide a way to describe alternate behavior.
///
/// Typical directives that occur in queries are for example `@skip` and `@include`.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Directives)
#[derive(Debug, PartialEq, Clone)]
pub struct Directive<'a> {
    pub name: &'a str,
    pub arguments: Arguments<'a>,
}

/// AST Node for lists of GraphQL Directives.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Directives)
#[derive(Debug, PartialEq, Clone)]
pub struct Directives<'a> {
    pub children: bumpalo::collections::Vec<'a, Directive<'a>>,
}

impl<'a> Directives<'a> {
    /// Checks whether this list of Directives contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for Selection Sets, which provide a way to select more information on a given
/// parent.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Selection-Sets)
#[derive(Debug, PartialEq, Clone)]
pub struct SelectionSet<'a> {
    pub selections: bumpalo::collections::Vec<'a, Selection<'a>>,
}

impl<'a> SelectionSet<'a> {
    /// Checks whether this Selection Set contains any selections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// AST Node for Fields, which can be likened to functions or properties on a parent object.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fields)
#[derive(Debug, PartialEq, Clone)]
pub struct Field<'a> {
    /// A Field's `alias`, which is used to request information under a different name than the
    /// Field's `name`.
    /// [Reference](https://spec.graphql.org/October2021/#sec-Field-Alias)
    pub alias: Option<&'a str>,
    /// A Field's `name`, which represents a resolver on a GraphQL schema's object type.
    pub name: &'a str,
    /// Arguments that are passed to a Field. When no Arguments are passed, this is an
    /// empty list.
    pub arguments: Arguments<'a>,
    /// Directives that are annotating this Field. When no Directives are present, this is
    /// an empty list.
    pub directives: Directives<'a>,
    /// A sub-Selection Set that is passed below this field to add selections to this
    /// field's returned GraphQL object type. When no selections are present, this is an
    /// empty list.
    pub selection_set: SelectionSet<'a>,
}

impl<'a> Field<'a> {
    /// Get the alias of the field, if present, otherwise get the name.
    ///
    /// This is the output key: the key under which the field's result appears in the
    /// response.
    #[inline]
    pub fn alias_or_name(&self) -> &'a str {
        self.alias.unwrap_or(self.name)
    }
}

/// AST Node for a Fragment Spread, which refers to a [`FragmentDefinition`] by name.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
pub struct FragmentSpread<'a> {
    /// A given name of the [FragmentDefinition] that must be spread in place of this
    /// Fragment Spread.
    pub name: NamedType<'a>,
    /// Directives that are annotating this Fragment Spread.
    pub directives: Directives<'a>,
}

/// AST Node for an inline Fragment with an additional [`SelectionSet`].
/// This may only be applied when the type condition matches or when no type condition is
/// present.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
pub struct InlineFragment<'a> {
    /// A given type condition's type name that must match before this fragment is applied.
    /// On inline fragments the type condition is optional.
    pub type_condition: Option<NamedType<'a>>,
    /// Directives that are annotating this Inline Fragment.
    pub directives: Directives<'a>,
    /// The Selection Set that is applied to the parent Selection Set when the type
    /// condition matches.
    pub selection_set: SelectionSet<'a>,
}

/// AST Node of a selection as contained inside a [`SelectionSet`].
///
/// Any given Selection Set may contain fields, fragment spreads, and inline fragments.
/// [Reference](https://spec.graphql.org/October2021/#Selection)
#[derive(Debug, PartialEq, Clone)]
pub enum Selection<'a> {
    Field(Field<'a>),
    FragmentSpread(FragmentSpread<'a>),
    InlineFragment(InlineFragment<'a>),
}

/// AST Node for a type name.
///
/// This AST uses this reference instead of a raw `&str` slice whenever the AST refers to a
/// concrete type, fragment name, or operation name.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct NamedType<'a> {
    pub name: &'a str,
}

/// AST Node for a type reference.
///
/// [`VariableDefinitions`] must describe their type when they're defined, including whether
/// they expect lists or non-null values, which is a recursive type definition.
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-References)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Type<'a> {
    /// A reference to a named input type, which is a leaf node of a [Type].
    NamedType(NamedType<'a>),
    /// A list node wrapper, indicating that a list of the contained type is expected.
    ListType(&'a Type<'a>),
    /// A non-null node wrapper, indicating that `null` may not take the place of the
    /// contained type.
    NonNullType(&'a Type<'a>),
}

/// AST Node for a variable definition.
///
/// A variable definition defines a [Variable] identifier that can be used in place of any
/// other non-static [Value] throughout the document.
///
/// [Reference](https://spec.graphql.org/October2021/#VariableDefinition)
#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinition<'a> {
    /// The variable's name, as in, its identifier, which is prefixed with a `$` sign in the
    /// document.
    pub variable: Variable<'a>,
    /// Annotation of the type of a given variable, which ultimately leads to a type
    /// reference of an input type, as defined on a GraphQL schema.
    pub of_type: Type<'a>,
    /// A default value that takes the variable's place when it isn't passed. When the
    /// definition doesn't contain any default value this property is set to `Value::Null`.
    pub default_value: Value<'a>,
    /// Directives that are annotating this Variable Definition.
    pub directives: Directives<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinitions<'a> {
    pub children: bumpalo::collections::Vec<'a, VariableDefinition<'a>>,
}

impl<'a> VariableDefinitions<'a> {
    /// Checks whether the list of Variable Definitions is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for a Fragment definition with an additional Selection Set.
///
/// This extends a Selection Set by being applied using a [`FragmentSpread`] selection when
/// its type condition matches.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
pub struct FragmentDefinition<'a> {
    /// A given name of the Fragment Definition that is used by [FragmentSpread] selections
    /// to refer to this definition.
    pub name: NamedType<'a>,
    /// A given type condition's type name that must match before this fragment is applied.
    pub type_condition: NamedType<'a>,
    /// Directives that are annotating this Fragment.
    pub directives: Directives<'a>,
    /// The Selection Set that is applied to the parent Selection Set when this Fragment is
    /// spread.
    pub selection_set: SelectionSet<'a>,
}

/// AST Node for a kind of operation, as referred to by an [`OperationDefinition`].
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

/// AST Node for an Operation Definition, which defines the entrypoint for GraphQL's
/// execution.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Clone)]
pub struct OperationDefinition<'a> {
    /// The kind of operation that this definition specifies
    pub operation: OperationKind,
    /// An optional name, as given to the operation definition. When a Document contains
    /// only a single operation it doesn't have to be named.
    pub name: Option<NamedType<'a>>,
    /// A list of variables that the operation defines and accepts during execution.
    pub variable_definitions: VariableDefinitions<'a>,
    /// Directives that are annotating this Operation Definition.
    pub directives: Directives<'a>,
    /// The Selection Set that is applied to the root type of the specified kind of
    /// operation during execution.
    pub selection_set: SelectionSet<'a>,
}

/// AST Root Node for a GraphQL query language document. This contains zero or more
/// definitions of fragments or operations.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Document)
#[derive(Debug, PartialEq, Clone)]
pub struct Document<'a> {
    pub definitions: bumpalo::collections::Vec<'a, Definition<'a>>,
}

impl<'a> Document<'a> {
    /// Checks whether this document contains any definitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns a `Map` keyed by all fragment names mapped to their fragment definitions.
    ///
    /// This is useful for resolving [`FragmentSpread`] nodes to their definitions while
    /// traversing the document. When two definitions share a name the later definition
    /// wins; the validator reports the duplicate separately.
    pub fn fragments(
        &'a self,
        arena: &'a Bump,
    ) -> HashMap<&'a str, &'a FragmentDefinition<'a>, DefaultHashBuilder, &'a Bump> {
        let mut map = HashMap::new_in(arena);
        for definition in self.definitions.iter() {
            if let Definition::Fragment(fragment) = definition {
                map.insert(fragment.name.name, fragment);
            }
        }
        map
    }
}

impl<'a> DefaultIn<'a> for Document<'a> {
    fn default_in(arena: &'a Bump) -> Self {
        Document {
            definitions: bumpalo::collections::Vec::new_in(arena),
        }
    }
}

/// AST Node for a Definition inside a query language document, which may either be an
/// Operation Definition or a Fragment Definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Document)
#[derive(Debug, PartialEq, Clone)]
pub enum Definition<'a> {
    Operation(OperationDefinition<'a>),
    Fragment(FragmentDefinition<'a>),
}

impl<'a> Definition<'a> {
    /// Helper method to return the [`OperationDefinition`] if the Definition is an
    /// `OperationDefinition`.
    #[inline]
    pub fn operation(&'a self) -> Option<&'a OperationDefinition<'a>> {
        match self {
            Definition::Operation(operation) => Some(operation),
            Definition::Fragment(_) => None,
        }
    }

    /// Helper method to return the [`FragmentDefinition`] if the Definition is a
    /// `FragmentDefinition`.
    #[inline]
    pub fn fragment(&'a self) -> Option<&'a FragmentDefinition<'a>> {
        match self {
            Definition::Fragment(fragment) => Some(fragment),
            Definition::Operation(_) => None,
        }
    }
}
