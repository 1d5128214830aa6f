use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::hash_map::DefaultHashBuilder;
use hashbrown::{HashMap, HashSet};

use crate::ast::{ASTContext, DefaultIn, OperationKind, Value};

/// Schema Definition
///
/// A schema is created from root types for each kind of operation and is then used against
/// AST documents for validation. In this crate the schema is never executable and serves
/// only for metadata and type information.
/// [Reference](https://spec.graphql.org/October2021/#sec-Schema)
#[derive(Debug, Clone)]
pub struct Schema<'a> {
    pub(crate) query_type: Option<&'a SchemaObject<'a>>,
    pub(crate) mutation_type: Option<&'a SchemaObject<'a>>,
    pub(crate) subscription_type: Option<&'a SchemaObject<'a>>,
    pub(crate) types: HashMap<&'a str, SchemaType<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) directives: HashMap<&'a str, &'a SchemaDirective<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> DefaultIn<'a> for Schema<'a> {
    fn default_in(arena: &'a Bump) -> Self {
        Schema {
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            types: HashMap::new_in(arena),
            directives: HashMap::new_in(arena),
        }
    }
}

impl<'a> Schema<'a> {
    /// Returns whether the schema is a default, empty schema
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.query_type.is_none()
            && self.mutation_type.is_none()
            && self.subscription_type.is_none()
    }

    /// Returns the root object type for query operations
    #[inline]
    pub fn query_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.query_type
    }

    /// Returns the root object type for mutation operations
    #[inline]
    pub fn mutation_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.mutation_type
    }

    /// Returns the root object type for subscription operations
    #[inline]
    pub fn subscription_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.subscription_type
    }

    /// Returns the appropriate root object type depending on the passed operation kind
    #[inline]
    pub fn get_root_type(&self, operation_kind: OperationKind) -> Option<&'a SchemaObject<'a>> {
        match operation_kind {
            OperationKind::Query => self.query_type,
            OperationKind::Mutation => self.mutation_type,
            OperationKind::Subscription => self.subscription_type,
        }
    }

    /// Retrieves a type by name from known schema types.
    #[inline]
    pub fn get_type(&self, name: &str) -> Option<SchemaType<'a>> {
        self.types.get(name).copied()
    }

    /// Retrieves a directive definition by name.
    #[inline]
    pub fn get_directive(&self, name: &str) -> Option<&'a SchemaDirective<'a>> {
        self.directives.get(name).copied()
    }

    /// Returns the names of the object types implementing a given interface, or `None`
    /// when no interface of that name exists.
    #[inline]
    pub fn get_implementors(&self, interface: &str) -> Option<&'a [&'a str]> {
        match self.get_type(interface) {
            Some(SchemaType::Interface(schema_interface)) => {
                Some(schema_interface.possible_types.as_slice())
            }
            _ => None,
        }
    }
}

/// An Object type definition.
///
/// Most types in GraphQL are objects and define a set of fields and the interfaces they
/// implement.
/// [Reference](https://spec.graphql.org/October2021/#sec-Objects)
#[derive(Debug, Clone)]
pub struct SchemaObject<'a> {
    pub name: &'a str,
    pub(crate) fields: HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) interfaces: Vec<'a, &'a str>,
}

impl<'a> SchemaObject<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaObject {
            name,
            fields: HashMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
        }
    }

    /// Add a new [SchemaField] to the object's fields
    pub fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>) {
        self.fields.insert(field.name, ctx.alloc(field));
    }

    /// Get a known field by name
    #[inline]
    pub fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.fields.get(name).copied()
    }

    /// Add an interface name to the list of implemented interfaces
    pub fn add_interface(&mut self, interface: &'a str) {
        self.interfaces.push(interface);
    }
}

/// An Interface type definition.
///
/// A field that returns an interface as its return type may return any object that
/// implements this interface.
/// [Reference](https://spec.graphql.org/October2021/#sec-Interfaces)
#[derive(Debug, Clone)]
pub struct SchemaInterface<'a> {
    pub name: &'a str,
    pub(crate) fields: HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) interfaces: Vec<'a, &'a str>,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaInterface<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaInterface {
            name,
            fields: HashMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
            possible_types: Vec::new_in(&ctx.arena),
        }
    }

    /// Add a new [SchemaField] to the interface's fields
    pub fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>) {
        self.fields.insert(field.name, ctx.alloc(field));
    }

    /// Get a known field by name
    #[inline]
    pub fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.fields.get(name).copied()
    }

    /// Add an interface name to the list of implemented interfaces
    pub fn add_interface(&mut self, interface: &'a str) {
        self.interfaces.push(interface);
    }

    /// Add an object type name to the list of implementing types
    pub fn add_possible_type(&mut self, object: &'a str) {
        self.possible_types.push(object);
    }
}

/// An object Field type definition.
///
/// A field is like a function that given its arguments as input values produces an output
/// value.
/// [Reference](https://spec.graphql.org/October2021/#FieldsDefinition)
#[derive(Debug, Clone)]
pub struct SchemaField<'a> {
    pub name: &'a str,
    pub arguments: HashMap<&'a str, SchemaInputField<'a>, DefaultHashBuilder, &'a Bump>,
    pub output_type: &'a TypeRef<'a>,
}

impl<'a> SchemaField<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str, output_type: &'a TypeRef<'a>) -> Self {
        SchemaField {
            name,
            arguments: HashMap::new_in(&ctx.arena),
            output_type,
        }
    }

    pub fn add_argument(&mut self, argument: SchemaInputField<'a>) {
        self.arguments.insert(argument.name, argument);
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.arguments.get(name)
    }
}

/// A Union type definition.
///
/// A union contains a list of possible object types that can be returned in its stead when
/// it's defined as an output type.
/// [Reference](https://spec.graphql.org/October2021/#sec-Unions)
#[derive(Debug, Clone)]
pub struct SchemaUnion<'a> {
    pub name: &'a str,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaUnion<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaUnion {
            name,
            possible_types: Vec::new_in(&ctx.arena),
        }
    }

    /// Add an object type name to the union's member types
    pub fn add_possible_type(&mut self, object: &'a str) {
        self.possible_types.push(object);
    }

    /// Checks whether a given object type name is a member of the union
    #[inline]
    pub fn is_possible_type(&self, name: &str) -> bool {
        self.possible_types.iter().any(|member| *member == name)
    }
}

/// A Scalar type definition.
///
/// Scalars represent primitive leaf values in GraphQL.
/// [Reference](https://spec.graphql.org/October2021/#sec-Scalars)
#[derive(Debug, Clone)]
pub struct SchemaScalar<'a> {
    pub name: &'a str,
}

impl<'a> SchemaScalar<'a> {
    #[inline]
    pub fn new(name: &'a str) -> Self {
        SchemaScalar { name }
    }

    /// Checks whether a value literal is accepted by this scalar.
    ///
    /// The built-in scalars accept the literal kinds that their serialized forms coerce
    /// from; custom scalars accept any constant literal since their parsing happens at
    /// execution time.
    /// [Reference](https://spec.graphql.org/October2021/#sec-Scalars.Input-Coercion)
    pub fn parse_literal(&self, value: &Value) -> bool {
        match self.name {
            "Int" => matches!(value, Value::Int(_)),
            "Float" => matches!(value, Value::Int(_) | Value::Float(_)),
            "String" => matches!(value, Value::String(_)),
            "Boolean" => matches!(value, Value::Boolean(_)),
            "ID" => matches!(value, Value::String(_) | Value::Int(_)),
            _ => !matches!(value, Value::Variable(_)),
        }
    }
}

/// An Enum type definition carrying the set of valid enum value names.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Enums)
#[derive(Debug, Clone)]
pub struct SchemaEnum<'a> {
    pub name: &'a str,
    pub values: HashSet<&'a str, DefaultHashBuilder, &'a Bump>,
}

impl<'a> SchemaEnum<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaEnum {
            name,
            values: HashSet::new_in(&ctx.arena),
        }
    }

    pub fn add_value(&mut self, value: &'a str) {
        self.values.insert(value);
    }
}

/// An Input Object type definition.
///
/// Inputs, such as arguments, may sometimes be nested and accept objects that must adhere
/// to the shape of an Input Object definition.
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Objects)
#[derive(Debug, Clone)]
pub struct SchemaInputObject<'a> {
    pub name: &'a str,
    pub fields: HashMap<&'a str, SchemaInputField<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> SchemaInputObject<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaInputObject {
            name,
            fields: HashMap::new_in(&ctx.arena),
        }
    }

    pub fn add_field(&mut self, field: SchemaInputField<'a>) {
        self.fields.insert(field.name, field);
    }

    #[inline]
    pub fn get_field(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.fields.get(name)
    }
}

/// An input field or argument definition carrying a name and an input type.
///
/// [Reference](https://spec.graphql.org/October2021/#InputValueDefinition)
#[derive(Debug, Clone, Copy)]
pub struct SchemaInputField<'a> {
    pub name: &'a str,
    pub input_type: &'a TypeRef<'a>,
}

impl<'a> SchemaInputField<'a> {
    #[inline]
    pub fn new(name: &'a str, input_type: &'a TypeRef<'a>) -> Self {
        SchemaInputField { name, input_type }
    }

    /// An argument is required when its type is non-null.
    #[inline]
    pub fn is_required(&self) -> bool {
        matches!(self.input_type, TypeRef::NonNullType(_))
    }
}

/// A Directive definition, as consulted when a document annotates nodes with directives.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-System.Directives)
#[derive(Debug, Clone)]
pub struct SchemaDirective<'a> {
    pub name: &'a str,
    pub arguments: HashMap<&'a str, SchemaInputField<'a>, DefaultHashBuilder, &'a Bump>,
    pub locations: Vec<'a, &'a str>,
}

impl<'a> SchemaDirective<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaDirective {
            name,
            arguments: HashMap::new_in(&ctx.arena),
            locations: Vec::new_in(&ctx.arena),
        }
    }

    pub fn add_argument(&mut self, argument: SchemaInputField<'a>) {
        self.arguments.insert(argument.name, argument);
    }

    pub fn add_location(&mut self, location: &'a str) {
        self.locations.push(location);
    }
}

/// A named type enum that represents all possible GraphQL definition types.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Types)
#[derive(Debug, Clone, Copy)]
pub enum SchemaType<'a> {
    InputObject(&'a SchemaInputObject<'a>),
    Object(&'a SchemaObject<'a>),
    Union(&'a SchemaUnion<'a>),
    Interface(&'a SchemaInterface<'a>),
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
}

impl<'a> SchemaType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            SchemaType::InputObject(x) => x.name,
            SchemaType::Object(x) => x.name,
            SchemaType::Union(x) => x.name,
            SchemaType::Interface(x) => x.name,
            SchemaType::Scalar(x) => x.name,
            SchemaType::Enum(x) => x.name,
        }
    }

    /// Helper method to return the [`SchemaObject`] if the type is an Object.
    pub fn object(&self) -> Option<&'a SchemaObject<'a>> {
        match self {
            SchemaType::Object(x) => Some(x),
            _ => None,
        }
    }

    /// Composite types are the types selection sets apply to: objects, interfaces, and
    /// unions.
    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            SchemaType::Object(_) | SchemaType::Interface(_) | SchemaType::Union(_)
        )
    }

    /// Get a field definition by name on an Object or Interface type.
    ///
    /// Unions carry no fields of their own, so field lookups on any other type return
    /// `None`.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        match self {
            SchemaType::Object(object) => object.get_field(name),
            SchemaType::Interface(interface) => interface.get_field(name),
            _ => None,
        }
    }
}

/// A reference to a named schema type, wrapped in any number of list and non-null
/// wrapper types.
///
/// References are by name and resolve lazily through [`Schema::get_type`], which keeps
/// mutually recursive type definitions free of reference cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeRef<'a> {
    Type(&'a str),
    ListType(&'a TypeRef<'a>),
    NonNullType(&'a TypeRef<'a>),
}

impl<'a> TypeRef<'a> {
    /// Returns the name of the referenced type with all wrappers unwrapped.
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            TypeRef::Type(name) => name,
            TypeRef::ListType(of_type) => of_type.name(),
            TypeRef::NonNullType(of_type) => of_type.name(),
        }
    }

    /// Resolves the named type contained within this reference's wrappers, or `None` when
    /// the schema doesn't define it.
    #[inline]
    pub fn of_type(&self, schema: &Schema<'a>) -> Option<SchemaType<'a>> {
        schema.get_type(self.name())
    }
}
