//! Parsing of schema definition language (SDL) source text into a [Schema].
//!
//! The SDL parser shares the query language's lexer and parser context. Type references
//! are stored by name and resolve lazily, so definitions may refer to each other in any
//! order and no separate finalizer pass is needed; only interface implementors are linked
//! once all definitions are known.

use bumpalo::collections::Vec;
use hashbrown::HashMap;

use super::schema::*;
use crate::ast::lexer::Token;
use crate::ast::parser::private::ParseNode as _;
use crate::ast::parser::ParserContext;
use crate::ast::{ASTContext, DefaultIn, Value};
use crate::error::{get_location, print_span, Error, ErrorType, Result};

type SdlResult<T> = std::result::Result<T, String>;

const DEFAULT_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

enum TypeDef<'a> {
    Object(SchemaObject<'a>),
    Interface(SchemaInterface<'a>),
    Union(SchemaUnion<'a>),
    Scalar(SchemaScalar<'a>),
    Enum(SchemaEnum<'a>),
    InputObject(SchemaInputObject<'a>),
}

impl<'a> Schema<'a> {
    /// Parse schema definition language source text into a [Schema].
    ///
    /// Built-in scalars and the `@skip`, `@include`, and `@deprecated` directives are
    /// pre-registered unless the source text redefines them.
    pub fn parse_sdl<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Schema<'a>> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser = ParserContext::new(ctx, source);
        match parse_schema(ctx, &mut parser) {
            Ok(schema) => Ok(ctx.alloc(schema)),
            Err(message) => {
                let span = print_span(parser.source(), parser.span());
                let location = get_location(parser.source(), parser.span());
                Err(Error::new_with_context(
                    message,
                    Some(location),
                    span,
                    Some(ErrorType::Syntax),
                ))
            }
        }
    }
}

fn parse_schema<'a>(
    ctx: &'a ASTContext,
    p: &mut ParserContext<'a>,
) -> SdlResult<Schema<'a>> {
    let mut type_defs = HashMap::new_in(&ctx.arena);
    let mut directive_defs = Vec::new_in(&ctx.arena);
    let mut roots: [Option<&'a str>; 3] = [None, None, None];

    loop {
        match *p.peek() {
            Token::End => break,
            // Descriptions before definitions carry no meaning for validation
            Token::String(_) => {
                p.next();
            }
            Token::Name("schema") => parse_schema_roots(p, &mut roots)?,
            Token::Name("directive") => directive_defs.push(parse_directive_def(ctx, p)?),
            Token::Name("scalar") => {
                p.next();
                let name = expect_name(p)?;
                skip_directives(p)?;
                type_defs.insert(name, TypeDef::Scalar(SchemaScalar::new(name)));
            }
            Token::Name("type") => {
                let object = parse_object(ctx, p)?;
                type_defs.insert(object.name, TypeDef::Object(object));
            }
            Token::Name("interface") => {
                let interface = parse_interface(ctx, p)?;
                type_defs.insert(interface.name, TypeDef::Interface(interface));
            }
            Token::Name("union") => {
                let schema_union = parse_union(ctx, p)?;
                type_defs.insert(schema_union.name, TypeDef::Union(schema_union));
            }
            Token::Name("enum") => {
                let schema_enum = parse_enum(ctx, p)?;
                type_defs.insert(schema_enum.name, TypeDef::Enum(schema_enum));
            }
            Token::Name("input") => {
                let input_object = parse_input_object(ctx, p)?;
                type_defs.insert(input_object.name, TypeDef::InputObject(input_object));
            }
            token => return Err(format!("Expected a type system definition, got {:?}", token)),
        }
    }

    // Record each object type on the interfaces it declares. SDL requires objects to
    // declare transitively implemented interfaces, so direct links are complete.
    let mut links = Vec::new_in(&ctx.arena);
    for (name, type_def) in type_defs.iter() {
        if let TypeDef::Object(object) = type_def {
            for interface in object.interfaces.iter() {
                links.push((*interface, *name));
            }
        }
    }
    for (interface, object) in links {
        if let Some(TypeDef::Interface(schema_interface)) = type_defs.get_mut(interface) {
            schema_interface.add_possible_type(object);
        }
    }

    let mut schema = Schema::default_in(&ctx.arena);
    for scalar in DEFAULT_SCALARS {
        if !type_defs.contains_key(scalar) {
            schema
                .types
                .insert(scalar, SchemaType::Scalar(ctx.alloc(SchemaScalar::new(scalar))));
        }
    }
    for (name, type_def) in type_defs {
        let schema_type = match type_def {
            TypeDef::Object(object) => SchemaType::Object(ctx.alloc(object)),
            TypeDef::Interface(interface) => SchemaType::Interface(ctx.alloc(interface)),
            TypeDef::Union(schema_union) => SchemaType::Union(ctx.alloc(schema_union)),
            TypeDef::Scalar(scalar) => SchemaType::Scalar(ctx.alloc(scalar)),
            TypeDef::Enum(schema_enum) => SchemaType::Enum(ctx.alloc(schema_enum)),
            TypeDef::InputObject(input_object) => {
                SchemaType::InputObject(ctx.alloc(input_object))
            }
        };
        schema.types.insert(name, schema_type);
    }

    for directive in directive_defs {
        schema.directives.insert(directive.name, ctx.alloc(directive));
    }
    for directive in default_directives(ctx) {
        if !schema.directives.contains_key(directive.name) {
            schema.directives.insert(directive.name, ctx.alloc(directive));
        }
    }

    schema.query_type = root_object(&schema, roots[0], "Query")?;
    schema.mutation_type = root_object(&schema, roots[1], "Mutation")?;
    schema.subscription_type = root_object(&schema, roots[2], "Subscription")?;
    Ok(schema)
}

/// Resolves a root operation type: an explicitly declared root must exist as an object
/// type, while the default names are only picked up when present.
fn root_object<'a>(
    schema: &Schema<'a>,
    explicit: Option<&'a str>,
    default_name: &str,
) -> SdlResult<Option<&'a SchemaObject<'a>>> {
    match explicit {
        Some(name) => match schema.get_type(name) {
            Some(SchemaType::Object(object)) => Ok(Some(object)),
            _ => Err(format!("Unknown root object type \"{}\"", name)),
        },
        None => match schema.get_type(default_name) {
            Some(SchemaType::Object(object)) => Ok(Some(object)),
            _ => Ok(None),
        },
    }
}

fn default_directives(ctx: &ASTContext) -> [SchemaDirective<'_>; 3] {
    let if_type = ctx.alloc(TypeRef::NonNullType(ctx.alloc(TypeRef::Type("Boolean"))));
    let reason_type = ctx.alloc(TypeRef::Type("String"));

    let mut skip = SchemaDirective::new(ctx, "skip");
    skip.add_argument(SchemaInputField::new("if", if_type));
    let mut include = SchemaDirective::new(ctx, "include");
    include.add_argument(SchemaInputField::new("if", if_type));
    let mut deprecated = SchemaDirective::new(ctx, "deprecated");
    deprecated.add_argument(SchemaInputField::new("reason", reason_type));

    for directive in [&mut skip, &mut include] {
        directive.add_location("FIELD");
        directive.add_location("FRAGMENT_SPREAD");
        directive.add_location("INLINE_FRAGMENT");
    }
    deprecated.add_location("FIELD_DEFINITION");
    deprecated.add_location("ENUM_VALUE");

    [skip, include, deprecated]
}

fn parse_schema_roots<'a>(
    p: &mut ParserContext<'a>,
    roots: &mut [Option<&'a str>; 3],
) -> SdlResult<()> {
    p.next();
    skip_directives(p)?;
    expect(p, Token::BraceOpen)?;
    while *p.peek() != Token::BraceClose {
        let kind = expect_name(p)?;
        expect(p, Token::Colon)?;
        let target = expect_name(p)?;
        let slot = match kind {
            "query" => 0,
            "mutation" => 1,
            "subscription" => 2,
            _ => return Err(format!("Unknown root operation kind \"{}\"", kind)),
        };
        roots[slot] = Some(target);
    }
    p.next();
    Ok(())
}

fn parse_object<'a>(
    ctx: &'a ASTContext,
    p: &mut ParserContext<'a>,
) -> SdlResult<SchemaObject<'a>> {
    p.next();
    let name = expect_name(p)?;
    let mut object = SchemaObject::new(ctx, name);
    for interface in parse_implements(p)? {
        object.add_interface(interface);
    }
    skip_directives(p)?;
    if *p.peek() == Token::BraceOpen {
        p.next();
        while *p.peek() != Token::BraceClose {
            skip_description(p);
            let field = parse_field_def(ctx, p)?;
            object.add_field(ctx, field);
        }
        p.next();
    }
    Ok(object)
}

fn parse_interface<'a>(
    ctx: &'a ASTContext,
    p: &mut ParserContext<'a>,
) -> SdlResult<SchemaInterface<'a>> {
    p.next();
    let name = expect_name(p)?;
    let mut interface = SchemaInterface::new(ctx, name);
    for implemented in parse_implements(p)? {
        interface.add_interface(implemented);
    }
    skip_directives(p)?;
    if *p.peek() == Token::BraceOpen {
        p.next();
        while *p.peek() != Token::BraceClose {
            skip_description(p);
            let field = parse_field_def(ctx, p)?;
            interface.add_field(ctx, field);
        }
        p.next();
    }
    Ok(interface)
}

fn parse_union<'a>(
    ctx: &'a ASTContext,
    p: &mut ParserContext<'a>,
) -> SdlResult<SchemaUnion<'a>> {
    p.next();
    let name = expect_name(p)?;
    skip_directives(p)?;
    let mut schema_union = SchemaUnion::new(ctx, name);
    if *p.peek() == Token::Equal {
        p.next();
        if *p.peek() == Token::Pipe {
            p.next();
        }
        schema_union.add_possible_type(expect_name(p)?);
        while *p.peek() == Token::Pipe {
            p.next();
            schema_union.add_possible_type(expect_name(p)?);
        }
    }
    Ok(schema_union)
}

fn parse_enum<'a>(ctx: &'a ASTContext, p: &mut ParserContext<'a>) -> SdlResult<SchemaEnum<'a>> {
    p.next();
    let name = expect_name(p)?;
    skip_directives(p)?;
    let mut schema_enum = SchemaEnum::new(ctx, name);
    expect(p, Token::BraceOpen)?;
    while *p.peek() != Token::BraceClose {
        skip_description(p);
        let value = expect_name(p)?;
        skip_directives(p)?;
        schema_enum.add_value(value);
    }
    p.next();
    Ok(schema_enum)
}

fn parse_input_object<'a>(
    ctx: &'a ASTContext,
    p: &mut ParserContext<'a>,
) -> SdlResult<SchemaInputObject<'a>> {
    p.next();
    let name = expect_name(p)?;
    skip_directives(p)?;
    let mut input_object = SchemaInputObject::new(ctx, name);
    expect(p, Token::BraceOpen)?;
    while *p.peek() != Token::BraceClose {
        skip_description(p);
        input_object.add_field(parse_input_value_def(ctx, p)?);
    }
    p.next();
    Ok(input_object)
}

fn parse_directive_def<'a>(
    ctx: &'a ASTContext,
    p: &mut ParserContext<'a>,
) -> SdlResult<SchemaDirective<'a>> {
    p.next();
    let name = match p.next() {
        Token::DirectiveName(name) => name,
        token => return Err(format!("Expected a directive name, got {:?}", token)),
    };
    let mut directive = SchemaDirective::new(ctx, name);
    if *p.peek() == Token::ParenOpen {
        p.next();
        while *p.peek() != Token::ParenClose {
            skip_description(p);
            directive.add_argument(parse_input_value_def(ctx, p)?);
        }
        p.next();
    }
    if *p.peek() == Token::Name("repeatable") {
        p.next();
    }
    if p.next() != Token::Name("on") {
        return Err("Expected \"on\" and a list of directive locations".into());
    }
    if *p.peek() == Token::Pipe {
        p.next();
    }
    directive.add_location(expect_name(p)?);
    while *p.peek() == Token::Pipe {
        p.next();
        directive.add_location(expect_name(p)?);
    }
    Ok(directive)
}

fn parse_field_def<'a>(
    ctx: &'a ASTContext,
    p: &mut ParserContext<'a>,
) -> SdlResult<SchemaField<'a>> {
    let name = expect_name(p)?;
    let mut argument_defs = Vec::new_in(p.arena);
    if *p.peek() == Token::ParenOpen {
        p.next();
        while *p.peek() != Token::ParenClose {
            skip_description(p);
            argument_defs.push(parse_input_value_def(ctx, p)?);
        }
        p.next();
    }
    expect(p, Token::Colon)?;
    let output_type = parse_type_ref(ctx, p)?;
    skip_directives(p)?;
    let mut field = SchemaField::new(ctx, name, output_type);
    for argument in argument_defs {
        field.add_argument(argument);
    }
    Ok(field)
}

fn parse_input_value_def<'a>(
    ctx: &'a ASTContext,
    p: &mut ParserContext<'a>,
) -> SdlResult<SchemaInputField<'a>> {
    let name = expect_name(p)?;
    expect(p, Token::Colon)?;
    let input_type = parse_type_ref(ctx, p)?;
    if *p.peek() == Token::Equal {
        p.next();
        // Default values don't participate in validation and are parsed away
        Value::new_with_ctx(p).map_err(|kind| format!("Invalid {}", kind))?;
    }
    skip_directives(p)?;
    Ok(SchemaInputField::new(name, input_type))
}

fn parse_type_ref<'a>(
    ctx: &'a ASTContext,
    p: &mut ParserContext<'a>,
) -> SdlResult<&'a TypeRef<'a>> {
    let inner = match p.next() {
        Token::BracketOpen => {
            let of_type = parse_type_ref(ctx, p)?;
            if p.next() != Token::BracketClose {
                return Err("Expected a closing bracket on a list type".into());
            }
            TypeRef::ListType(of_type)
        }
        Token::Name(name) => TypeRef::Type(name),
        token => return Err(format!("Expected a type reference, got {:?}", token)),
    };
    if *p.peek() == Token::Exclam {
        p.next();
        Ok(ctx.alloc(TypeRef::NonNullType(ctx.alloc(inner))))
    } else {
        Ok(ctx.alloc(inner))
    }
}

fn parse_implements<'a>(p: &mut ParserContext<'a>) -> SdlResult<Vec<'a, &'a str>> {
    let mut interfaces = Vec::new_in(p.arena);
    if *p.peek() == Token::Name("implements") {
        p.next();
        if *p.peek() == Token::Ampersand {
            p.next();
        }
        interfaces.push(expect_name(p)?);
        while *p.peek() == Token::Ampersand {
            p.next();
            interfaces.push(expect_name(p)?);
        }
    }
    Ok(interfaces)
}

fn skip_directives(p: &mut ParserContext) -> SdlResult<()> {
    while let Token::DirectiveName(_) = *p.peek() {
        p.next();
        if *p.peek() == Token::ParenOpen {
            p.next();
            let mut depth = 1usize;
            while depth > 0 {
                match p.next() {
                    Token::ParenOpen => depth += 1,
                    Token::ParenClose => depth -= 1,
                    Token::End => return Err("Unterminated directive arguments".into()),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

fn skip_description(p: &mut ParserContext) {
    if let Token::String(_) = *p.peek() {
        p.next();
    }
}

fn expect_name<'a>(p: &mut ParserContext<'a>) -> SdlResult<&'a str> {
    match p.next() {
        Token::Name(name) => Ok(name),
        token => Err(format!("Expected a name, got {:?}", token)),
    }
}

fn expect<'a>(p: &mut ParserContext<'a>, token: Token<'a>) -> SdlResult<()> {
    let next = p.next();
    if next == token {
        Ok(())
    } else {
        Err(format!("Expected {:?}, got {:?}", token, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_a_full_schema() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(
            &ctx,
            indoc! {r#"
                "The root of all queries"
                type Query {
                  node(id: ID!): Node
                  pets(filter: PetFilter, limit: Int = 10): [Pet!]
                }

                interface Node {
                  id: ID!
                }

                type Dog implements Node {
                  id: ID!
                  name: String!
                  barkVolume: Int
                }

                type Cat implements Node {
                  id: ID!
                  name: String!
                  meowVolume: Int
                }

                union Pet = Dog | Cat

                enum PetKind {
                  DOG
                  CAT
                }

                input PetFilter {
                  kind: PetKind
                  name: String
                }

                directive @cached(ttl: Int!) on FIELD
            "#},
        )
        .unwrap();

        let query = schema.query_type().unwrap();
        assert_eq!(query.name, "Query");
        assert!(schema.mutation_type().is_none());

        let node_field = query.get_field("node").unwrap();
        assert_eq!(node_field.output_type.name(), "Node");
        assert!(node_field.get_argument("id").unwrap().is_required());

        let pets = query.get_field("pets").unwrap();
        assert!(!pets.get_argument("filter").unwrap().is_required());
        assert!(!pets.get_argument("limit").unwrap().is_required());

        let mut implementors: std::vec::Vec<&str> =
            schema.get_implementors("Node").unwrap().to_vec();
        implementors.sort_unstable();
        assert_eq!(implementors, vec!["Cat", "Dog"]);

        match schema.get_type("Pet") {
            Some(SchemaType::Union(pet)) => {
                assert!(pet.is_possible_type("Dog"));
                assert!(pet.is_possible_type("Cat"));
                assert!(!pet.is_possible_type("Query"));
            }
            _ => panic!("expected a union"),
        }

        match schema.get_type("PetKind") {
            Some(SchemaType::Enum(kind)) => {
                assert!(kind.values.contains("DOG"));
                assert!(!kind.values.contains("FISH"));
            }
            _ => panic!("expected an enum"),
        }

        assert!(schema.get_directive("cached").is_some());
        assert!(schema.get_directive("skip").is_some());
        assert!(schema.get_directive("include").is_some());
        assert!(schema.get_directive("missing").is_none());

        // Built-in scalars register themselves
        assert!(matches!(
            schema.get_type("Int"),
            Some(SchemaType::Scalar(_))
        ));
    }

    #[test]
    fn explicit_roots() {
        let ctx = ASTContext::new();
        let schema = Schema::parse_sdl(
            &ctx,
            indoc! {r#"
                schema { query: QueryRoot mutation: MutationRoot }
                type QueryRoot { ok: Boolean }
                type MutationRoot { store(value: String!): Boolean }
            "#},
        )
        .unwrap();
        assert_eq!(schema.query_type().unwrap().name, "QueryRoot");
        assert_eq!(schema.mutation_type().unwrap().name, "MutationRoot");

        let missing_root = Schema::parse_sdl(&ctx, "schema { query: Missing }");
        missing_root.unwrap_err();
    }

    #[test]
    fn rejects_unknown_definitions() {
        let ctx = ASTContext::new();
        Schema::parse_sdl(&ctx, "frobnicate Query { id: ID }").unwrap_err();
        Schema::parse_sdl(&ctx, "type Query { id ID }").unwrap_err();
    }
}
