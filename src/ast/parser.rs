use super::ast::*;
use super::ast_kind::ASTKind;
use super::lexer::{Extras, Token};
use crate::error::{get_location, print_span, Error, ErrorType, Result};
use bumpalo::collections::Vec;
use logos::{Lexer, Logos, Span};

pub(crate) type ParseResult<T> = std::result::Result<T, ASTKind>;

/// Parser state that's kept to track the current parser's progress: the arena, a one-token
/// lookahead, and the lexer. The query language parser and the SDL parser share this
/// context since they share one lexer.
pub(crate) struct ParserContext<'a> {
    pub(crate) arena: &'a bumpalo::Bump,
    peeked: Option<Token<'a>>,
    iter: Lexer<'a, Token<'a>>,
    in_var_def: bool,
}

impl<'a> ParserContext<'a> {
    /// Create a new Parser context for a given AST context and initialize it with an input
    /// source string to parse from.
    pub(crate) fn new(ctx: &'a ASTContext, source: &'a str) -> Self {
        let extras = Extras { arena: &ctx.arena };
        ParserContext {
            arena: &ctx.arena,
            peeked: None,
            iter: Token::lexer_with_extras(source, extras),
            in_var_def: false,
        }
    }

    #[inline]
    pub(crate) fn next(&mut self) -> Token<'a> {
        match self.peeked.take() {
            Some(token) => token,
            None => self.iter.next().unwrap_or(Token::End),
        }
    }

    #[inline]
    pub(crate) fn peek(&mut self) -> &Token<'a> {
        let iter = &mut self.iter;
        self.peeked
            .get_or_insert_with(|| iter.next().unwrap_or(Token::End))
    }

    #[inline]
    pub(crate) fn source(&self) -> &str {
        self.iter.source()
    }

    #[inline]
    pub(crate) fn span(&self) -> Span {
        self.iter.span()
    }
}

pub(crate) mod private {
    use super::{ParseResult, ParserContext};

    /// (Private) Trait for parsing AST Nodes from a Parser Context.
    /// The [`super::ParseNode`] trait implements the public `parse` method instead.
    pub trait ParseNode<'a>: Sized {
        fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self>;
    }
}

/// Trait for parsing AST Nodes from source texts using recursive descent and a lexer.
///
/// This trait is implemented by all AST Nodes and can hence be used to granularly parse
/// GraphQL language. However, mostly this will be used via `Document::parse`.
pub trait ParseNode<'a>: private::ParseNode<'a> {
    /// Parse an input source text into the implementor's AST Node structure and allocate
    /// the resulting AST into the current AST Context's arena.
    fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = ParserContext::new(ctx, source);
        match Self::new_with_ctx(&mut parser_ctx) {
            Ok(value) => Ok(ctx.alloc(value)),
            Err(error) => {
                let span = print_span(parser_ctx.source(), parser_ctx.span());
                let location = get_location(parser_ctx.source(), parser_ctx.span());
                let message = format!("Invalid {}", error);
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

impl<'a, T: private::ParseNode<'a>> ParseNode<'a> for T {}

impl<'a> private::ParseNode<'a> for Value<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Value<'a>> {
        let token = *ctx.peek();
        match token {
            Token::Name("null") => {
                ctx.next();
                Ok(Value::Null)
            }
            Token::Name("true") => {
                ctx.next();
                Ok(Value::Boolean(BooleanValue { value: true }))
            }
            Token::Name("false") => {
                ctx.next();
                Ok(Value::Boolean(BooleanValue { value: false }))
            }
            // Default values in variable definitions must be constant
            Token::VariableName(_) if ctx.in_var_def => Err(ASTKind::VariableDefinition),
            Token::VariableName(name) => {
                ctx.next();
                Ok(Value::Variable(Variable { name }))
            }
            Token::Name(value) => {
                ctx.next();
                Ok(Value::Enum(EnumValue { value }))
            }
            Token::Float(value) => {
                ctx.next();
                Ok(Value::Float(FloatValue { value }))
            }
            Token::Integer(value) => {
                ctx.next();
                Ok(Value::Int(IntValue { value }))
            }
            Token::String(value) => {
                ctx.next();
                Ok(Value::String(StringValue { value }))
            }
            Token::BracketOpen => {
                ctx.next();
                let mut children = Vec::new_in(ctx.arena);
                while *ctx.peek() != Token::BracketClose {
                    children.push(Value::new_with_ctx(ctx)?);
                }
                ctx.next();
                Ok(Value::List(ListValue { children }))
            }
            Token::BraceOpen => {
                ctx.next();
                let mut children = Vec::new_in(ctx.arena);
                while *ctx.peek() != Token::BraceClose {
                    let name = match ctx.next() {
                        Token::Name(name) => name,
                        _ => return Err(ASTKind::ObjectField),
                    };
                    if ctx.next() != Token::Colon {
                        return Err(ASTKind::ObjectField);
                    }
                    let value = Value::new_with_ctx(ctx)?;
                    children.push(ObjectField { name, value });
                }
                ctx.next();
                Ok(Value::Object(ObjectValue { children }))
            }
            _ => Err(ASTKind::Value),
        }
    }
}

impl<'a> private::ParseNode<'a> for Arguments<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Arguments<'a>> {
        let mut children = Vec::new_in(ctx.arena);
        if *ctx.peek() == Token::ParenOpen {
            ctx.next();
            while *ctx.peek() != Token::ParenClose {
                let name = match ctx.next() {
                    Token::Name(name) => name,
                    _ => return Err(ASTKind::Argument),
                };
                if ctx.next() != Token::Colon {
                    return Err(ASTKind::Argument);
                }
                let value = Value::new_with_ctx(ctx)?;
                children.push(Argument { name, value });
            }
            ctx.next();
        }
        Ok(Arguments { children })
    }
}

impl<'a> private::ParseNode<'a> for Directives<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Directives<'a>> {
        let mut children = Vec::new_in(ctx.arena);
        while let Token::DirectiveName(name) = *ctx.peek() {
            ctx.next();
            let arguments = Arguments::new_with_ctx(ctx)?;
            children.push(Directive { name, arguments });
        }
        Ok(Directives { children })
    }
}

impl<'a> private::ParseNode<'a> for NamedType<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<NamedType<'a>> {
        match ctx.next() {
            Token::Name(name) => Ok(NamedType { name }),
            _ => Err(ASTKind::NamedType),
        }
    }
}

impl<'a> private::ParseNode<'a> for Field<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Field<'a>> {
        let name_or_alias = match ctx.next() {
            Token::Name(name) => name,
            _ => return Err(ASTKind::Field),
        };
        let (alias, name) = if *ctx.peek() == Token::Colon {
            ctx.next();
            match ctx.next() {
                Token::Name(name) => (Some(name_or_alias), name),
                _ => return Err(ASTKind::Field),
            }
        } else {
            (None, name_or_alias)
        };

        let arguments = Arguments::new_with_ctx(ctx)?;
        let directives = Directives::new_with_ctx(ctx)?;
        let selection_set = SelectionSet::new_with_ctx(ctx)?;

        Ok(Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for FragmentSpread<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<FragmentSpread<'a>> {
        let name = match ctx.next() {
            Token::Name(name) if name != "on" => NamedType { name },
            _ => return Err(ASTKind::FragmentSpread),
        };
        let directives = Directives::new_with_ctx(ctx)?;
        Ok(FragmentSpread { name, directives })
    }
}

impl<'a> private::ParseNode<'a> for InlineFragment<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<InlineFragment<'a>> {
        let type_condition = if *ctx.peek() == Token::Name("on") {
            ctx.next();
            Some(NamedType::new_with_ctx(ctx)?)
        } else {
            None
        };
        let directives = Directives::new_with_ctx(ctx)?;
        if *ctx.peek() == Token::BraceOpen {
            let selection_set = SelectionSet::new_with_ctx(ctx)?;
            Ok(InlineFragment {
                type_condition,
                directives,
                selection_set,
            })
        } else {
            Err(ASTKind::InlineFragment)
        }
    }
}

impl<'a> private::ParseNode<'a> for Selection<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Selection<'a>> {
        match *ctx.peek() {
            Token::Name(_) => Field::new_with_ctx(ctx).map(Selection::Field),
            Token::Ellipsis => {
                ctx.next();
                match *ctx.peek() {
                    Token::Name("on") | Token::DirectiveName(_) | Token::BraceOpen => {
                        InlineFragment::new_with_ctx(ctx).map(Selection::InlineFragment)
                    }
                    Token::Name(_) => {
                        FragmentSpread::new_with_ctx(ctx).map(Selection::FragmentSpread)
                    }
                    _ => Err(ASTKind::Selection),
                }
            }
            _ => Err(ASTKind::Selection),
        }
    }
}

impl<'a> private::ParseNode<'a> for SelectionSet<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<SelectionSet<'a>> {
        let mut selections = Vec::new_in(ctx.arena);
        if *ctx.peek() == Token::BraceOpen {
            ctx.next();
            loop {
                selections.push(Selection::new_with_ctx(ctx)?);
                if *ctx.peek() == Token::BraceClose {
                    ctx.next();
                    break;
                }
            }
        }
        Ok(SelectionSet { selections })
    }
}

impl<'a> private::ParseNode<'a> for Type<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Type<'a>> {
        let of_type = match ctx.next() {
            Token::BracketOpen => {
                let inner = Type::new_with_ctx(ctx)?;
                if ctx.next() != Token::BracketClose {
                    return Err(ASTKind::ListType);
                }
                Type::ListType(ctx.arena.alloc(inner))
            }
            Token::Name(name) => Type::NamedType(NamedType { name }),
            _ => return Err(ASTKind::Type),
        };
        if *ctx.peek() == Token::Exclam {
            ctx.next();
            Ok(Type::NonNullType(ctx.arena.alloc(of_type)))
        } else {
            Ok(of_type)
        }
    }
}

impl<'a> private::ParseNode<'a> for VariableDefinitions<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<VariableDefinitions<'a>> {
        let mut children = Vec::new_in(ctx.arena);
        if *ctx.peek() == Token::ParenOpen {
            ctx.next();
            while *ctx.peek() != Token::ParenClose {
                let variable = match ctx.next() {
                    Token::VariableName(name) => Variable { name },
                    _ => return Err(ASTKind::VariableDefinition),
                };
                if ctx.next() != Token::Colon {
                    return Err(ASTKind::VariableDefinition);
                }
                let of_type = Type::new_with_ctx(ctx)?;
                let default_value = if *ctx.peek() == Token::Equal {
                    ctx.next();
                    ctx.in_var_def = true;
                    let value = Value::new_with_ctx(ctx)?;
                    ctx.in_var_def = false;
                    value
                } else {
                    Value::Null
                };
                let directives = Directives::new_with_ctx(ctx)?;
                children.push(VariableDefinition {
                    variable,
                    of_type,
                    default_value,
                    directives,
                });
            }
            ctx.next();
        }
        Ok(VariableDefinitions { children })
    }
}

impl<'a> private::ParseNode<'a> for FragmentDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<FragmentDefinition<'a>> {
        if ctx.next() != Token::Name("fragment") {
            return Err(ASTKind::FragmentDefinition);
        }
        let name = NamedType::new_with_ctx(ctx)?;
        if ctx.next() != Token::Name("on") {
            return Err(ASTKind::FragmentDefinition);
        }
        let type_condition = NamedType::new_with_ctx(ctx)?;
        let directives = Directives::new_with_ctx(ctx)?;
        if *ctx.peek() != Token::BraceOpen {
            return Err(ASTKind::FragmentDefinition);
        }
        let selection_set = SelectionSet::new_with_ctx(ctx)?;
        Ok(FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for OperationDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<OperationDefinition<'a>> {
        let operation = match *ctx.peek() {
            Token::BraceOpen => {
                let selection_set = SelectionSet::new_with_ctx(ctx)?;
                return Ok(OperationDefinition {
                    operation: OperationKind::Query,
                    name: None,
                    variable_definitions: VariableDefinitions::default_in(ctx.arena),
                    directives: Directives::default_in(ctx.arena),
                    selection_set,
                });
            }
            Token::Name("query") => OperationKind::Query,
            Token::Name("mutation") => OperationKind::Mutation,
            Token::Name("subscription") => OperationKind::Subscription,
            _ => return Err(ASTKind::OperationDefinition),
        };
        ctx.next();
        let name = if let Token::Name(_) = ctx.peek() {
            NamedType::new_with_ctx(ctx).ok()
        } else {
            None
        };
        let variable_definitions = VariableDefinitions::new_with_ctx(ctx)?;
        let directives = Directives::new_with_ctx(ctx)?;
        if *ctx.peek() != Token::BraceOpen {
            return Err(ASTKind::OperationDefinition);
        }
        let selection_set = SelectionSet::new_with_ctx(ctx)?;
        Ok(OperationDefinition {
            operation,
            name,
            variable_definitions,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for Document<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Document<'a>> {
        let mut definitions = Vec::new_in(ctx.arena);
        loop {
            let definition = match *ctx.peek() {
                Token::BraceOpen | Token::Name("query" | "mutation" | "subscription") => {
                    OperationDefinition::new_with_ctx(ctx).map(Definition::Operation)
                }
                Token::Name("fragment") => {
                    FragmentDefinition::new_with_ctx(ctx).map(Definition::Fragment)
                }
                Token::End => break,
                _ => Err(ASTKind::Document),
            }?;
            definitions.push(definition);
        }
        Ok(Document { definitions })
    }
}

#[cfg(test)]
mod tests {
    use super::{super::ast::*, ParseNode};
    use crate::error::Location;

    fn assert_parse<'a, T: 'a>(ctx: &'a ASTContext, source: &'a str, expected: T)
    where
        T: ParseNode<'a> + std::fmt::Debug + PartialEq,
    {
        assert_eq!(*T::parse(ctx, source).unwrap(), expected);
    }

    #[test]
    fn error_location() {
        let ctx = ASTContext::new();
        let result = Document::parse(&ctx, "query { document { $ }}");
        assert_eq!(
            result.err().unwrap().location,
            Some(Location {
                column: 19,
                line: 1
            })
        );
    }

    #[test]
    fn named_type() {
        let ctx = ASTContext::new();
        assert_parse(&ctx, "TypeName", NamedType { name: "TypeName" });
    }

    #[test]
    fn values() {
        let ctx = ASTContext::new();
        assert_parse(&ctx, "null", Value::Null);
        assert_parse(&ctx, "true", Value::Boolean(BooleanValue { value: true }));
        assert_parse(&ctx, "123", Value::Int(IntValue { value: "123" }));
        assert_parse(&ctx, "1.5", Value::Float(FloatValue { value: "1.5" }));
        assert_parse(&ctx, "RED", Value::Enum(EnumValue { value: "RED" }));
        assert_parse(
            &ctx,
            "\"hi\"",
            Value::String(StringValue { value: "hi" }),
        );
        assert_parse(&ctx, "$var", Value::Variable(Variable { name: "var" }));
    }

    #[test]
    fn nested_values() {
        let ctx = ASTContext::new();
        let value = Value::parse(&ctx, "[1, { a: \"b\", c: [true] }]").unwrap();
        match value {
            Value::List(list) => {
                assert_eq!(list.children.len(), 2);
                assert!(matches!(list.children[1], Value::Object(_)));
            }
            _ => panic!("expected a list"),
        }
    }

    #[test]
    fn fields_and_aliases() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ id renamed: name node(id: 4) { id } }").unwrap();
        let operation = document.definitions[0].operation().unwrap();
        let selections = &operation.selection_set.selections;
        assert_eq!(selections.len(), 3);
        match &selections[1] {
            Selection::Field(field) => {
                assert_eq!(field.alias, Some("renamed"));
                assert_eq!(field.name, "name");
                assert_eq!(field.alias_or_name(), "renamed");
            }
            _ => panic!("expected a field"),
        }
    }

    #[test]
    fn fragments() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            "query A { ...Frag ... on Node { id } } fragment Frag on Node { id }",
        )
        .unwrap();
        assert_eq!(document.definitions.len(), 2);
        let fragment = document.definitions[1].fragment().unwrap();
        assert_eq!(fragment.name.name, "Frag");
        assert_eq!(fragment.type_condition.name, "Node");
    }

    #[test]
    fn operations() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            "mutation M($input: [InputObj!]! = []) @onOp { store(input: $input) }",
        )
        .unwrap();
        let operation = document.definitions[0].operation().unwrap();
        assert_eq!(operation.operation, OperationKind::Mutation);
        assert_eq!(operation.name, Some(NamedType { name: "M" }));
        assert_eq!(operation.variable_definitions.children.len(), 1);
        assert_eq!(operation.directives.children.len(), 1);
    }

    #[test]
    fn invalid_documents() {
        let ctx = ASTContext::new();
        Document::parse(&ctx, "query {").unwrap_err();
        Document::parse(&ctx, "{}").unwrap_err();
        Document::parse(&ctx, "fragment F { id }").unwrap_err();
        Document::parse(&ctx, "query ($v: Int = $other) { id }").unwrap_err();
    }

    #[test]
    fn empty_document() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "").unwrap();
        assert!(document.is_empty());
    }
}
