use logos::{internal::LexerInternal, Lexer, Logos};

#[derive(Clone)]
pub(crate) struct Extras<'a> {
    pub(crate) arena: &'a bumpalo::Bump,
}

/// Tokens of the GraphQL language.
///
/// One token type serves both the query language and the schema definition language; the
/// parsers simply never ask for tokens outside their grammar. Ignored tokens (whitespace,
/// commas, comments) are skipped by the lexer.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(extras = Extras<'s>)]
pub(crate) enum Token<'a> {
    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token("=")]
    Equal,

    #[token("!")]
    Exclam,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[token("...")]
    Ellipsis,

    #[regex(r"\$[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    VariableName(&'a str),

    #[regex(r"@[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    DirectiveName(&'a str),

    #[regex(r"[_a-zA-Z][_0-9a-zA-Z]*", |lex| lex.slice())]
    Name(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)[.][0-9]+([eE][+-]?[0-9]+)?")]
    #[regex("-?([1-9][0-9]*|0)[eE][+-]?[0-9]+")]
    Float(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)")]
    Integer(&'a str),

    #[regex(r#"""?"?"#, parse_string)]
    String(&'a str),

    #[error]
    #[regex(r"([ ,\t\n\r\f\u{FEFF}]+|#[^\n\r]*)+", logos::skip)]
    Error,

    /// Token indicates the end of the input
    End,
}

#[derive(Logos, Debug, PartialEq)]
pub(crate) enum StringPart {
    #[regex(r#"[^\n\r\\"]+"#)]
    Text,

    #[regex(r"\\u[0-9a-fA-F][0-9a-fA-F][0-9a-fA-F][0-9a-fA-F]")]
    EscapedCodepoint,

    #[regex(r#"\\["\\/bfnrt]"#)]
    Escaped,

    #[token("\"")]
    EndString,

    #[error]
    Error,
}

#[derive(Logos, Debug, PartialEq)]
pub(crate) enum BlockPart {
    #[regex(r#"[^"\\]+"#)]
    Text,

    #[regex(r#""+"#)]
    Quotes,

    #[regex(r#"\\""""#)]
    EscapedEndBlock,

    #[regex(r"\\")]
    Backslash,

    #[token(r#"""""#)]
    EndBlock,

    #[error]
    Error,
}

fn lex_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let remainder = lex.remainder();
    let mut sublex = StringPart::lexer(remainder);
    // Stays unset until the first escape sequence; a body without escapes is handed out
    // as a slice of the source instead of an arena copy
    let mut unescaped: Option<String> = None;
    loop {
        let part = sublex.next()?;
        let span = sublex.span();
        match part {
            StringPart::Error => return None,
            StringPart::Text => {
                if let Some(buffer) = unescaped.as_mut() {
                    buffer.push_str(sublex.slice());
                }
            }
            StringPart::Escaped => {
                let buffer =
                    unescaped.get_or_insert_with(|| remainder[..span.start].to_string());
                buffer.push(match sublex.slice().as_bytes()[1] {
                    b'b' => 8 as char,
                    b'f' => 12 as char,
                    b'n' => '\n',
                    b'r' => '\r',
                    b't' => '\t',
                    escaped => escaped as char,
                });
            }
            StringPart::EscapedCodepoint => {
                use lexical_core::*;
                const FORMAT: u128 = NumberFormatBuilder::hexadecimal();
                const OPTIONS: ParseIntegerOptions = ParseIntegerOptions::new();
                let codepoint: u32 =
                    parse_with_options::<u32, FORMAT>(sublex.slice()[2..].as_bytes(), &OPTIONS)
                        .ok()?;
                let buffer =
                    unescaped.get_or_insert_with(|| remainder[..span.start].to_string());
                buffer.push(std::char::from_u32(codepoint)?);
            }
            StringPart::EndString => {
                lex.bump_unchecked(span.end);
                return Some(match unescaped {
                    Some(buffer) => lex.extras.arena.alloc_str(&buffer),
                    None => &remainder[..span.end - 1],
                });
            }
        }
    }
}

fn lex_block_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let mut raw = String::new();
    let mut sublex = BlockPart::lexer(lex.remainder());
    while let Some(part) = sublex.next() {
        match part {
            BlockPart::Error => break,
            BlockPart::Text | BlockPart::Quotes => raw.push_str(sublex.slice()),
            BlockPart::EscapedEndBlock => raw.push_str("\"\"\""),
            BlockPart::Backslash => raw.push('\\'),
            BlockPart::EndBlock => {
                lex.bump_unchecked(sublex.span().end);
                return Some(lex.extras.arena.alloc_str(&block_string_value(&raw)));
            }
        }
    }
    None
}

/// Strips the common indentation and surrounding blank lines off a raw block string.
///
/// [Reference](https://spec.graphql.org/October2021/#BlockStringValue())
fn block_string_value(raw: &str) -> String {
    let mut common_indent = usize::MAX;
    for line in raw.lines().skip(1) {
        let trimmed = line.trim_start();
        if !trimmed.is_empty() {
            common_indent = common_indent.min(line.len() - trimmed.len());
        }
    }

    let mut lines: Vec<&str> = raw
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 || common_indent == usize::MAX || line.len() <= common_indent {
                line
            } else {
                &line[common_indent..]
            }
        })
        .collect();

    while lines.first().map_or(false, |line| line.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().map_or(false, |line| line.trim().is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn parse_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    match lex.slice() {
        r#""""# => Some(""),
        r#"""""# => lex_block_string(lex),
        _ => lex_string(lex),
    }
}

#[cfg(test)]
mod tests {
    use super::{Extras, Token};
    use bumpalo::Bump;
    use logos::Logos;

    #[test]
    fn empty() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("", Extras { arena: &arena });
        assert_eq!(lex.next(), None);
        let mut lex = Token::lexer_with_extras(",,   # comment\n", Extras { arena: &arena });
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn punctuators() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("[]{}()=:!&|...", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::BracketOpen));
        assert_eq!(lex.next(), Some(Token::BracketClose));
        assert_eq!(lex.next(), Some(Token::BraceOpen));
        assert_eq!(lex.next(), Some(Token::BraceClose));
        assert_eq!(lex.next(), Some(Token::ParenOpen));
        assert_eq!(lex.next(), Some(Token::ParenClose));
        assert_eq!(lex.next(), Some(Token::Equal));
        assert_eq!(lex.next(), Some(Token::Colon));
        assert_eq!(lex.next(), Some(Token::Exclam));
        assert_eq!(lex.next(), Some(Token::Ampersand));
        assert_eq!(lex.next(), Some(Token::Pipe));
        assert_eq!(lex.next(), Some(Token::Ellipsis));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn names_and_references() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("on $var @skip Name", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Name("on")));
        assert_eq!(lex.next(), Some(Token::VariableName("var")));
        assert_eq!(lex.next(), Some(Token::DirectiveName("skip")));
        assert_eq!(lex.next(), Some(Token::Name("Name")));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn numbers() {
        let arena = Bump::new();
        let mut lex =
            Token::lexer_with_extras("0 -1 123 1.0 -10.5 1e2 1.1e-3", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Integer("0")));
        assert_eq!(lex.next(), Some(Token::Integer("-1")));
        assert_eq!(lex.next(), Some(Token::Integer("123")));
        assert_eq!(lex.next(), Some(Token::Float("1.0")));
        assert_eq!(lex.next(), Some(Token::Float("-10.5")));
        assert_eq!(lex.next(), Some(Token::Float("1e2")));
        assert_eq!(lex.next(), Some(Token::Float("1.1e-3")));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn strings() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("\"hello world\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("hello world")));
        let mut lex = Token::lexer_with_extras("\"\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("")));
        let mut lex =
            Token::lexer_with_extras("\"esc \\\" \\n \\u0041\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("esc \" \n A")));
        let mut lex =
            Token::lexer_with_extras("\"\"\"block\n  text\"\"\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("block\ntext")));
    }

    #[test]
    fn bad_strings() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("\"\n\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
    }
}
