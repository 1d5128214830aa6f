//! # Error and Result for this crate
//!
//! All fallible operations of this crate report through one [Error] structure: syntax
//! errors while parsing documents or SDL, and validation errors while checking a document
//! against a schema.

use logos::Span;
use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// The error structure all of this crate's failures convert into.
///
/// Besides the message itself an error may carry a source [Location] and a context
/// string. Parse errors fill the context with an annotated snippet of the source text;
/// validation errors carry only a message, since the first failing rule aborts the walk
/// and there is no span to attach.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) location: Option<Location>,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

#[derive(PartialEq, Eq, Clone)]
pub enum ErrorType {
    Validation,
    Syntax,
}

impl ErrorType {
    fn prefix(&self) -> &'static str {
        match self {
            ErrorType::Validation => "Validation Error",
            ErrorType::Syntax => "Syntax Error",
        }
    }
}

impl Error {
    /// Create a new Error carrying only a message.
    pub fn new<S: Into<String>>(message: S, error_type: Option<ErrorType>) -> Self {
        Self {
            message: message.into(),
            location: None,
            context: None,
            error_type: error_type.unwrap_or(ErrorType::Validation),
        }
    }

    /// Create a new Error carrying a message, an optional source location, and a context
    /// string.
    pub fn new_with_context<S: Into<String>>(
        message: S,
        location: Option<Location>,
        context: S,
        error_type: Option<ErrorType>,
    ) -> Self {
        Self {
            message: message.into(),
            location,
            context: Some(context.into()),
            error_type: error_type.unwrap_or(ErrorType::Validation),
        }
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the location of the current error.
    pub fn location(&self) -> &Option<Location> {
        &self.location
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        match &self.context {
            Some(context) if include_ctx => {
                format!("{}: {}\n{}", self.error_type.prefix(), self.message, context)
            }
            _ => format!("{}: {}", self.error_type.prefix(), self.message),
        }
    }
}

/// A position in source text. Lines are one-based; columns count bytes from the start of
/// the line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

pub(crate) fn get_location(source: &str, span: Span) -> Location {
    let head = &source[..span.start];
    let line_start = head.rfind('\n').map_or(0, |newline| newline + 1);
    Location {
        line: head.matches('\n').count() + 1,
        column: span.start - line_start,
    }
}

/// Renders the source line a span points into, preceded by one line of context, with a
/// caret marker underneath the offending token. Spans reaching past the line end are
/// clipped; the marker is always at least one caret wide so that zero-width spans (such
/// as an unexpected end of input) stay visible.
pub(crate) fn print_span(source: &str, span: Span) -> String {
    let mut out = String::new();
    let mut line_offset = 0;
    let mut context_line: Option<(usize, &str)> = None;
    for (index, line) in source.lines().enumerate() {
        let line_end = line_offset + line.len();
        if span.start > line_end {
            context_line = Some((index + 1, line));
            line_offset = line_end + 1;
            continue;
        }

        let gutter = (index + 1).to_string().len() + 1;
        if let Some((context_number, context_text)) = context_line {
            out.push_str(&format!(
                "{:>width$} | {}\n",
                context_number,
                context_text,
                width = gutter
            ));
        }
        out.push_str(&format!("{:>width$} | {}\n", index + 1, line, width = gutter));

        let column = span.start - line_offset;
        let marker = span.end.min(line_end).saturating_sub(span.start).max(1);
        out.push_str(&" ".repeat(gutter));
        out.push_str(" | ");
        out.push_str(&" ".repeat(column));
        out.push_str(&"^".repeat(marker));
        break;
    }
    out
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self.print(true))
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_with_and_without_context() {
        let error = Error::new_with_context(
            "Unexpected token",
            None,
            "1 | {",
            Some(ErrorType::Syntax),
        );
        assert_eq!(error.print(false), "Syntax Error: Unexpected token");
        assert_eq!(error.print(true), "Syntax Error: Unexpected token\n1 | {");
        assert_eq!(
            Error::new("Unknown fragment", None).print(true),
            "Validation Error: Unknown fragment"
        );
    }

    #[test]
    fn locations() {
        let source = "query {\n  name\n}";
        assert_eq!(get_location(source, 0..5), Location { line: 1, column: 0 });
        assert_eq!(get_location(source, 10..14), Location { line: 2, column: 2 });
        assert_eq!(get_location(source, 15..16), Location { line: 3, column: 0 });
    }

    #[test]
    fn span_snippets() {
        let source = "query {\n  nam e\n}";
        assert_eq!(
            print_span(source, 10..13),
            " 1 | query {\n 2 |   nam e\n   |   ^^^"
        );
        // A zero-width span still renders one caret
        assert_eq!(print_span("{", 1..1), " 1 | {\n   |  ^");
    }
}
