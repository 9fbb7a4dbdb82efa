//! # Error and Result for this crate
//!
//! This crate defines a common [Error] structure that's returned when a schema document can't
//! be loaded. Linting itself never fails; its outcome is a list of
//! [`Finding`s](crate::lint::Finding) instead.

use logos::Span;
use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// This crate's error structure which internal errors are converted into.
///
/// The error is split into a general message and a context string. For parsing, the context
/// string is populated with a snippet of the source text around the offending token.
///
/// The Error implements both the [`fmt::Display`] and [`fmt::Debug`] traits. It also implements
/// [`error::Error`] so that it can be used with existing patterns for error handling.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) location: Option<Location>,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    /// The source text isn't valid SDL.
    Syntax,
    /// The source text parsed, but describes an inconsistent schema, e.g. an unknown type.
    Schema,
}

impl Error {
    /// Create a new Error with only a main message from an input string.
    pub fn new<S: Into<String>>(message: S, error_type: Option<ErrorType>) -> Self {
        Self {
            message: message.into(),
            location: None,
            context: None,
            error_type: error_type.unwrap_or(ErrorType::Schema),
        }
    }

    /// Create a new Error with a main message and a context string from two input strings.
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
            error_type: error_type.unwrap_or(ErrorType::Schema),
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

    /// Returns the kind of the current error.
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let formatted = match self.error_type {
            ErrorType::Schema => format!("Schema Error: {}", self.message),
            ErrorType::Syntax => format!("Syntax Error: {}", self.message),
        };

        let formatted = match self.location {
            Some(ref location) => format!("{} ({})", formatted, location),
            None => formatted,
        };

        match self.context {
            Some(ref context) if include_ctx => format!("{}\n{}", formatted, context),
            _ => formatted,
        }
    }
}

pub(crate) fn print_span(source: &str, span: Span) -> String {
    let mut out = String::new();
    let span = span.start.min(source.len())..span.end.min(source.len());
    let start = source[..span.start]
        .rfind('\n')
        .and_then(|start| source[..start].rfind('\n'))
        .map_or(0, |idx| idx + 1);
    let start_line = source[..start].matches('\n').count() + 1;

    let end = source[span.end..]
        .find('\n')
        .map_or(source.len(), |idx| idx + span.end);

    let snippet = &source[start..end];
    let line_count = snippet.lines().count().max(1);
    let line_num_pad = (start_line + line_count - 1).to_string().len();
    for (index, line) in snippet.lines().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let line_num = (start_line + index).to_string();
        out.push_str(&" ".repeat(line_num_pad - line_num.len() + 1));
        out.push_str(&line_num);
        out.push_str(" | ");
        out.push_str(line);
    }
    if !source[span.start..span.end].contains('\n') {
        let start = source[..span.start].rfind('\n').map_or(0, |idx| idx + 1);
        out.push('\n');
        out.push_str(&" ".repeat(line_num_pad + 1));
        out.push_str(" | ");
        out.push_str(&" ".repeat(source[start..span.start].chars().count()));
        out.push_str(&"^".repeat(source[span.start..span.end].chars().count().max(1)));
    };

    out
}

/// A 1-based line and column inside a source document.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[inline]
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offsets of every line start in a source text, used to turn lexer spans into
/// [Location]s without rescanning the source for each token.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(idx, _)| idx + 1),
        );
        LineIndex { line_starts }
    }

    pub(crate) fn location(&self, source: &str, offset: usize) -> Location {
        let offset = offset.min(source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        let line_start = self.line_starts[line];
        let column = source
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        Location {
            line: line + 1,
            column: column + 1,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self)
    }
}

impl error::Error for Error {}
