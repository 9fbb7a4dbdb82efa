//! # Field Sets
//!
//! A field set is the small selection language that's passed as a string to directives such as
//! `@key(fields: "id organization { id }")`. It's a space separated list of field names, each
//! optionally followed by a nested selection in braces.
//!
//! Insignificant commas are accepted inside nested selections, but never at the top level of a
//! field set, which is why [`FieldSet::parse`] scans for those before any tokens are read.

use crate::schema::sdl::{next_token, Extras, Token};
use bumpalo::{collections::Vec, Bump};
use logos::{Lexer, Logos};
use std::fmt;

/// Errors returned when a field set string can't be read.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FieldSetError {
    /// A comma was found outside of any braces or brackets, at the given byte offset.
    TopLevelComma(usize),
    /// The field set contains no selections at all.
    Empty,
    /// The field set doesn't follow the selection grammar.
    Syntax(String),
}

impl fmt::Display for FieldSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSetError::TopLevelComma(offset) => write!(
                f,
                "fields must be separated by spaces, found a comma at offset {}",
                offset
            ),
            FieldSetError::Empty => write!(f, "the field set selects no fields"),
            FieldSetError::Syntax(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for FieldSetError {}

/// A single field of a [FieldSet], with its nested selections if it has any.
#[derive(Debug, PartialEq, Clone)]
pub struct FieldSelection<'a> {
    pub name: &'a str,
    pub selections: Vec<'a, FieldSelection<'a>>,
}

/// A parsed field set. Only the top-level selections are relevant to the owning type.
#[derive(Debug, PartialEq, Clone)]
pub struct FieldSet<'a> {
    pub selections: Vec<'a, FieldSelection<'a>>,
}

impl<'a> FieldSet<'a> {
    /// Parse a field set string into the arena.
    pub fn parse(arena: &'a Bump, source: &'a str) -> Result<Self, FieldSetError> {
        check_top_level_commas(source)?;
        let mut parser = FieldSetParser {
            arena,
            lexer: Token::lexer_with_extras(source, Extras { arena }),
            peek: None,
        };
        let selections = parser.selections()?;
        if selections.is_empty() {
            return Err(FieldSetError::Empty);
        }
        Ok(FieldSet { selections })
    }

    /// Iterates the names of the top-level selections in the order they were written.
    pub fn field_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.selections.iter().map(|selection| selection.name)
    }
}

/// Scans the raw field set for a comma outside of `{}` and `[]` delimiters.
///
/// Unbalanced closing delimiters are left to the parser to report.
pub fn check_top_level_commas(source: &str) -> Result<(), FieldSetError> {
    let mut braces = 0usize;
    let mut brackets = 0usize;
    for (offset, byte) in source.bytes().enumerate() {
        match byte {
            b'{' => braces += 1,
            b'}' => braces = braces.saturating_sub(1),
            b'[' => brackets += 1,
            b']' => brackets = brackets.saturating_sub(1),
            b',' if braces == 0 && brackets == 0 => {
                return Err(FieldSetError::TopLevelComma(offset))
            }
            _ => {}
        }
    }
    Ok(())
}

/// Nested selections deeper than this are rejected.
pub const MAX_NESTING_DEPTH: usize = 64;

struct FieldSetParser<'a> {
    arena: &'a Bump,
    lexer: Lexer<'a, Token<'a>>,
    peek: Option<Token<'a>>,
}

impl<'a> FieldSetParser<'a> {
    #[inline]
    fn next(&mut self) -> Token<'a> {
        match self.peek.take() {
            Some(token) => token,
            None => next_token(&mut self.lexer).0,
        }
    }

    #[inline]
    fn peek(&mut self) -> Token<'a> {
        let lexer = &mut self.lexer;
        *self.peek.get_or_insert_with(|| next_token(lexer).0)
    }

    /// Reads selections up to the end of the field set. Nested selections are tracked on an
    /// explicit stack of open fields, so the nesting depth never grows the call stack.
    fn selections(&mut self) -> Result<Vec<'a, FieldSelection<'a>>, FieldSetError> {
        let mut root = Vec::new_in(self.arena);
        let mut open: std::vec::Vec<(&'a str, Vec<'a, FieldSelection<'a>>)> = std::vec::Vec::new();
        loop {
            let selection = match self.next() {
                Token::Name(name) if self.peek() == Token::BraceOpen => {
                    if open.len() >= MAX_NESTING_DEPTH {
                        return Err(FieldSetError::Syntax(format!(
                            "the field set is nested too deeply, at most {} levels are supported",
                            MAX_NESTING_DEPTH
                        )));
                    }
                    self.next();
                    open.push((name, Vec::new_in(self.arena)));
                    continue;
                }
                Token::Name(name) => FieldSelection {
                    name,
                    selections: Vec::new_in(self.arena),
                },
                Token::BraceClose => match open.pop() {
                    Some((name, selections)) if selections.is_empty() => {
                        return Err(FieldSetError::Syntax(format!(
                            "the nested selection of `{}` is empty",
                            name
                        )))
                    }
                    Some((name, selections)) => FieldSelection { name, selections },
                    None => {
                        return Err(FieldSetError::Syntax(String::from(
                            "unexpected closing brace without a matching opening brace",
                        )))
                    }
                },
                Token::End if open.is_empty() => return Ok(root),
                Token::End => {
                    return Err(FieldSetError::Syntax(String::from(
                        "unexpected end of the field set, a closing brace is missing",
                    )))
                }
                token => {
                    return Err(FieldSetError::Syntax(format!(
                        "expected a field name, got {:?}",
                        token
                    )))
                }
            };
            match open.last_mut() {
                Some((_, selections)) => selections.push(selection),
                None => root.push(selection),
            }
        }
    }
}
