use std::{error::Error, fmt::Display};

/// Errors raised while loading SDL, before they're converted to the crate's [`crate::error::Error`].
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// The source text doesn't follow the SDL grammar.
    SyntaxError(String),
    /// The document parsed but violates an invariant the lint rules rely on.
    ValidationError(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::SyntaxError(s) => write!(f, "{}", s),
            SchemaError::ValidationError(s) => write!(f, "Invalid schema: {}", s),
        }
    }
}

impl Error for SchemaError {}

macro_rules! syntax_err {
    ($msg:literal, $($arg:tt)*) => {
        Err(syntax!($msg, $($arg)*))
    };

    ($msg:literal) => {
        Err(syntax!($msg))
    };
}

macro_rules! syntax {
    ($msg:literal, $($arg:tt)*) => {
        SchemaError::SyntaxError(format!($msg, $($arg)*))
    };

    ($msg:literal) => {
        SchemaError::SyntaxError(format!($msg))
    };
}

macro_rules! validation {
    ($msg:literal, $($arg:tt)*) => {
        SchemaError::ValidationError(format!($msg, $($arg)*))
    };

    ($msg:literal) => {
        SchemaError::ValidationError(format!($msg))
    };
}

// Required for macro visibility.
pub(crate) use syntax;
pub(crate) use syntax_err;
pub(crate) use validation;
