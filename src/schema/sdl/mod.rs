//! # Loading Schema Definition Language documents
//!
//! The lint rules operate on an already parsed [Schema](super::Schema). This module produces
//! one from SDL source text using a `logos` lexer and a recursive descent parser, and enforces
//! the invariants the rules assume, such as every referenced type being defined.

mod lexer;


pub mod error;
pub mod parser;

pub(crate) use lexer::{next_token, Extras, Token};
pub use parser::ParseSdl;
