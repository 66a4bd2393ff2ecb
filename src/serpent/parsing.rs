//! Syntax validation
//!
//!     A recursive descent parser over the token sequence produced by the tokenizer. Its
//!     contract is a verdict: the program is valid, or the first violation is reported with
//!     a line number. Along the way it builds a small [syntax tree](ast) so callers and tests
//!     can see how a program was understood.
//!
//!     Block terminators come from the [`BlockTerminators`] passed in; nothing about them is
//!     hardcoded in the parser.
//!
//!     The parser must only see token streams without lexical errors. [`crate::serpent::analyzer`]
//!     enforces that when running both stages.

pub mod ast;
pub mod cursor;
pub mod error;
pub mod parser;

pub use ast::{BinaryOp, Expr, Program, Statement, UnaryOp};
pub use cursor::ParseCursor;
pub use error::ParseError;
pub use parser::{Parser, DEFAULT_MAX_DEPTH};

use crate::serpent::config::BlockTerminators;
use crate::serpent::token::Token;

/// Parses `tokens` into a [`Program`].
pub fn parse(tokens: &[Token], terminators: &BlockTerminators) -> Result<Program, ParseError> {
    Parser::new(tokens, terminators).parse_program()
}

/// Checks `tokens` against the grammar without keeping the tree.
pub fn validate(tokens: &[Token], terminators: &BlockTerminators) -> Result<(), ParseError> {
    parse(tokens, terminators).map(|_| ())
}
