//! Lexer
//!
//!     Lexing happens in two steps. The [pattern](pattern) module compiles the configured
//!     token rules into a single master pattern; the [tokenizer](tokenizer) module runs that
//!     pattern over source text in one pass.
//!
//!     The master pattern is built once per configuration and is read-only afterwards, so a
//!     [`Tokenizer`] can be shared freely between threads.

pub mod pattern;
pub mod tokenizer;

pub use pattern::{MasterPattern, PatternError};
pub use tokenizer::{LexError, LexOutput, Tokenizer};

use crate::serpent::config::LanguageConfig;

/// Tokenizes `text` with a tokenizer built for `config`.
///
/// Convenience for one-off calls; build a [`Tokenizer`] once when tokenizing repeatedly.
pub fn tokenize(text: &str, config: &LanguageConfig) -> Result<LexOutput, PatternError> {
    Ok(Tokenizer::new(config)?.tokenize(text))
}
