//! Two-stage analysis: tokenize, then validate.
//!
//!     Lexical errors block syntax analysis. A token stream that came from text with
//!     unmatched spans is never handed to the parser; the caller gets every lexical error
//!     instead. Syntax analysis stops at its first error. The two failure kinds stay
//!     separate in [`AnalysisError`] so they can be reported differently.

use crate::serpent::config::LanguageConfig;
use crate::serpent::lexing::{LexError, LexOutput, PatternError, Tokenizer};
use crate::serpent::parsing::{ParseError, Parser, Program, DEFAULT_MAX_DEPTH};
use crate::serpent::token::Token;
use log::debug;
use serde::Serialize;
use thiserror::Error;

/// Why a source text was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{}", lexical_summary(.0))]
    Lexical(Vec<LexError>),
    #[error("Syntax error: {0}")]
    Syntax(#[source] ParseError),
}

fn lexical_summary(errors: &[LexError]) -> String {
    let mut summary = String::from("Lexical errors:");
    for error in errors {
        summary.push_str(&format!("\n - {error}"));
    }
    summary
}

/// A successfully validated program.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub program: Program,
}

/// One row of the token table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRow {
    pub lexeme: String,
    pub token: String,
    pub explanation: String,
}

/// Runs both stages with one language definition.
#[derive(Debug, Clone)]
pub struct Analyzer<'c> {
    config: &'c LanguageConfig,
    tokenizer: Tokenizer,
    max_depth: usize,
}

impl<'c> Analyzer<'c> {
    pub fn new(config: &'c LanguageConfig) -> Result<Self, PatternError> {
        Ok(Self {
            config,
            tokenizer: Tokenizer::new(config)?,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn config(&self) -> &'c LanguageConfig {
        self.config
    }

    pub fn tokenize(&self, text: &str) -> LexOutput {
        self.tokenizer.tokenize(text)
    }

    /// Validates an already tokenized program.
    pub fn parse(&self, tokens: &[Token]) -> Result<Program, ParseError> {
        Parser::new(tokens, &self.config.terminators)
            .with_max_depth(self.max_depth)
            .parse_program()
    }

    /// Tokenizes and, if that produced no lexical errors, validates `text`.
    pub fn analyze(&self, text: &str) -> Result<Analysis, AnalysisError> {
        let LexOutput { tokens, errors } = self.tokenize(text);
        if !errors.is_empty() {
            debug!("{} lexical errors, skipping syntax analysis", errors.len());
            return Err(AnalysisError::Lexical(errors));
        }
        let program = self.parse(&tokens).map_err(AnalysisError::Syntax)?;
        Ok(Analysis { tokens, program })
    }

    /// Presentation rows for `tokens`, looked up in the translation table.
    pub fn table(&self, tokens: &[Token]) -> Vec<TokenRow> {
        tokens
            .iter()
            .map(|token| {
                let (name, explanation) = self.config.descriptors.describe(token.kind.as_str());
                TokenRow {
                    lexeme: token.display_lexeme(),
                    token: name.to_string(),
                    explanation: explanation.to_string(),
                }
            })
            .collect()
    }
}
