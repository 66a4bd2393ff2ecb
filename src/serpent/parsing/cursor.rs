//! Read cursor over a token sequence.

use crate::serpent::config::BlockTerminators;
use crate::serpent::token::{Token, TokenKind};

/// Position in a token sequence plus the block terminators the parse runs with.
///
/// The index only moves forward and never passes the end of the sequence. NEWLINE tokens
/// are counted as they are consumed, which gives the current line without rescanning.
#[derive(Debug, Clone)]
pub struct ParseCursor<'a> {
    tokens: &'a [Token],
    index: usize,
    newlines: usize,
    terminators: &'a BlockTerminators,
}

impl<'a> ParseCursor<'a> {
    pub fn new(tokens: &'a [Token], terminators: &'a BlockTerminators) -> Self {
        Self {
            tokens,
            index: 0,
            newlines: 0,
            terminators,
        }
    }

    pub fn terminators(&self) -> &'a BlockTerminators {
        self.terminators
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// 1-based line of the current position.
    pub fn line(&self) -> usize {
        1 + self.newlines
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    pub fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.index + n)
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub fn check_keyword(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(word))
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        if token.kind == TokenKind::Newline {
            self.newlines += 1;
        }
        Some(token)
    }

    pub fn accept(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    pub fn accept_keyword(&mut self, word: &str) -> bool {
        if self.check_keyword(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes any run of NEWLINE tokens.
    pub fn skip_newlines(&mut self) {
        while self.accept(TokenKind::Newline).is_some() {}
    }
}
