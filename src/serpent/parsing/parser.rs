//! Recursive descent parser
//!
//!     One method per nonterminal, one token of lookahead (two to tell a call from a bare
//!     name). The first violation aborts the parse with a [`ParseError`]; there is no
//!     recovery.
//!
//! Grammar
//!
//!     Program        := StatementList EOF
//!     StatementList  := (Statement Terminator)*
//!     Statement      := Assignment | PrintCall | ForBlock | IfBlock
//!     Assignment     := IDENT ('=' | AUGASSIGN) Expr
//!     PrintCall      := 'print' '(' ArgList? ')'
//!     ForBlock       := 'for' IDENT 'in' Expr ':' NEWLINE StatementList end(for)
//!     IfBlock        := 'if' Expr ':' NEWLINE StatementList
//!                       ('else' ':' NEWLINE StatementList)? end(if)
//!     Expr           := Comparison ('if' Comparison 'else' Expr)?
//!     Comparison     := Additive (('==' | '!=' | '<' | '<=' | '>' | '>=') Additive)*
//!     Additive       := Term (('+' | '-') Term)*
//!     Term           := Factor (('*' | '/') Factor)*
//!     Factor         := ('+' | '-') Factor | Call | NUMBER | STRING | IDENT
//!                     | '[' ArgList? ']' | '(' Expr ')'
//!     Call           := (IDENT | BUILTIN) '(' ArgList? ')'
//!
//!     end(x) is looked up in the block terminator map when the block is parsed. Both
//!     branches of an if block close with end(if). A statement
//!     is terminated by one or more NEWLINEs, by end of input, or by one of the end keywords
//!     the enclosing block is waiting for.
//!
//! Nesting
//!
//!     Blocks and expressions nest by recursion. Depth is bounded by `max_depth`
//!     ([`DEFAULT_MAX_DEPTH`] unless changed); going deeper is a parse error.

use super::ast::{BinaryOp, Expr, Program, Statement, UnaryOp};
use super::cursor::ParseCursor;
use super::error::ParseError;
use crate::serpent::config::BlockTerminators;
use crate::serpent::token::{Token, TokenKind};

pub const DEFAULT_MAX_DEPTH: usize = 128;

const PRINT: &str = "print";
const FOR: &str = "for";
const IN: &str = "in";
const IF: &str = "if";
const ELSE: &str = "else";

type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    cursor: ParseCursor<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], terminators: &'a BlockTerminators) -> Self {
        Self {
            cursor: ParseCursor::new(tokens, terminators),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn cursor(&self) -> &ParseCursor<'a> {
        &self.cursor
    }

    /// Parses the whole token sequence.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        // With no end keywords the list only stops at end of input.
        let statements = self.statement_list_until(&[])?;
        Ok(Program { statements })
    }

    // ===== Statements =====

    /// Parses statements until end of input or one of `ends` (left unconsumed).
    fn statement_list_until(&mut self, ends: &[&str]) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        self.cursor.skip_newlines();
        loop {
            match self.cursor.peek() {
                None => return Ok(statements),
                Some(token) if is_end_keyword(token, ends) => return Ok(statements),
                Some(_) => {}
            }
            statements.push(self.statement()?);
            self.statement_terminator(ends)?;
        }
    }

    fn statement_terminator(&mut self, ends: &[&str]) -> ParseResult<()> {
        match self.cursor.peek() {
            None => Ok(()),
            Some(token) if token.is(TokenKind::Newline) => {
                self.cursor.skip_newlines();
                Ok(())
            }
            Some(token) if is_end_keyword(token, ends) => Ok(()),
            token => {
                let mut expected = String::from("NEWLINE");
                for end in ends {
                    expected.push_str(&format!(" or '{end}'"));
                }
                Err(self.error(format!("Expected {expected}, got {}", describe(token))))
            }
        }
    }

    fn statement(&mut self) -> ParseResult<Statement> {
        let token = self.cursor.peek();
        match token.map(|t| t.kind) {
            Some(TokenKind::Ident) => self.assignment(),
            Some(TokenKind::Keyword) | Some(TokenKind::Builtin) => {
                let word = token.map(|t| t.lexeme.as_str()).unwrap_or_default();
                let is_keyword = token.is_some_and(|t| t.is(TokenKind::Keyword));
                match word {
                    PRINT => self.print_call(),
                    FOR if is_keyword => self.for_block(),
                    IF if is_keyword => self.if_block(),
                    _ => Err(self.error(format!("Unexpected keyword: '{word}'"))),
                }
            }
            _ => Err(self.error(format!("Unexpected token: {}", describe(token)))),
        }
    }

    fn assignment(&mut self) -> ParseResult<Statement> {
        let line = self.cursor.line();
        let target = self.expect(TokenKind::Ident)?.lexeme.clone();
        let op = match self
            .cursor
            .accept(TokenKind::Assign)
            .or_else(|| self.cursor.accept(TokenKind::AugAssign))
        {
            Some(token) => token.lexeme.clone(),
            None => {
                let got = describe(self.cursor.peek());
                return Err(self.error(format!("Expected ASSIGN or AUGASSIGN, got {got}")));
            }
        };
        let value = self.expr()?;
        Ok(Statement::Assign {
            target,
            op,
            value,
            line,
        })
    }

    fn print_call(&mut self) -> ParseResult<Statement> {
        let line = self.cursor.line();
        self.cursor.advance();
        self.expect(TokenKind::LParen)?;
        let args = self.arguments(TokenKind::RParen)?;
        Ok(Statement::Print { args, line })
    }

    fn for_block(&mut self) -> ParseResult<Statement> {
        let line = self.cursor.line();
        self.expect_keyword(FOR)?;
        let var = self.expect(TokenKind::Ident)?.lexeme.clone();
        self.expect_keyword(IN)?;
        let iterable = self.expr()?;
        self.block_header_end()?;

        let end_for = self.cursor.terminators().closing(FOR);
        let body = self.nested(|p| p.statement_list_until(&[end_for.as_str()]))?;
        self.expect_keyword(&end_for)?;

        Ok(Statement::For {
            var,
            iterable,
            body,
            line,
        })
    }

    fn if_block(&mut self) -> ParseResult<Statement> {
        let line = self.cursor.line();
        self.expect_keyword(IF)?;
        let condition = self.expr()?;
        self.block_header_end()?;

        let end_if = self.cursor.terminators().closing(IF);
        let then_body = self.nested(|p| p.statement_list_until(&[ELSE, end_if.as_str()]))?;

        let else_body = if self.cursor.accept_keyword(ELSE) {
            self.block_header_end()?;
            Some(self.nested(|p| p.statement_list_until(&[end_if.as_str()]))?)
        } else {
            None
        };
        self.expect_keyword(&end_if)?;

        Ok(Statement::If {
            condition,
            then_body,
            else_body,
            line,
        })
    }

    /// `':' NEWLINE` after a block header, plus any blank lines.
    fn block_header_end(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::Colon)?;
        self.expect(TokenKind::Newline)?;
        self.cursor.skip_newlines();
        Ok(())
    }

    // ===== Expressions =====

    pub fn expr(&mut self) -> ParseResult<Expr> {
        self.nested(|p| p.conditional())
    }

    fn conditional(&mut self) -> ParseResult<Expr> {
        let then = self.comparison()?;
        if !self.cursor.accept_keyword(IF) {
            return Ok(then);
        }
        let condition = self.comparison()?;
        self.expect_keyword(ELSE)?;
        let otherwise = self.expr()?;
        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.additive()?;
        while let Some(op) = self.accept_operator(comparison_op) {
            let right = self.additive()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.term()?;
        while let Some(op) = self.accept_operator(additive_op) {
            let right = self.term()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut left = self.factor()?;
        while let Some(op) = self.accept_operator(multiplicative_op) {
            let right = self.factor()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        if self.cursor.accept(TokenKind::Plus).is_some() {
            let operand = self.nested(|p| p.factor())?;
            return Ok(Expr::unary(UnaryOp::Plus, operand));
        }
        if self.cursor.accept(TokenKind::Minus).is_some() {
            let operand = self.nested(|p| p.factor())?;
            return Ok(Expr::unary(UnaryOp::Minus, operand));
        }

        let token = self.cursor.peek();
        let next_is_paren = self
            .cursor
            .peek_nth(1)
            .is_some_and(|t| t.is(TokenKind::LParen));

        match token.map(|t| t.kind) {
            Some(TokenKind::Ident) | Some(TokenKind::Builtin) if next_is_paren => self.call(),
            Some(TokenKind::Number) => Ok(Expr::Number(self.advance_lexeme())),
            Some(TokenKind::String) => Ok(Expr::Str(self.advance_lexeme())),
            Some(TokenKind::Ident) => Ok(Expr::Ident(self.advance_lexeme())),
            Some(TokenKind::LBrack) => {
                self.cursor.advance();
                Ok(Expr::List(self.arguments(TokenKind::RBrack)?))
            }
            Some(TokenKind::LParen) => {
                self.cursor.advance();
                let inner = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.error(format!("Unexpected factor: {}", describe(token)))),
        }
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let callee = self.advance_lexeme();
        self.expect(TokenKind::LParen)?;
        let args = self.arguments(TokenKind::RParen)?;
        Ok(Expr::Call { callee, args })
    }

    /// `(Expr (',' Expr)*)? close` with the opening token already consumed.
    fn arguments(&mut self, close: TokenKind) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.cursor.check(close) {
            args.push(self.expr()?);
            while self.cursor.accept(TokenKind::Comma).is_some() {
                args.push(self.expr()?);
            }
        }
        self.expect(close)?;
        Ok(args)
    }

    // ===== Helpers =====

    fn accept_operator(&mut self, op_for: fn(TokenKind) -> Option<BinaryOp>) -> Option<BinaryOp> {
        let op = self.cursor.peek_kind().and_then(op_for)?;
        self.cursor.advance();
        Some(op)
    }

    fn advance_lexeme(&mut self) -> String {
        self.cursor
            .advance()
            .map(|t| t.lexeme.clone())
            .unwrap_or_default()
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<&'a Token> {
        match self.cursor.accept(kind) {
            Some(token) => Ok(token),
            None => {
                let got = describe(self.cursor.peek());
                Err(self.error(format!("Expected {kind}, got {got}")))
            }
        }
    }

    fn expect_keyword(&mut self, word: &str) -> ParseResult<()> {
        if self.cursor.accept_keyword(word) {
            Ok(())
        } else {
            let got = describe(self.cursor.peek());
            Err(self.error(format!("Expected '{word}', got {got}")))
        }
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.max_depth {
            return Err(self.error(format!("Nesting deeper than {} levels", self.max_depth)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn error(&self, message: String) -> ParseError {
        ParseError::new(message, self.cursor.line())
    }
}

fn is_end_keyword(token: &Token, ends: &[&str]) -> bool {
    token.is(TokenKind::Keyword) && ends.contains(&token.lexeme.as_str())
}

/// How a token is named in error messages.
fn describe(token: Option<&Token>) -> String {
    match token {
        None => "end of input".to_string(),
        Some(token) if token.is(TokenKind::Newline) => "NEWLINE".to_string(),
        Some(token) => format!("'{}'", token.lexeme),
    }
}

fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::Neq => Some(BinaryOp::Ne),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::Le => Some(BinaryOp::Le),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::Ge => Some(BinaryOp::Ge),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        _ => None,
    }
}
