//! Token types shared by the tokenizer, the parser and the presentation layer.
//!
//!     Every configured token category maps onto one member of [`TokenKind`]. The set is
//!     closed: the configuration decides *how* each kind is recognised, never *which*
//!     kinds exist. This keeps the parser a plain match over an enum while the patterns
//!     stay data.
//!
//! Reserved Kinds
//!
//!     SKIP is matched and dropped. NEWLINE is dropped as a value but kept as a structural
//!     token (statement separator, line counting). BADSEQ and MISMATCH are error
//!     categories: their matches become lexical errors and never reach the parser.

use std::fmt;
use std::str::FromStr;

/// The closed set of token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Skip,
    Newline,
    Ident,
    Number,
    String,
    Keyword,
    Builtin,
    Assign,
    AugAssign,
    Plus,
    Minus,
    Star,
    Slash,
    EqEq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    LParen,
    RParen,
    LBrack,
    RBrack,
    Comma,
    Colon,
    BadSeq,
    Mismatch,
}

impl TokenKind {
    pub const ALL: [TokenKind; 27] = [
        TokenKind::Skip,
        TokenKind::Newline,
        TokenKind::Ident,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Keyword,
        TokenKind::Builtin,
        TokenKind::Assign,
        TokenKind::AugAssign,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::EqEq,
        TokenKind::Neq,
        TokenKind::Lt,
        TokenKind::Le,
        TokenKind::Gt,
        TokenKind::Ge,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrack,
        TokenKind::RBrack,
        TokenKind::Comma,
        TokenKind::Colon,
        TokenKind::BadSeq,
        TokenKind::Mismatch,
    ];

    /// The upper-case name used in configuration files and output.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Skip => "SKIP",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Ident => "IDENT",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Builtin => "BUILTIN",
            TokenKind::Assign => "ASSIGN",
            TokenKind::AugAssign => "AUGASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::EqEq => "EQEQ",
            TokenKind::Neq => "NEQ",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrack => "LBRACK",
            TokenKind::RBrack => "RBRACK",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::BadSeq => "BADSEQ",
            TokenKind::Mismatch => "MISMATCH",
        }
    }

    /// Matched and thrown away by the tokenizer.
    pub fn is_discarded(self) -> bool {
        matches!(self, TokenKind::Skip)
    }

    /// Matches of this kind are reported as lexical errors.
    pub fn is_error(self) -> bool {
        matches!(self, TokenKind::BadSeq | TokenKind::Mismatch)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a configuration names a category outside [`TokenKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A classified lexeme.
///
/// `offset` is the byte position of the lexeme in the source and `line` its 1-based line.
/// Both are informational; two tokens compare equal on kind and lexeme alone.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub offset: usize,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset: 0,
            line: 1,
        }
    }

    pub fn at(mut self, offset: usize, line: usize) -> Self {
        self.offset = offset;
        self.line = line;
        self
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True for a keyword token spelled exactly `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == word
    }

    /// The `(kind, lexeme)` view, handy in assertions.
    pub fn pair(&self) -> (TokenKind, &str) {
        (self.kind, self.lexeme.as_str())
    }

    /// Lexeme with line breaks spelled out, for tables and messages.
    pub fn display_lexeme(&self) -> String {
        if self.kind == TokenKind::Newline {
            "\\n".to_string()
        } else {
            self.lexeme.clone()
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.lexeme == other.lexeme
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline => write!(f, "NEWLINE"),
            kind => write!(f, "{}({})", kind, self.lexeme),
        }
    }
}
