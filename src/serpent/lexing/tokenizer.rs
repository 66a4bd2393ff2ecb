//! Tokenizer
//!
//!     Scans the source once, left to right, repeatedly asking the master pattern for the
//!     leftmost match at or after the scan position. What happens to a match depends on
//!     its kind:
//!
//!         SKIP                dropped
//!         NEWLINE             emitted as a structural token
//!         BADSEQ, MISMATCH    recorded as a lexical error, scanning continues
//!         anything else       emitted as a token
//!
//!     Text the pattern skips over (only possible without a catch-all rule) is also a
//!     lexical error. Tokenizing never fails: it always returns tokens and errors, and the
//!     caller decides what lexical errors mean for the next stage.

use super::pattern::{MasterPattern, PatternError};
use crate::serpent::config::LanguageConfig;
use crate::serpent::token::{Token, TokenKind};
use log::{trace, warn};
use std::fmt;

/// An unmatched or invalid span of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub text: String,
    /// Byte offset of the span in the source.
    pub offset: usize,
    /// 1-based line of the span.
    pub line: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error, '{}' is not a valid token", self.text)
    }
}

impl std::error::Error for LexError {}

/// Result of one tokenizer pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<LexError>) {
        (self.tokens, self.errors)
    }
}

/// Splits source text into tokens using a compiled [`MasterPattern`].
///
/// The tokenizer holds no per-call state, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: MasterPattern,
}

impl Tokenizer {
    pub fn new(config: &LanguageConfig) -> Result<Self, PatternError> {
        Ok(Self::from_pattern(MasterPattern::from_config(config)?))
    }

    pub fn from_pattern(pattern: MasterPattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &MasterPattern {
        &self.pattern
    }

    pub fn tokenize(&self, text: &str) -> LexOutput {
        let mut scan = Scan::new(text);
        let regex = self.pattern.regex();

        // Where the next search starts; lags behind `scan.pos` only after a zero-width match.
        let mut search_from = 0;
        while search_from < text.len() {
            let Some(captures) = regex.captures_at(text, search_from) else {
                break;
            };
            let Some(whole) = captures.get(0) else {
                break;
            };

            if whole.start() > scan.pos {
                scan.gap(whole.start());
            }

            if whole.is_empty() {
                warn!(
                    "zero-width match at byte {}; check the token patterns",
                    whole.start()
                );
                search_from = next_char_boundary(text, whole.start());
                continue;
            }

            match self.pattern.kind_of(&captures) {
                Some(kind) => scan.accept(kind, whole.start(), whole.as_str()),
                None => scan.reject(whole.start(), whole.as_str()),
            }
            scan.pos = whole.end();
            search_from = scan.pos;
        }

        if scan.pos < text.len() {
            scan.gap(text.len());
        }
        scan.finish()
    }
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map(|c| from + c.len_utf8())
        .unwrap_or(text.len())
}

/// Mutable state of a single tokenizer pass.
struct Scan<'t> {
    text: &'t str,
    pos: usize,
    line: usize,
    output: LexOutput,
}

impl<'t> Scan<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            output: LexOutput::default(),
        }
    }

    fn accept(&mut self, kind: TokenKind, offset: usize, lexeme: &str) {
        if kind.is_error() {
            self.reject(offset, lexeme);
            return;
        }
        if !kind.is_discarded() {
            let token = Token::new(kind, lexeme).at(offset, self.line);
            trace!("{token}");
            self.output.tokens.push(token);
        }
        self.line += count_lines(lexeme);
    }

    fn reject(&mut self, offset: usize, text: &str) {
        self.output.errors.push(LexError {
            text: text.to_string(),
            offset,
            line: self.line,
        });
        self.line += count_lines(text);
    }

    /// Reports the unmatched text between the scan position and `end`.
    fn gap(&mut self, end: usize) {
        let text = self.text;
        let skipped = &text[self.pos..end];
        let trimmed = skipped.trim();
        let lead = skipped.len() - skipped.trim_start().len();
        // Whitespace around the span only moves the line counter.
        self.line += count_lines(&skipped[..lead]);
        if trimmed.is_empty() {
            self.line += count_lines(&skipped[lead..]);
        } else {
            self.reject(self.pos + lead, trimmed);
            self.line += count_lines(&skipped[lead + trimmed.len()..]);
        }
        self.pos = end;
    }

    fn finish(self) -> LexOutput {
        self.output
    }
}

fn count_lines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serpent::config::TokenSpec;

    fn tokenizer(rules: &[(TokenKind, &str)]) -> Tokenizer {
        let specs: Vec<TokenSpec> = rules
            .iter()
            .map(|(kind, pattern)| TokenSpec {
                kind: *kind,
                pattern: pattern.to_string(),
            })
            .collect();
        Tokenizer::from_pattern(MasterPattern::build(&specs, &[], &[]).unwrap())
    }

    fn pairs(output: &LexOutput) -> Vec<(TokenKind, &str)> {
        output.tokens.iter().map(Token::pair).collect()
    }

    #[test]
    fn test_skip_is_dropped_newline_is_kept() {
        let t = tokenizer(&[
            (TokenKind::Newline, r"\n"),
            (TokenKind::Skip, r"[ \t]+"),
            (TokenKind::Ident, r"[a-z]+"),
        ]);
        let output = t.tokenize("ab  cd\nef");
        assert!(output.is_clean());
        assert_eq!(
            pairs(&output),
            vec![
                (TokenKind::Ident, "ab"),
                (TokenKind::Ident, "cd"),
                (TokenKind::Newline, "\n"),
                (TokenKind::Ident, "ef"),
            ]
        );
        assert_eq!(output.tokens[3].line, 2);
        assert_eq!(output.tokens[3].offset, 7);
    }

    #[test]
    fn test_error_categories_are_collected_not_emitted() {
        let t = tokenizer(&[
            (TokenKind::Skip, r"\s+"),
            (TokenKind::Ident, r"[a-z]+"),
            (TokenKind::Mismatch, r"."),
        ]);
        let output = t.tokenize("a @ b $");
        assert_eq!(
            pairs(&output),
            vec![(TokenKind::Ident, "a"), (TokenKind::Ident, "b")]
        );
        let texts: Vec<_> = output.errors.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["@", "$"]);
        assert_eq!(output.errors[0].to_string(), "Error, '@' is not a valid token");
    }

    #[test]
    fn test_gaps_are_reported() {
        // No catch-all rule: the pattern simply skips over "%%"
        let t = tokenizer(&[(TokenKind::Skip, r" +"), (TokenKind::Ident, r"[a-z]+")]);
        let output = t.tokenize("ab %% cd");
        assert_eq!(
            pairs(&output),
            vec![(TokenKind::Ident, "ab"), (TokenKind::Ident, "cd")]
        );
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].text, "%%");
        assert_eq!(output.errors[0].offset, 3);
    }

    #[test]
    fn test_trailing_gap_is_reported() {
        let t = tokenizer(&[(TokenKind::Ident, r"[a-z]+")]);
        let output = t.tokenize("ab12");
        assert_eq!(pairs(&output), vec![(TokenKind::Ident, "ab")]);
        assert_eq!(output.errors[0].text, "12");
    }

    #[test]
    fn test_zero_width_match_does_not_stall() {
        // `\b` alone passes the empty-string check but matches with zero width
        let t = tokenizer(&[(TokenKind::Ident, r"[a-z]+"), (TokenKind::Skip, r"\b")]);
        let output = t.tokenize("ab+cd");
        assert_eq!(
            pairs(&output),
            vec![(TokenKind::Ident, "ab"), (TokenKind::Ident, "cd")]
        );
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].text, "+");
    }

    #[test]
    fn test_error_lines_follow_newlines() {
        let t = tokenizer(&[
            (TokenKind::Newline, r"\n"),
            (TokenKind::Ident, r"[a-z]+"),
            (TokenKind::Mismatch, r"."),
        ]);
        let output = t.tokenize("a\nb\n?");
        assert_eq!(output.errors[0].line, 3);
    }

    #[test]
    fn test_empty_input() {
        let t = tokenizer(&[(TokenKind::Ident, r"[a-z]+")]);
        assert_eq!(t.tokenize(""), LexOutput::default());
    }
}
