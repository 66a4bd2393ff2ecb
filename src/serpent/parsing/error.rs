use thiserror::Error;

/// First grammar violation found by the parser.
///
/// `line` is 1 plus the number of NEWLINE tokens consumed before the failure point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}
