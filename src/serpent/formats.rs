//! Output formats for analysis results
//!
//!     The lexical stage can be shown as an aligned table, a raw `KIND : lexeme` dump, or
//!     serialized token rows (JSON, YAML). The syntax stage can additionally be shown as
//!     the outline of the parsed [`Program`], or as the serialized tree in the JSON and
//!     YAML formats.
//!
//!     All renderers return the full text, one line per entry, each line ending in `\n`.

use crate::serpent::analyzer::TokenRow;
use crate::serpent::parsing::Program;
use crate::serpent::token::Token;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found (available: table, tokens, json, yaml, ast)")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Lexeme / Token / Explanation columns.
    #[default]
    Table,
    /// One `KIND : lexeme` line per token.
    Tokens,
    /// Token rows and the syntax tree as JSON.
    Json,
    /// Token rows and the syntax tree as YAML.
    Yaml,
    /// The token table, followed by the syntax tree outline once the program validates.
    Ast,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Table,
        OutputFormat::Tokens,
        OutputFormat::Json,
        OutputFormat::Yaml,
        OutputFormat::Ast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Tokens => "tokens",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Ast => "ast",
        }
    }

    pub fn shows_tree(self) -> bool {
        matches!(
            self,
            OutputFormat::Ast | OutputFormat::Json | OutputFormat::Yaml
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormatError::FormatNotFound(s.to_string()))
    }
}

/// Renders the lexical stage in `format`.
pub fn format_tokens(
    format: OutputFormat,
    rows: &[TokenRow],
    tokens: &[Token],
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Table | OutputFormat::Ast => Ok(format_table(rows)),
        OutputFormat::Tokens => Ok(format_raw_tokens(tokens)),
        OutputFormat::Json => to_json(rows),
        OutputFormat::Yaml => to_yaml(rows),
    }
}

/// Renders a validated program in `format`: serialized for JSON and YAML, the indented
/// outline otherwise.
pub fn format_tree(format: OutputFormat, program: &Program) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(program),
        OutputFormat::Yaml => to_yaml(program),
        OutputFormat::Table | OutputFormat::Tokens | OutputFormat::Ast => {
            Ok(format_program(program))
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| FormatError::SerializationError(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    serde_yaml::to_string(value).map_err(|e| FormatError::SerializationError(e.to_string()))
}

/// Aligned three-column table. Column widths follow the longest lexeme and token name.
pub fn format_table(rows: &[TokenRow]) -> String {
    if rows.is_empty() {
        return "(no tokens)\n".to_string();
    }
    let lexeme_width = rows
        .iter()
        .map(|r| r.lexeme.chars().count())
        .max()
        .unwrap_or(0)
        .max("Lexeme".len());
    let token_width = rows
        .iter()
        .map(|r| r.token.chars().count())
        .max()
        .unwrap_or(0)
        .max("Token".len());

    let mut out = String::new();
    push_row(&mut out, lexeme_width, token_width, "Lexeme", "Token", "Explanation");
    out.push_str(&"-".repeat(lexeme_width + token_width + "Explanation".len() + 4));
    out.push('\n');
    for row in rows {
        push_row(
            &mut out,
            lexeme_width,
            token_width,
            &row.lexeme,
            &row.token,
            &row.explanation,
        );
    }
    out
}

fn push_row(out: &mut String, w1: usize, w2: usize, lexeme: &str, token: &str, explanation: &str) {
    let line = format!("{lexeme:<w1$}  {token:<w2$}  {explanation}");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Raw `KIND : lexeme` dump with right-aligned kind names.
pub fn format_raw_tokens(tokens: &[Token]) -> String {
    if tokens.is_empty() {
        return "(no tokens)\n".to_string();
    }
    tokens
        .iter()
        .map(|t| format!("{:>10} : {}\n", t.kind.as_str(), t.display_lexeme()))
        .collect()
}

/// Indented outline of a validated program.
pub fn format_program(program: &Program) -> String {
    if program.statements.is_empty() {
        return "(empty program)\n".to_string();
    }
    program.to_string()
}

/// Section title underlined with `=`, preceded by a blank line.
pub fn section_header(title: &str) -> String {
    format!("\n{title}\n{}\n", "=".repeat(title.chars().count()))
}
