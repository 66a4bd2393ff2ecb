//! Language configuration loading
//!
//!     Serpent+ is defined by five declarative text files. This module reads them into a
//!     [`LanguageConfig`], which is then handed by reference to the pattern builder, the
//!     tokenizer, the parser and the presentation layer. Nothing here is global: every
//!     call to [`LanguageConfig::load`] produces an independent value.
//!
//! Files
//!
//!     token_lexeme.txt        `NAME = pattern`, tried in declaration order (required)
//!     token_translation.txt   `CATEGORY|DisplayName|Explanation` (required)
//!     keywords.txt            one word per line (optional, empty when absent)
//!     builtin.txt             one word per line (optional, empty when absent)
//!     block_termination.txt   `opener = terminator` (optional, defaults when absent)
//!
//!     All files share the same line rules: lines are trimmed, blank lines and lines
//!     starting with `#` are ignored. Malformed lines are skipped with a warning.
//!
//! Defaults
//!
//!     The stock language definition lives in `defaults/` and is compiled into the library.
//!     [`LanguageConfig::embedded`] returns a shared instance built from it on first use.

pub mod descriptors;
mod lines;
pub mod terminators;

pub use descriptors::{TokenDescriptor, TokenDescriptors};
pub use terminators::{BlockTerminators, DEFAULT_TERMINATORS};

use crate::serpent::token::TokenKind;
use lines::{meaningful_lines, split_assignment};
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TOKEN_LEXEME_FILE: &str = "token_lexeme.txt";
pub const TOKEN_TRANSLATION_FILE: &str = "token_translation.txt";
pub const KEYWORDS_FILE: &str = "keywords.txt";
pub const BUILTINS_FILE: &str = "builtin.txt";
pub const BLOCK_TERMINATION_FILE: &str = "block_termination.txt";

const DEFAULT_TOKEN_LEXEME: &str = include_str!("../../defaults/token_lexeme.txt");
const DEFAULT_TOKEN_TRANSLATION: &str = include_str!("../../defaults/token_translation.txt");
const DEFAULT_KEYWORDS: &str = include_str!("../../defaults/keywords.txt");
const DEFAULT_BUILTINS: &str = include_str!("../../defaults/builtin.txt");
const DEFAULT_BLOCK_TERMINATION: &str = include_str!("../../defaults/block_termination.txt");

static EMBEDDED: Lazy<LanguageConfig> = Lazy::new(|| {
    LanguageConfig::from_texts(&ConfigTexts::embedded())
        .expect("embedded language definition is valid")
});

/// Errors raised while loading a language definition.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("token_lexeme:{line}: unknown token category '{name}'")]
    UnknownCategory { name: String, line: usize },
    #[error("token_lexeme:{line}: category '{name}' is already defined")]
    DuplicateCategory { name: String, line: usize },
}

/// A named sub-pattern of the master pattern.
///
/// `pattern` may still contain `{KEYWORDS}` / `{BUILTINS}` placeholders; they are
/// substituted by the pattern builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpec {
    pub kind: TokenKind,
    pub pattern: String,
}

/// Where to read each configuration file from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
    pub token_lexeme: PathBuf,
    pub token_translation: PathBuf,
    pub keywords: PathBuf,
    pub builtins: PathBuf,
    pub block_termination: PathBuf,
}

impl ConfigSources {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            token_lexeme: dir.join(TOKEN_LEXEME_FILE),
            token_translation: dir.join(TOKEN_TRANSLATION_FILE),
            keywords: dir.join(KEYWORDS_FILE),
            builtins: dir.join(BUILTINS_FILE),
            block_termination: dir.join(BLOCK_TERMINATION_FILE),
        }
    }

    pub fn with_block_termination(mut self, path: impl Into<PathBuf>) -> Self {
        self.block_termination = path.into();
        self
    }
}

/// In-memory configuration sources. Optional files are `None` when absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigTexts<'a> {
    pub token_lexeme: &'a str,
    pub token_translation: &'a str,
    pub keywords: Option<&'a str>,
    pub builtins: Option<&'a str>,
    pub block_termination: Option<&'a str>,
}

impl ConfigTexts<'static> {
    /// The language definition compiled into the library.
    pub fn embedded() -> Self {
        Self {
            token_lexeme: DEFAULT_TOKEN_LEXEME,
            token_translation: DEFAULT_TOKEN_TRANSLATION,
            keywords: Some(DEFAULT_KEYWORDS),
            builtins: Some(DEFAULT_BUILTINS),
            block_termination: Some(DEFAULT_BLOCK_TERMINATION),
        }
    }
}

/// A fully loaded language definition.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    pub token_specs: Vec<TokenSpec>,
    pub keywords: Vec<String>,
    pub builtins: Vec<String>,
    pub descriptors: TokenDescriptors,
    pub terminators: BlockTerminators,
}

impl LanguageConfig {
    /// Reads every file named by `sources`.
    pub fn load(sources: &ConfigSources) -> Result<Self, ConfigError> {
        let token_lexeme = read_required(&sources.token_lexeme)?;
        let token_translation = read_required(&sources.token_translation)?;
        let keywords = read_optional(&sources.keywords)?;
        let builtins = read_optional(&sources.builtins)?;
        let block_termination = read_optional(&sources.block_termination)?;

        Self::from_texts(&ConfigTexts {
            token_lexeme: &token_lexeme,
            token_translation: &token_translation,
            keywords: keywords.as_deref(),
            builtins: builtins.as_deref(),
            block_termination: block_termination.as_deref(),
        })
    }

    /// Loads the standard file names from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(&ConfigSources::in_dir(dir))
    }

    pub fn from_texts(texts: &ConfigTexts<'_>) -> Result<Self, ConfigError> {
        let token_specs = parse_token_specs(texts.token_lexeme)?;
        let keywords = texts.keywords.map(parse_words).unwrap_or_default();
        let builtins = texts.builtins.map(parse_words).unwrap_or_default();
        let descriptors = TokenDescriptors::parse(texts.token_translation);
        let terminators = texts
            .block_termination
            .map(BlockTerminators::parse)
            .unwrap_or_default();

        debug!(
            "loaded {} token rules, {} keywords, {} builtins, {} descriptors, {} block terminators",
            token_specs.len(),
            keywords.len(),
            builtins.len(),
            descriptors.len(),
            terminators.len()
        );

        Ok(Self {
            token_specs,
            keywords,
            builtins,
            descriptors,
            terminators,
        })
    }

    /// The stock Serpent+ definition, built once and shared.
    pub fn embedded() -> &'static LanguageConfig {
        &EMBEDDED
    }

    /// The stock definition with block terminators read from `path`.
    ///
    /// A missing file keeps the stock terminators.
    pub fn embedded_with_block_termination(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let block_termination = read_optional(path.as_ref())?;
        let mut texts = ConfigTexts::embedded();
        if let Some(text) = block_termination.as_deref() {
            texts.block_termination = Some(text);
        }
        Self::from_texts(&texts)
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.iter().any(|k| k == word)
    }

    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtins.iter().any(|b| b == word)
    }
}

fn read_required(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("{} not found, using fallback", path.display());
            Ok(None)
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_token_specs(text: &str) -> Result<Vec<TokenSpec>, ConfigError> {
    let mut specs: Vec<TokenSpec> = Vec::new();
    for (line_no, line) in meaningful_lines(text) {
        let Some((name, pattern)) = split_assignment(line) else {
            warn!("token_lexeme:{line_no}: skipping line without 'NAME = pattern'");
            continue;
        };
        let kind: TokenKind = name.parse().map_err(|_| ConfigError::UnknownCategory {
            name: name.to_string(),
            line: line_no,
        })?;
        if specs.iter().any(|spec| spec.kind == kind) {
            return Err(ConfigError::DuplicateCategory {
                name: name.to_string(),
                line: line_no,
            });
        }
        specs.push(TokenSpec {
            kind,
            pattern: pattern.to_string(),
        });
    }
    Ok(specs)
}

/// One word per line, duplicates dropped, first occurrence kept.
fn parse_words(text: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for (_, word) in meaningful_lines(text) {
        if !words.iter().any(|w| w == word) {
            words.push(word.to_string());
        }
    }
    words
}
