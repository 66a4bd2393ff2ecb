//! Master pattern construction
//!
//!     All configured token rules are compiled into one regex alternation. Each rule
//!     becomes a named group, and the position of that group is remembered together with
//!     the rule's [`TokenKind`]. After a match, the first participating group tells us the
//!     kind directly.
//!
//! Ordering
//!
//!     The regex crate uses leftmost-first semantics, just like a backtracking engine:
//!     among matches starting at the same position, the earliest alternative wins. The
//!     declaration order of the rules is therefore the tie-break, and a catch-all rule
//!     such as `MISMATCH = .` belongs at the end.
//!
//! Placeholders
//!
//!     `{KEYWORDS}` and `{BUILTINS}` (also spelled `{BUILTIN}`) expand to an alternation
//!     of the escaped words, longest first, so `endfor` is tried before any shorter word
//!     it starts with. An empty word list expands to a sub-pattern that never matches.

use crate::serpent::config::{LanguageConfig, TokenSpec};
use crate::serpent::token::TokenKind;
use log::debug;
use regex::{Captures, Regex};
use thiserror::Error;

pub const KEYWORDS_PLACEHOLDER: &str = "{KEYWORDS}";
pub const BUILTINS_PLACEHOLDER: &str = "{BUILTINS}";
const BUILTIN_PLACEHOLDER_SINGULAR: &str = "{BUILTIN}";

/// Matches nothing, anywhere.
pub const NEVER_MATCHES: &str = r"\b\B";

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("no token rules configured")]
    NoRules,
    #[error("invalid pattern for {kind}: {source}")]
    Invalid {
        kind: TokenKind,
        #[source]
        source: regex::Error,
    },
    #[error("pattern for {kind} can match the empty string")]
    MatchesEmpty { kind: TokenKind },
    #[error("master pattern could not be compiled: {0}")]
    Master(#[source] regex::Error),
    #[error("master pattern has no capture group '{name}' for {kind}")]
    MissingGroup { kind: TokenKind, name: String },
}

/// The compiled alternation of every token rule.
#[derive(Debug, Clone)]
pub struct MasterPattern {
    regex: Regex,
    /// Capture group index of each rule, in declaration order.
    groups: Vec<(usize, TokenKind)>,
}

impl MasterPattern {
    pub fn from_config(config: &LanguageConfig) -> Result<Self, PatternError> {
        Self::build(&config.token_specs, &config.keywords, &config.builtins)
    }

    pub fn build(
        specs: &[TokenSpec],
        keywords: &[String],
        builtins: &[String],
    ) -> Result<Self, PatternError> {
        if specs.is_empty() {
            return Err(PatternError::NoRules);
        }

        let keyword_union = word_union(keywords);
        let builtin_union = word_union(builtins);

        let mut branches = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let pattern = expand_placeholders(&spec.pattern, &keyword_union, &builtin_union);
            check_rule(spec.kind, &pattern)?;
            branches.push(format!("(?P<{}>{})", group_name(index), pattern));
        }

        let source = branches.join("|");
        // Every branch compiled on its own, so only size limits can fail here.
        let regex = Regex::new(&source).map_err(PatternError::Master)?;

        let groups = rule_groups(&regex, specs)?;

        debug!(
            "built master pattern with {} rules ({} bytes)",
            specs.len(),
            source.len()
        );

        Ok(Self { regex, groups })
    }

    /// The kind of the first rule that participated in `captures`.
    pub fn kind_of(&self, captures: &Captures<'_>) -> Option<TokenKind> {
        self.groups
            .iter()
            .find(|(group, _)| captures.get(*group).is_some())
            .map(|(_, kind)| *kind)
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

fn group_name(index: usize) -> String {
    format!("__tok{index}")
}

/// Capture group index of each rule's named group in `regex`.
fn rule_groups(
    regex: &Regex,
    specs: &[TokenSpec],
) -> Result<Vec<(usize, TokenKind)>, PatternError> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let name = group_name(index);
            match regex.capture_names().position(|n| n == Some(name.as_str())) {
                Some(group) => Ok((group, spec.kind)),
                None => Err(PatternError::MissingGroup {
                    kind: spec.kind,
                    name,
                }),
            }
        })
        .collect()
}

/// Escaped words joined longest first; ties keep their listed order.
pub fn word_union(words: &[String]) -> String {
    if words.is_empty() {
        return NEVER_MATCHES.to_string();
    }
    let mut escaped: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    escaped.sort_by(|a, b| b.len().cmp(&a.len()));
    escaped.join("|")
}

fn expand_placeholders(pattern: &str, keywords: &str, builtins: &str) -> String {
    pattern
        .replace(KEYWORDS_PLACEHOLDER, keywords)
        .replace(BUILTINS_PLACEHOLDER, builtins)
        .replace(BUILTIN_PLACEHOLDER_SINGULAR, builtins)
}

/// Compiles a single rule to attribute errors to it, and rejects rules that can match
/// without consuming input.
fn check_rule(kind: TokenKind, pattern: &str) -> Result<(), PatternError> {
    let anchored = Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|source| PatternError::Invalid { kind, source })?;
    if anchored.is_match("") {
        return Err(PatternError::MatchesEmpty { kind });
    }
    Ok(())
}
