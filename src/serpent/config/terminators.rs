//! Block terminator map
//!
//!     Maps a block-opening keyword to the keyword that closes it (`if -> endif`). The
//!     parser resolves terminators through this map at parse time, so a language variant
//!     can rename `endfor` to `done` by editing `block_termination.txt` alone. The new
//!     word must also be listed in `keywords.txt` to be tokenized as a keyword.
//!
//!     Entries for `if`, `else` and `for` always exist: missing ones fall back to
//!     [`DEFAULT_TERMINATORS`].

use super::lines::{meaningful_lines, split_assignment};
use log::warn;
use std::collections::HashMap;

pub const DEFAULT_TERMINATORS: [(&str, &str); 3] =
    [("if", "endif"), ("else", "endif"), ("for", "endfor")];

/// Immutable opener -> terminator map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTerminators {
    map: HashMap<String, String>,
}

impl BlockTerminators {
    /// Parses `opener = terminator` lines, then fills in the defaults.
    pub fn parse(text: &str) -> Self {
        let mut map = HashMap::new();
        for (line_no, line) in meaningful_lines(text) {
            match split_assignment(line) {
                Some((opener, terminator)) => {
                    map.insert(opener.to_string(), terminator.to_string());
                }
                None => warn!("block_termination:{line_no}: skipping malformed rule {line:?}"),
            }
        }
        Self::with_defaults(map)
    }

    fn with_defaults(mut map: HashMap<String, String>) -> Self {
        for (opener, terminator) in DEFAULT_TERMINATORS {
            map.entry(opener.to_string())
                .or_insert_with(|| terminator.to_string());
        }
        Self { map }
    }

    /// The keyword closing a block opened by `opener`, if one is configured.
    pub fn get(&self, opener: &str) -> Option<&str> {
        self.map.get(opener).map(String::as_str)
    }

    /// The keyword closing a block opened by `opener`.
    ///
    /// Openers without an entry close with `end<opener>`.
    pub fn closing(&self, opener: &str) -> String {
        self.get(opener)
            .map(str::to_string)
            .unwrap_or_else(|| format!("end{opener}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for BlockTerminators {
    fn default() -> Self {
        Self::with_defaults(HashMap::new())
    }
}

impl FromIterator<(String, String)> for BlockTerminators {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::with_defaults(iter.into_iter().collect())
    }
}
