//! Token descriptors: display names and explanations used by the token table.
//!
//! Purely presentational. Nothing here influences tokenizing or parsing.

use super::lines::meaningful_lines;
use log::warn;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub display_name: String,
    pub explanation: String,
}

/// Category name -> descriptor, loaded from `CATEGORY|DisplayName|Explanation` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenDescriptors {
    map: HashMap<String, TokenDescriptor>,
}

impl TokenDescriptors {
    pub fn parse(text: &str) -> Self {
        let mut map = HashMap::new();
        for (line_no, line) in meaningful_lines(text) {
            let fields: Vec<&str> = line.split('|').map(str::trim).collect();
            if fields.len() < 3 {
                warn!("token_translation:{line_no}: expected 3 fields, skipping {line:?}");
                continue;
            }
            map.insert(
                fields[0].to_string(),
                TokenDescriptor {
                    display_name: fields[1].to_string(),
                    explanation: fields[2].to_string(),
                },
            );
        }
        Self { map }
    }

    pub fn get(&self, category: &str) -> Option<&TokenDescriptor> {
        self.map.get(category)
    }

    /// `(display_name, explanation)` for `category`; unknown categories echo the raw
    /// name with an empty explanation.
    pub fn describe<'a>(&'a self, category: &'a str) -> (&'a str, &'a str) {
        match self.map.get(category) {
            Some(descriptor) => (&descriptor.display_name, &descriptor.explanation),
            None => (category, ""),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pipe_delimited_rows() {
        let descriptors = TokenDescriptors::parse(
            "# header\nKEYWORD|Keyword|Language reserved word\nIDENT | Identifier | Name|extra\n",
        );
        assert_eq!(descriptors.len(), 2);
        assert_eq!(
            descriptors.describe("KEYWORD"),
            ("Keyword", "Language reserved word")
        );
        // Extra fields are ignored, fields are trimmed
        assert_eq!(descriptors.describe("IDENT"), ("Identifier", "Name"));
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let descriptors = TokenDescriptors::parse("COMMA|Comma\n");
        assert!(descriptors.is_empty());
    }

    #[test]
    fn test_unknown_category_echoes_name() {
        let descriptors = TokenDescriptors::default();
        assert_eq!(descriptors.describe("COLON"), ("COLON", ""));
    }
}
