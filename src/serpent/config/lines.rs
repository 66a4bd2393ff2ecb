//! Line filtering shared by every configuration format.

/// Trimmed, meaningful lines of a configuration source with their 1-based line numbers.
///
/// Blank lines and lines starting with `#` are dropped.
pub fn meaningful_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Splits `left = right` around the first `=`, trimming both sides.
///
/// Returns `None` when there is no `=` or either side is empty.
pub fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let (left, right) = line.split_once('=')?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blanks_are_dropped() {
        let text = "# header\n\n  first  \n   # indented comment\nsecond\n";
        let lines: Vec<_> = meaningful_lines(text).collect();
        assert_eq!(lines, vec![(3, "first"), (5, "second")]);
    }

    #[test]
    fn test_split_on_first_equals_only() {
        assert_eq!(split_assignment("ASSIGN = ="), Some(("ASSIGN", "=")));
        assert_eq!(split_assignment("EQEQ===="), Some(("EQEQ", "===")));
        assert_eq!(split_assignment("if=endif"), Some(("if", "endif")));
    }

    #[test]
    fn test_split_rejects_missing_sides() {
        assert_eq!(split_assignment("no equals here"), None);
        assert_eq!(split_assignment(" = endif"), None);
        assert_eq!(split_assignment("if = "), None);
    }
}
