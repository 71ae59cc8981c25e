//! Whitespace normalization for text lines and table cells.

use regex::Regex;

/// Normalizes strings so formatting noise never shows up as a difference.
///
/// Each comparer owns its own `Normalizer` value, constructed once per
/// comparison run. The compiled pattern lives here rather than in a
/// module-level static so no state is shared across runs.
#[derive(Debug, Clone)]
pub struct Normalizer {
    whitespace: Regex,
}

impl Normalizer {
    /// Create a normalizer with a freshly compiled whitespace pattern.
    pub fn new() -> Self {
        Self {
            // \s+ is valid by construction
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Normalize a text string: trim ends, collapse internal whitespace
    /// runs to a single space. Case is preserved.
    pub fn text(&self, s: &str) -> String {
        let trimmed = s.trim();
        self.whitespace.replace_all(trimmed, " ").into_owned()
    }

    /// Normalize a table cell. Same rules as [`Normalizer::text`]; the
    /// extraction layer has already stringified non-text cell values.
    pub fn cell(&self, s: &str) -> String {
        self.text(s)
    }

    /// Normalize a whole row of cells.
    pub fn row(&self, row: &[String]) -> Vec<String> {
        row.iter().map(|c| self.cell(c)).collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_collapses() {
        let n = Normalizer::new();
        assert_eq!(n.text("  hello   world \t x\n"), "hello world x");
        assert_eq!(n.text(""), "");
        assert_eq!(n.text("   "), "");
    }

    #[test]
    fn test_case_preserved() {
        let n = Normalizer::new();
        assert_eq!(n.text("Hello WORLD"), "Hello WORLD");
    }

    #[test]
    fn test_row_normalization() {
        let n = Normalizer::new();
        let row = vec![" a ".to_string(), "b\tc".to_string()];
        assert_eq!(n.row(&row), vec!["a".to_string(), "b c".to_string()]);
    }
}
