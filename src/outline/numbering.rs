//! Numbered heading validation.
//!
//! A numbered heading starts with a dotted numeric prefix ("2", "2.1",
//! "3.4.1.", ...) and capitalizes every significant word on the rest of its
//! first line. The
//! capitalization test separates "2.1 Market Analysis" from numbered body
//! sentences like "2.1 this explains the method".

use regex::Regex;

/// Closed-class words allowed to stay lower-case in a heading.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "but", "or", "nor", "so", "yet", "for", "on", "in", "at", "to", "by",
    "of", "up", "with", "as", "from",
];

/// Matches and interprets dotted numeric prefixes.
#[derive(Debug, Clone)]
pub struct NumberingValidator {
    prefix: Regex,
    word: Regex,
}

impl NumberingValidator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self {
            // Group 1 is the numeric part; an optional trailing dot and any
            // whitespace belong to the prefix but not to its depth.
            prefix: Regex::new(r"^(\d+(?:\.\d+)*)\.?\s*").expect("valid prefix pattern"),
            word: Regex::new(r"\w+").expect("valid word pattern"),
        }
    }

    /// Whether the text is a numbered heading with a capitalized body.
    pub fn is_valid(&self, text: &str) -> bool {
        let Some(prefix) = self.prefix.find(text) else {
            return false;
        };
        // Only the first line after the prefix is checked.
        let body = text[prefix.end()..].lines().next().unwrap_or("");
        self.word
            .find_iter(body)
            .map(|m| m.as_str())
            .filter(|w| !is_stop_word(w))
            .all(|w| w.chars().next().is_some_and(char::is_uppercase))
    }

    /// Number of dots in the numeric prefix, if there is one.
    ///
    /// `"2"` and `"2."` are depth 0, `"2.1"` is depth 1.
    pub fn depth(&self, text: &str) -> Option<usize> {
        self.prefix
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().matches('.').count())
    }

    /// Text with the numeric prefix and following whitespace removed, trimmed.
    pub fn strip_prefix<'t>(&self, text: &'t str) -> &'t str {
        match self.prefix.find(text) {
            Some(m) => text[m.end()..].trim(),
            None => text.trim(),
        }
    }
}

impl Default for NumberingValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive stop-word check.
pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalized_numbered_heading_is_valid() {
        let v = NumberingValidator::new();
        assert!(v.is_valid("2.1 My Great Plan"));
        assert!(v.is_valid("1. Introduction"));
        assert!(v.is_valid("3.4.1 Scope of the Work"));
        assert!(v.is_valid("4 Results and Discussion"));
    }

    #[test]
    fn test_only_first_body_line_is_checked() {
        let v = NumberingValidator::new();
        assert!(v.is_valid("2.1 Market Analysis\nof regional data trends"));
        assert!(!v.is_valid("2.1 market analysis\nOf Regional Data"));
    }

    #[test]
    fn test_lowercase_body_is_invalid() {
        let v = NumberingValidator::new();
        assert!(!v.is_valid("2.1 my plan"));
        assert!(!v.is_valid("1.1 background"));
        assert!(!v.is_valid("2.1 this explains the method"));
    }

    #[test]
    fn test_no_prefix_is_invalid() {
        let v = NumberingValidator::new();
        assert!(!v.is_valid("Introduction"));
        assert!(!v.is_valid("A.1 Appendix"));
        assert!(!v.is_valid(""));
    }

    #[test]
    fn test_digits_in_body_are_not_uppercase() {
        let v = NumberingValidator::new();
        assert!(!v.is_valid("2.1 Results 2024"));
    }

    #[test]
    fn test_bare_number_is_vacuously_valid() {
        let v = NumberingValidator::new();
        assert!(v.is_valid("12"));
        assert!(v.is_valid("3.2 -"));
    }

    #[test]
    fn test_depth() {
        let v = NumberingValidator::new();
        assert_eq!(v.depth("1 Overview"), Some(0));
        assert_eq!(v.depth("1. Introduction"), Some(0));
        assert_eq!(v.depth("2.1 Plan"), Some(1));
        assert_eq!(v.depth("2.1. Plan"), Some(1));
        assert_eq!(v.depth("3.4.1 Scope"), Some(2));
        assert_eq!(v.depth("Scope"), None);
    }

    #[test]
    fn test_strip_prefix() {
        let v = NumberingValidator::new();
        assert_eq!(v.strip_prefix("1. Introduction"), "Introduction");
        assert_eq!(v.strip_prefix("2.1   Market Analysis "), "Market Analysis");
        assert_eq!(v.strip_prefix("No Prefix"), "No Prefix");
    }

    #[test]
    fn test_stop_words_case_insensitive() {
        assert!(is_stop_word("The"));
        assert!(is_stop_word("of"));
        assert!(!is_stop_word("my"));
    }
}
