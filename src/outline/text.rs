//! Text normalization shared by the pipeline stages.

/// Collapse whitespace runs to single spaces, trim, and lower-case.
///
/// Two texts are "the same heading" iff their normalized forms are equal.
pub fn normalize(text: &str) -> String {
    collapse_whitespace(text).to_lowercase()
}

/// Collapse whitespace runs (including newlines) to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the text contains at least one ASCII letter.
pub fn has_ascii_letter(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

/// Length in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
