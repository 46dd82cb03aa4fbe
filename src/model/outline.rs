//! Outline result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading depth. Only three levels are ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Sort rank: H1 = 1, H2 = 2, H3 = 3.
    pub fn rank(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Level for a 0-based tier or numbering depth; anything deeper is H3.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Label as written to JSON ("H1", "H2", "H3").
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the inferred table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Display text (numeric prefix removed for numbered headings)
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and outline inferred for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Document title, empty when no candidate exists
    pub title: String,
    /// Entries sorted by (page, level rank)
    pub outline: Vec<OutlineEntry>,
}

impl ExtractionResult {
    /// Check if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }

    /// Number of entries at the given level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|e| e.level == level).count()
    }
}
