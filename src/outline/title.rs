//! Title assembly from first-page blocks.
//!
//! Titles are often set on several consecutive lines (or blocks) in the
//! largest face of the document. The assembler seeds on the first valid
//! first-page block within tolerance of the document-wide maximum size and
//! keeps merging following blocks of the same size; the first block that
//! does not fit ends the title.

use std::collections::HashSet;

use super::classifier::HeadingCandidate;
use super::config::OutlineConfig;
use super::text::{char_len, collapse_whitespace, has_ascii_letter, normalize};

/// A first-page sub-block considered for the title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCandidate {
    /// Sub-block text
    pub text: String,
    /// Average font size
    pub font_size: f32,
}

impl TitleCandidate {
    /// Create a new title candidate.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }

    /// Non-blank, has an ASCII letter, and is not overly long.
    pub fn is_valid(&self, config: &OutlineConfig) -> bool {
        !self.text.trim().is_empty()
            && has_ascii_letter(&self.text)
            && char_len(&self.text) <= config.max_text_len
    }
}

/// The assembled title and the block texts it consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Title {
    /// Final title text, whitespace collapsed
    pub text: String,
    /// Normalized texts of the merged parts (or of the fallback title)
    block_texts: HashSet<String>,
}

impl Title {
    /// Whether a normalized heading text duplicates the title or one of its parts.
    pub fn covers(&self, normalized: &str) -> bool {
        normalized == normalize(&self.text) || self.block_texts.contains(normalized)
    }

    /// Check if no title was found.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Builds the document title.
#[derive(Debug, Clone, Copy)]
pub struct TitleAssembler<'a> {
    config: &'a OutlineConfig,
}

impl<'a> TitleAssembler<'a> {
    /// Create an assembler over the given thresholds.
    pub fn new(config: &'a OutlineConfig) -> Self {
        Self { config }
    }

    /// Assemble the title.
    ///
    /// `candidates` are every first-page sub-block in order, `max_size` the
    /// largest average size of any sub-block in the document, and `headings`
    /// the heading candidates used when no first-page block qualifies.
    pub fn assemble(
        &self,
        candidates: &[TitleCandidate],
        max_size: f32,
        headings: &[HeadingCandidate],
    ) -> Title {
        let parts = self.merge_parts(candidates, max_size);
        if parts.is_empty() {
            return Self::fallback(max_size, headings);
        }

        log::debug!("title merged from {} first-page block(s)", parts.len());
        Title {
            text: collapse_whitespace(&parts.join("\n")),
            block_texts: parts.iter().map(|p| normalize(p)).collect(),
        }
    }

    fn merge_parts<'c>(&self, candidates: &'c [TitleCandidate], max_size: f32) -> Vec<&'c str> {
        let tolerance = self.config.size_tolerance;
        let mut parts = Vec::new();
        let mut running_size = None;

        for candidate in candidates {
            let valid = candidate.is_valid(self.config);
            match running_size {
                None => {
                    if valid && (candidate.font_size - max_size).abs() < tolerance {
                        parts.push(candidate.text.as_str());
                        running_size = Some(candidate.font_size);
                    }
                }
                Some(size) => {
                    if valid && (candidate.font_size - size).abs() < tolerance {
                        parts.push(candidate.text.as_str());
                    } else {
                        break;
                    }
                }
            }
        }
        parts
    }

    /// First heading set exactly at the maximum size.
    fn fallback(max_size: f32, headings: &[HeadingCandidate]) -> Title {
        let text = headings
            .iter()
            .find(|h| h.font_size == max_size)
            .map(|h| collapse_whitespace(&h.text))
            .unwrap_or_default();

        let mut block_texts = HashSet::new();
        if !text.is_empty() {
            log::debug!("title taken from largest heading: {:?}", text);
            block_texts.insert(text.to_lowercase());
        }
        Title { text, block_texts }
    }
}
