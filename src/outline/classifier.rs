//! Heading candidate classification.

use std::collections::HashSet;

use super::config::OutlineConfig;
use super::footer::FooterSet;
use super::grouper::SubBlock;
use super::numbering::NumberingValidator;
use super::text::{char_len, has_ascii_letter, normalize};

/// A sub-block accepted as a heading, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Sub-block text (lines joined with newlines)
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Average font size of the sub-block
    pub font_size: f32,
    /// Text passes numbering validation
    pub is_numbered: bool,
}

/// Decides whether a sub-block is a heading candidate.
///
/// Pure: the verdict depends only on the arguments.
#[derive(Debug, Clone, Copy)]
pub struct HeadingClassifier<'a> {
    config: &'a OutlineConfig,
    numbering: &'a NumberingValidator,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a classifier over the given thresholds.
    pub fn new(config: &'a OutlineConfig, numbering: &'a NumberingValidator) -> Self {
        Self { config, numbering }
    }

    /// Whether the sub-block is a heading candidate.
    ///
    /// `seen` holds normalized texts of candidates accepted earlier in the
    /// document; repeats are rejected.
    pub fn is_heading(&self, block: &SubBlock, footers: &FooterSet, seen: &HashSet<String>) -> bool {
        let text = block.text();
        self.is_heading_text(&text, block, footers, seen)
    }

    /// Same as [`is_heading`](Self::is_heading) with the block text already built.
    pub fn is_heading_text(
        &self,
        text: &str,
        block: &SubBlock,
        footers: &FooterSet,
        seen: &HashSet<String>,
    ) -> bool {
        if text.is_empty() {
            return false;
        }
        let normalized = normalize(text);
        if footers.contains(&normalized) || seen.contains(&normalized) {
            return false;
        }

        let line_count = block.line_count();
        if line_count > self.config.max_heading_lines || char_len(text) > self.config.max_text_len
        {
            return false;
        }
        if !has_ascii_letter(text) {
            return false;
        }

        if line_count >= 2 {
            // Stacks of short fragments are table cells or decoration.
            let all_short = block
                .lines
                .iter()
                .all(|l| char_len(&l.text) <= self.config.short_line_len);
            if all_short {
                return false;
            }
            if block.lines.iter().any(|l| !has_ascii_letter(&l.text)) {
                return false;
            }
        }

        block.all_bold()
            || (line_count <= self.config.max_numbered_lines && self.numbering.is_valid(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::grouper::LineInfo;

    fn sub_block(lines: &[(&str, bool)]) -> SubBlock {
        SubBlock {
            lines: lines
                .iter()
                .enumerate()
                .map(|(i, (text, bold))| LineInfo {
                    index: i + 1,
                    text: text.to_string(),
                    bold: *bold,
                })
                .collect(),
            size_signature: vec![12.0],
            avg_size: 12.0,
        }
    }

    fn verdict(block: &SubBlock) -> bool {
        let config = OutlineConfig::default();
        let numbering = NumberingValidator::new();
        HeadingClassifier::new(&config, &numbering).is_heading(
            block,
            &FooterSet::new(),
            &HashSet::new(),
        )
    }

    #[test]
    fn test_bold_block_is_heading() {
        assert!(verdict(&sub_block(&[("Executive Summary", true)])));
        assert!(verdict(&sub_block(&[
            ("Guidelines for the Design", true),
            ("of Public Infrastructure", true)
        ])));
    }

    #[test]
    fn test_numbered_block_is_heading_without_bold() {
        assert!(verdict(&sub_block(&[("2.1 My Great Plan", false)])));
        assert!(!verdict(&sub_block(&[("2.1 my plan", false)])));
    }

    #[test]
    fn test_plain_block_is_not_heading() {
        assert!(!verdict(&sub_block(&[("Some ordinary sentence.", false)])));
    }

    #[test]
    fn test_partially_bold_block_is_not_heading() {
        assert!(!verdict(&sub_block(&[
            ("Bold First Line Here", true),
            ("regular second line here", false)
        ])));
    }

    #[test]
    fn test_rejects_empty_and_letterless() {
        assert!(!verdict(&sub_block(&[("", true)])));
        assert!(!verdict(&sub_block(&[("2024 - 2025", true)])));
    }

    #[test]
    fn test_rejects_too_many_lines() {
        assert!(!verdict(&sub_block(&[
            ("A Fairly Long Bold Line", true),
            ("Another Long Bold Line", true),
            ("Third Long Bold Line Here", true),
            ("Fourth Long Bold Line Too", true)
        ])));
    }

    #[test]
    fn test_rejects_too_long_text() {
        let long = "Word ".repeat(70);
        assert!(!verdict(&sub_block(&[(long.trim(), true)])));
    }

    #[test]
    fn test_rejects_short_line_stacks() {
        assert!(!verdict(&sub_block(&[("Name", true), ("Address", true)])));
        // a single short line is fine
        assert!(verdict(&sub_block(&[("Name", true)])));
    }

    #[test]
    fn test_rejects_multiline_with_letterless_line() {
        assert!(!verdict(&sub_block(&[
            ("Quarterly Revenue Figures", true),
            ("1,234,567.00", true)
        ])));
    }

    #[test]
    fn test_numbered_three_liner_needs_bold() {
        let lines = [
            ("3.1 Overview Of The Regional", false),
            ("Planning Framework And Its", false),
            ("Governance Structures Today", false),
        ];
        assert!(!verdict(&sub_block(&lines)));
    }

    #[test]
    fn test_rejects_footer_and_seen_texts() {
        let config = OutlineConfig::default();
        let numbering = NumberingValidator::new();
        let classifier = HeadingClassifier::new(&config, &numbering);
        let block = sub_block(&[("Executive  Summary", true)]);

        let mut seen = HashSet::new();
        seen.insert("executive summary".to_string());
        assert!(!classifier.is_heading(&block, &FooterSet::new(), &seen));
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let config = OutlineConfig::default().with_short_line_len(3);
        let numbering = NumberingValidator::new();
        let classifier = HeadingClassifier::new(&config, &numbering);
        let block = sub_block(&[("Name", true), ("Address", true)]);
        assert!(classifier.is_heading(&block, &FooterSet::new(), &HashSet::new()));
    }
}
