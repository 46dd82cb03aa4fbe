//! Span/line grouping.
//!
//! A rendered block is split into sub-blocks: maximal runs of consecutive
//! lines that share the same set of (rounded) span sizes. Sub-blocks are the
//! unit every later stage classifies.

use std::collections::HashSet;

use crate::model::{LayoutBlock, LayoutLine};

use super::style::FontStyle;

/// A line as seen by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct LineInfo {
    /// 1-based line number within the page, continuing across blocks
    pub index: usize,
    /// Concatenated span text, trimmed
    pub text: String,
    /// Every span is bold/italic and all spans share one style
    pub bold: bool,
}

/// A run of consecutive lines sharing one size signature.
#[derive(Debug, Clone, PartialEq)]
pub struct SubBlock {
    /// Lines in order
    pub lines: Vec<LineInfo>,
    /// Sorted distinct span sizes, rounded to 0.1pt
    pub size_signature: Vec<f32>,
    /// Mean of every rounded span size, 0 when there are no spans
    pub avg_size: f32,
}

impl SubBlock {
    /// Line texts joined with newlines, trimmed.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether every line is flagged bold.
    pub fn all_bold(&self) -> bool {
        self.lines.iter().all(|l| l.bold)
    }
}

/// Round a font size to one decimal place.
pub fn round_size(size: f32) -> f32 {
    (size * 10.0).round_ties_even() / 10.0
}

/// Sorted set of rounded span sizes of a line.
pub fn size_signature(line: &LayoutLine) -> Vec<f32> {
    let mut sizes: Vec<f32> = line.spans.iter().map(|s| round_size(s.size)).collect();
    sizes.sort_by(|a, b| a.total_cmp(b));
    sizes.dedup();
    sizes
}

/// Bold flag of a line.
///
/// A line mixing styles (e.g. bold and bold-italic, or bold and regular) is
/// never bold. A line without spans has no conflicting style and stays bold.
pub fn line_bold_flag(line: &LayoutLine) -> bool {
    let mut styles = HashSet::new();
    let mut bold = true;
    for span in &line.spans {
        let style = FontStyle::from_font_name(&span.font);
        if !style.is_styled() {
            bold = false;
        }
        styles.insert(style);
    }
    bold && styles.len() <= 1
}

/// Lines collected for the sub-block currently being built.
#[derive(Debug, Default)]
struct SubBlockAccumulator {
    signature: Option<Vec<f32>>,
    lines: Vec<LineInfo>,
    sizes: Vec<f32>,
}

impl SubBlockAccumulator {
    /// Whether a line with this signature must start a new sub-block.
    fn breaks_on(&self, signature: &[f32]) -> bool {
        matches!(&self.signature, Some(current) if current.as_slice() != signature)
    }

    fn push(&mut self, line: &LayoutLine, signature: Vec<f32>, index: usize) {
        self.sizes
            .extend(line.spans.iter().map(|s| round_size(s.size)));
        self.lines.push(LineInfo {
            index,
            text: line.text().trim().to_string(),
            bold: line_bold_flag(line),
        });
        self.signature = Some(signature);
    }

    /// Emit the accumulated sub-block, if any, and reset.
    fn flush(&mut self) -> Option<SubBlock> {
        let acc = std::mem::take(self);
        if acc.lines.is_empty() {
            return None;
        }
        let avg_size = if acc.sizes.is_empty() {
            0.0
        } else {
            acc.sizes.iter().sum::<f32>() / acc.sizes.len() as f32
        };
        Some(SubBlock {
            lines: acc.lines,
            size_signature: acc.signature.unwrap_or_default(),
            avg_size,
        })
    }
}

/// Split one rendered block into sub-blocks.
///
/// `next_line` is the page-wide line counter; it is advanced once per line.
pub fn group_block(block: &LayoutBlock, next_line: &mut usize) -> Vec<SubBlock> {
    let mut sub_blocks = Vec::new();
    let mut acc = SubBlockAccumulator::default();

    for line in &block.lines {
        let signature = size_signature(line);
        if acc.breaks_on(&signature) {
            sub_blocks.extend(acc.flush());
        }
        acc.push(line, signature, *next_line);
        *next_line += 1;
    }
    sub_blocks.extend(acc.flush());

    sub_blocks
}
