//! Rendered page layout: pages of blocks of lines of styled spans.
//!
//! This is the boundary between a renderer (the lopdf content-stream walker,
//! or any external tool emitting a layout dump) and the outline pipeline.
//! Order is significant everywhere: blocks top to bottom, lines in reading
//! order within a block, spans left to right within a line.

use serde::{Deserialize, Serialize};

/// A rendered document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Pages in document order
    pub pages: Vec<LayoutPage>,
}

impl LayoutDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page.
    pub fn add_page(&mut self, page: LayoutPage) {
        self.pages.push(page);
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of spans across all pages.
    pub fn span_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.blocks)
            .flat_map(|b| &b.lines)
            .map(|l| l.spans.len())
            .sum()
    }
}

/// A single rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// Blocks in rendering order
    #[serde(default)]
    pub blocks: Vec<LayoutBlock>,
}

impl LayoutPage {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Append a block.
    pub fn add_block(&mut self, block: LayoutBlock) {
        self.blocks.push(block);
    }

    /// Text blocks in order; image blocks are skipped.
    pub fn text_blocks(&self) -> impl DoubleEndedIterator<Item = &LayoutBlock> {
        self.blocks.iter().filter(|b| b.is_text())
    }
}

/// Kind of a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Text block
    #[default]
    Text,
    /// Image block (never classified)
    Image,
}

/// A rendered block: a group of lines the renderer kept together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    /// Block kind
    #[serde(default)]
    pub kind: BlockKind,
    /// Lines in reading order
    #[serde(default)]
    pub lines: Vec<LayoutLine>,
}

impl LayoutBlock {
    /// Create a text block from lines.
    pub fn text(lines: Vec<LayoutLine>) -> Self {
        Self {
            kind: BlockKind::Text,
            lines,
        }
    }

    /// Create an image block.
    pub fn image() -> Self {
        Self {
            kind: BlockKind::Image,
            lines: Vec::new(),
        }
    }

    /// Whether this is a text block.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }

    /// All spans of the block, in order.
    pub fn spans(&self) -> impl Iterator<Item = &LayoutSpan> {
        self.lines.iter().flat_map(|l| &l.spans)
    }
}

/// A rendered line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutLine {
    /// Spans left to right
    #[serde(default)]
    pub spans: Vec<LayoutSpan>,
}

impl LayoutLine {
    /// Create a line from spans.
    pub fn new(spans: Vec<LayoutSpan>) -> Self {
        Self { spans }
    }

    /// Concatenated span text, untrimmed.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A run of text in a single font at a single size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpan {
    /// Text content
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,
    /// Font size in points
    pub size: f32,
}

impl LayoutSpan {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
        }
    }
}
