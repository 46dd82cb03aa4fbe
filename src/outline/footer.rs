//! Footer detection.
//!
//! Running footers and decorative trailers are usually set entirely in a
//! bold or italic face at the bottom of the page. The detector walks the
//! page bottom-up and collects such blocks until the first block that is
//! empty or contains a regular-weight span.

use std::collections::HashSet;

use crate::model::{LayoutBlock, LayoutPage};

use super::style::all_styled;
use super::text::normalize;

/// Normalized texts excluded from heading candidacy on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FooterSet {
    texts: HashSet<String>,
}

impl FooterSet {
    /// Create an empty footer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect the trailing footer run of a page.
    pub fn detect(page: &LayoutPage) -> Self {
        let mut footers = Self::new();
        for block in page.text_blocks().rev() {
            let text = block_text(block);
            let normalized = normalize(&text);
            let styled = all_styled(block.spans().map(|s| s.font.as_str()));
            if normalized.is_empty() || !styled {
                break;
            }
            footers.texts.insert(normalized);
        }

        if !footers.is_empty() {
            log::debug!(
                "page {}: {} footer block(s) excluded",
                page.number,
                footers.len()
            );
        }
        footers
    }

    /// Check a normalized text against the set.
    pub fn contains(&self, normalized: &str) -> bool {
        self.texts.contains(normalized)
    }

    /// Number of footer texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Check if no footer was found.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// All span text of a block, concatenated without separators.
fn block_text(block: &LayoutBlock) -> String {
    block.spans().map(|s| s.text.as_str()).collect()
}
