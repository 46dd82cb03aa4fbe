//! Title and outline inference from font metadata.
//!
//! The pipeline runs once per document, strictly in page and block order:
//!
//! 1. each text block is split into [`SubBlock`]s of equal size signature;
//! 2. each page's trailing bold/italic run becomes its [`FooterSet`];
//! 3. [`HeadingClassifier`] picks heading candidates, dropping repeats;
//! 4. [`TitleAssembler`] merges the largest first-page blocks into the title;
//! 5. [`LevelAssigner`] maps candidates to H1–H3 and [`build_outline`]
//!    produces the sorted entries.
//!
//! All running state lives in a per-run context, so one
//! [`OutlineExtractor`] can serve many documents, concurrently if needed.
//!
//! # Example
//!
//! ```
//! use pdfoutline::model::{LayoutBlock, LayoutDocument, LayoutLine, LayoutPage, LayoutSpan};
//! use pdfoutline::outline::OutlineExtractor;
//!
//! let mut page = LayoutPage::new(1);
//! page.add_block(LayoutBlock::text(vec![LayoutLine::new(vec![LayoutSpan::new(
//!     "Annual Report 2024",
//!     "Helvetica-Bold",
//!     24.0,
//! )])]));
//! let mut doc = LayoutDocument::new();
//! doc.add_page(page);
//!
//! let result = OutlineExtractor::new().extract(&doc);
//! assert_eq!(result.title, "Annual Report 2024");
//! assert!(result.outline.is_empty());
//! ```

mod classifier;
mod config;
mod footer;
mod grouper;
mod levels;
mod numbering;
mod style;
mod text;
mod title;

pub use classifier::{HeadingCandidate, HeadingClassifier};
pub use config::OutlineConfig;
pub use footer::FooterSet;
pub use grouper::{group_block, line_bold_flag, round_size, size_signature, LineInfo, SubBlock};
pub use levels::{build_outline, LevelAssigner};
pub use numbering::{is_stop_word, NumberingValidator, STOP_WORDS};
pub use style::FontStyle;
pub use text::normalize;
pub use title::{Title, TitleAssembler, TitleCandidate};

use std::collections::HashSet;

use crate::error::Result;
use crate::model::{ExtractionResult, LayoutDocument, LayoutPage};

/// Largest sub-block size before any block has been seen.
const NO_SIZE: f32 = -1.0;

/// Infers a title and outline from a rendered layout.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    config: OutlineConfig,
    numbering: NumberingValidator,
}

impl OutlineExtractor {
    /// Create an extractor with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom thresholds.
    pub fn with_config(config: OutlineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            numbering: NumberingValidator::new(),
        })
    }

    /// Thresholds in use.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Run the pipeline over one document.
    pub fn extract(&self, doc: &LayoutDocument) -> ExtractionResult {
        let classifier = HeadingClassifier::new(&self.config, &self.numbering);
        let mut run = RunContext::new();

        for (i, page) in doc.pages.iter().enumerate() {
            run.scan_page(page, i == 0, &classifier, &self.numbering);
        }

        let title = TitleAssembler::new(&self.config).assemble(
            &run.title_candidates,
            run.max_size,
            &run.headings,
        );
        let levels = LevelAssigner::new(&run.headings, self.config.tier_count, &self.numbering);
        let outline = build_outline(&run.headings, &title, &levels, &self.numbering);

        log::debug!(
            "{} heading candidate(s), {} outline entr(ies), title {:?}",
            run.headings.len(),
            outline.len(),
            title.text
        );

        ExtractionResult {
            title: title.text,
            outline,
        }
    }
}

/// Mutable state of a single document run.
#[derive(Debug)]
struct RunContext {
    /// Normalized texts of accepted candidates
    seen: HashSet<String>,
    /// Largest average size of any sub-block so far
    max_size: f32,
    headings: Vec<HeadingCandidate>,
    title_candidates: Vec<TitleCandidate>,
}

impl RunContext {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            max_size: NO_SIZE,
            headings: Vec::new(),
            title_candidates: Vec::new(),
        }
    }

    fn scan_page(
        &mut self,
        page: &LayoutPage,
        first_page: bool,
        classifier: &HeadingClassifier<'_>,
        numbering: &NumberingValidator,
    ) {
        let footers = FooterSet::detect(page);
        let mut next_line = 1;

        for block in page.text_blocks() {
            for sub in group_block(block, &mut next_line) {
                let text = sub.text();
                if sub.avg_size > self.max_size {
                    self.max_size = sub.avg_size;
                }

                if classifier.is_heading_text(&text, &sub, &footers, &self.seen) {
                    log::debug!("page {}: heading candidate {:?}", page.number, text);
                    self.seen.insert(normalize(&text));
                    self.headings.push(HeadingCandidate {
                        is_numbered: numbering.is_valid(&text),
                        text: text.clone(),
                        page: page.number,
                        font_size: sub.avg_size,
                    });
                }

                if first_page {
                    self.title_candidates.push(TitleCandidate::new(text, sub.avg_size));
                }
            }
        }
    }
}
