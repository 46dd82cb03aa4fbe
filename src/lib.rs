//! # pdfoutline
//!
//! Title and H1–H3 outline inference for PDF documents.
//!
//! The outline comes from typography alone: a PDF is rendered into spans of
//! text carrying their font name and size, spans are grouped into
//! sub-blocks, and a set of heuristics (boldness, numbering, font-size
//! tiers, repeated footers) picks the title and the headings.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = extract_file("document.pdf")?;
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Output
//!
//! ```json
//! {
//!   "title": "Annual Report 2024",
//!   "outline": [
//!     { "level": "H1", "text": "Introduction", "page": 2 }
//!   ]
//! }
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: lopdf content-stream walker producing a [`LayoutDocument`]
//! - [`source`]: pluggable inputs (PDF, layout dumps)
//! - [`outline`]: the inference pipeline
//! - [`render`]: JSON and Markdown output
//! - [`batch`]: directory-to-directory processing on rayon

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{BatchOptions, BatchReport, DocumentOutcome};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    ExtractionResult, HeadingLevel, LayoutBlock, LayoutDocument, LayoutLine, LayoutPage,
    LayoutSpan, OutlineEntry,
};
pub use outline::{OutlineConfig, OutlineExtractor};
pub use parser::{ErrorMode, PageSelection, ParseOptions, PdfParser};
pub use render::JsonFormat;
pub use source::{DocumentSource, LayoutJsonSource, PdfSource, SourceRegistry};

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Render a PDF file into its span layout.
///
/// # Example
///
/// ```no_run
/// let layout = pdfoutline::parse_file("document.pdf").unwrap();
/// println!("Pages: {}", layout.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<LayoutDocument> {
    PdfParser::open(path)?.parse()
}

/// Extract the title and outline of a PDF file with default settings.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_file;
///
/// let result = extract_file("document.pdf").unwrap();
/// for entry in &result.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    PdfOutline::new().extract(path)
}

/// Extract the title and outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_file_with_options, OutlineConfig, ParseOptions};
///
/// let config = OutlineConfig::new().with_size_tolerance(1.0);
/// let result =
///     extract_file_with_options("document.pdf", ParseOptions::new().lenient(), config).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
    config: OutlineConfig,
) -> Result<ExtractionResult> {
    PdfOutline::new()
        .with_parse_options(options)
        .with_config(config)
        .extract(path)
}

/// Extract the title and outline of a PDF held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<ExtractionResult> {
    PdfOutline::new().extract_bytes(data)
}

/// Extract the title and outline of a PDF read from a reader.
pub fn extract_reader<R: Read>(mut reader: R) -> Result<ExtractionResult> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    extract_bytes(&data)
}

/// Run the outline pipeline over an existing layout with default thresholds.
///
/// Never fails: malformed typography just yields fewer headings.
pub fn extract_layout(layout: &LayoutDocument) -> ExtractionResult {
    OutlineExtractor::new().extract(layout)
}

/// Builder for outline extraction.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{OutlineConfig, PageSelection, PdfOutline};
///
/// let result = PdfOutline::new()
///     .lenient()
///     .with_pages(PageSelection::parse("1-20")?)
///     .with_config(OutlineConfig::new().with_max_text_len(200))
///     .extract("document.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfOutline {
    parse_options: ParseOptions,
    config: OutlineConfig,
    registry: SourceRegistry,
}

impl PdfOutline {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set heuristic thresholds.
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        self.config = config;
        self
    }

    /// Also accept layout dumps (`.json`) as input.
    pub fn with_layout_dumps(mut self) -> Self {
        self.registry.register(Arc::new(LayoutJsonSource::new()));
        self
    }

    /// Load a file through the source registry and extract its outline.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionResult> {
        let extractor = OutlineExtractor::with_config(self.config.clone())?;
        let layout = self.registry.load(path.as_ref(), &self.parse_options)?;
        Ok(extractor.extract(&layout))
    }

    /// Extract the outline of a PDF held in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<ExtractionResult> {
        let extractor = OutlineExtractor::with_config(self.config.clone())?;
        let parser = PdfParser::from_bytes_with_options(data, self.parse_options.clone())?;
        let layout = parser.parse()?;
        Ok(extractor.extract(&layout))
    }
}
