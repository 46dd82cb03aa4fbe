//! PDF document source.

use crate::error::Result;
use crate::model::LayoutDocument;
use crate::parser::{ParseOptions, PdfParser};
use std::path::Path;

use super::DocumentSource;

/// Renders PDF files through [`PdfParser`].
#[derive(Debug, Clone, Default)]
pub struct PdfSource {
    _private: (),
}

impl PdfSource {
    /// Create a new PDF source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentSource for PdfSource {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn load(&self, path: &Path, options: &ParseOptions) -> Result<LayoutDocument> {
        PdfParser::open_with_options(path, options.clone())?.parse()
    }

    fn load_bytes(&self, bytes: &[u8], options: &ParseOptions) -> Result<LayoutDocument> {
        PdfParser::from_bytes_with_options(bytes, options.clone())?.parse()
    }
}
