//! Layout dump source.
//!
//! Reads the JSON form of [`LayoutDocument`] written by `pdfoutline layout`
//! or by any external renderer emitting the same shape.

use crate::error::Result;
use crate::model::LayoutDocument;
use crate::parser::ParseOptions;
use std::fs;
use std::path::Path;

use super::DocumentSource;

/// Deserializes layout dumps.
#[derive(Debug, Clone, Default)]
pub struct LayoutJsonSource {
    _private: (),
}

impl LayoutJsonSource {
    /// Create a new layout dump source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentSource for LayoutJsonSource {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "layout-json"
    }

    fn load(&self, path: &Path, options: &ParseOptions) -> Result<LayoutDocument> {
        let bytes = fs::read(path)?;
        self.load_bytes(&bytes, options)
    }

    /// Page selection applies to the dump's own page numbers.
    fn load_bytes(&self, bytes: &[u8], options: &ParseOptions) -> Result<LayoutDocument> {
        let mut doc: LayoutDocument = serde_json::from_slice(bytes)?;
        doc.pages.retain(|p| options.pages.includes(p.number));
        Ok(doc)
    }
}
