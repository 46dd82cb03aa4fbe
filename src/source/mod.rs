//! Document sources.
//!
//! A [`DocumentSource`] turns an input file into a [`LayoutDocument`]. The
//! [`SourceRegistry`] maps file extensions to sources so the batch runner and
//! the CLI can dispatch on the input path.
//!
//! # Example
//!
//! ```no_run
//! use pdfoutline::parser::ParseOptions;
//! use pdfoutline::source::SourceRegistry;
//! use std::path::Path;
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let registry = SourceRegistry::with_defaults();
//!     let layout = registry.load(Path::new("document.pdf"), &ParseOptions::default())?;
//!     println!("{} page(s)", layout.page_count());
//!     Ok(())
//! }
//! ```

mod layout_json;
mod pdf;

pub use layout_json::LayoutJsonSource;
pub use pdf::PdfSource;

use crate::error::{Error, Result};
use crate::model::LayoutDocument;
use crate::parser::ParseOptions;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for layout sources.
///
/// Implement this trait to feed the outline pipeline from a new input format.
pub trait DocumentSource: Send + Sync {
    /// Supported file extensions, lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Name of this source.
    fn name(&self) -> &str;

    /// Load the layout of a file.
    fn load(&self, path: &Path, options: &ParseOptions) -> Result<LayoutDocument>;

    /// Load the layout from bytes.
    fn load_bytes(&self, bytes: &[u8], options: &ParseOptions) -> Result<LayoutDocument>;

    /// Check if this source handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry of document sources, keyed by extension and by name.
#[derive(Clone)]
pub struct SourceRegistry {
    by_extension: HashMap<String, Arc<dyn DocumentSource>>,
    by_name: HashMap<String, Arc<dyn DocumentSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the PDF source only.
    ///
    /// Layout dumps share the `.json` extension with outline results, so
    /// [`LayoutJsonSource`] must be registered explicitly.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfSource::new()));
        registry
    }

    /// Register a source for all its extensions.
    ///
    /// A later registration replaces an earlier one for the same extension.
    pub fn register(&mut self, source: Arc<dyn DocumentSource>) {
        for ext in source.supported_extensions() {
            self.by_extension.insert(ext.to_lowercase(), source.clone());
        }
        self.by_name.insert(source.name().to_lowercase(), source);
    }

    /// Get a source by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentSource>> {
        self.by_extension.get(&ext.to_lowercase()).cloned()
    }

    /// Get a source by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_lowercase())
    }

    /// Check if a path has a supported extension.
    pub fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.supports(e))
    }

    /// All supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.by_extension.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Load a file with the source registered for its extension.
    pub fn load(&self, path: &Path, options: &ParseOptions) -> Result<LayoutDocument> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedSource(path.display().to_string()))?;

        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedSource(ext.to_string()))?;

        log::debug!("loading {} with the {} source", path.display(), source.name());
        source.load(path, options)
    }

    /// Load bytes, picking the source by extension.
    pub fn load_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ParseOptions,
    ) -> Result<LayoutDocument> {
        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedSource(ext.to_string()))?;

        source.load_bytes(bytes, options)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}
