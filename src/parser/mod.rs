//! PDF rendering into span-level layouts.

pub mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{LopdfBackend, PdfBackend};
pub use layout::LayoutExtractor;
pub use options::{ErrorMode, PageSelection, ParseOptions};
pub use pdf_parser::PdfParser;
