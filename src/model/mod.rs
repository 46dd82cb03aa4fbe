//! Document model types.
//!
//! Two halves: the rendered layout that feeds the outline pipeline, and the
//! title/outline result it produces. Both are plain serde data with no
//! behavior beyond small accessors.

mod layout;
mod outline;

pub use layout::{BlockKind, LayoutBlock, LayoutDocument, LayoutLine, LayoutPage, LayoutSpan};
pub use outline::{ExtractionResult, HeadingLevel, OutlineEntry};
