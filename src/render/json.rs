//! JSON rendering of extraction results.

use crate::error::{Error, Result};
use crate::model::ExtractionResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a result as `{"title": ..., "outline": [...]}`.
///
/// Non-ASCII text is written as UTF-8, not escaped.
pub fn to_json(result: &ExtractionResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
