//! Markdown table of contents.

use crate::model::{ExtractionResult, HeadingLevel};

/// Render a result as a Markdown table of contents.
///
/// The title becomes a level-1 heading; each outline entry becomes a bullet
/// indented by its level and suffixed with its page number.
pub fn to_markdown(result: &ExtractionResult) -> String {
    let mut output = String::new();

    if !result.title.is_empty() {
        output.push_str("# ");
        output.push_str(&escape(&result.title));
        output.push_str("\n\n");
    }

    for entry in &result.outline {
        output.push_str(indent(entry.level));
        output.push_str("- ");
        output.push_str(&escape(&entry.text));
        output.push_str(&format!(" (p. {})\n", entry.page));
    }

    output
}

fn indent(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "",
        HeadingLevel::H2 => "  ",
        HeadingLevel::H3 => "    ",
    }
}

/// Escape inline Markdown syntax and fold line breaks.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '*' | '_' | '`' | '[' | ']' | '<' | '>' => {
                out.push('\\');
                out.push(c);
            }
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}
