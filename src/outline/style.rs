//! Font-name style detection.

const BOLD_KEYWORDS: &[&str] = &["bold", "black", "medium", "demi"];
const ITALIC_KEYWORDS: &[&str] = &["italic", "oblique"];

/// Emphasis of a span, derived from its font name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle {
    /// Font name contains a bold-weight keyword
    pub bold: bool,
    /// Font name contains an italic keyword
    pub italic: bool,
}

impl FontStyle {
    /// Classify a font name (e.g., "Helvetica-BoldOblique").
    pub fn from_font_name(font_name: &str) -> Self {
        let name = font_name.to_lowercase();
        Self {
            bold: BOLD_KEYWORDS.iter().any(|kw| name.contains(kw)),
            italic: ITALIC_KEYWORDS.iter().any(|kw| name.contains(kw)),
        }
    }

    /// Bold or italic.
    pub fn is_styled(self) -> bool {
        self.bold || self.italic
    }
}

/// Whether every font name is bold or italic. True for no fonts at all.
pub fn all_styled<'a, I>(font_names: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    font_names
        .into_iter()
        .all(|f| FontStyle::from_font_name(f).is_styled())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_style_detection() {
        let style = FontStyle::from_font_name("Helvetica-Bold");
        assert!(style.bold);
        assert!(!style.italic);

        let style = FontStyle::from_font_name("Helvetica-Oblique");
        assert!(!style.bold);
        assert!(style.italic);

        let style = FontStyle::from_font_name("Arial-BoldItalicMT");
        assert!(style.bold && style.italic);

        assert!(FontStyle::from_font_name("Roboto-Medium").bold);
        assert!(FontStyle::from_font_name("Futura-DemiBold").bold);
        assert!(FontStyle::from_font_name("Lato-Black").bold);
        assert!(!FontStyle::from_font_name("TimesNewRomanPSMT").is_styled());
    }

    #[test]
    fn test_all_styled() {
        assert!(all_styled(["Arial-Bold", "Arial-Italic"]));
        assert!(!all_styled(["Arial-Bold", "Arial"]));
        assert!(all_styled(std::iter::empty::<&str>()));
    }
}
