//! PDF document parser.

use std::io::Read;
use std::path::Path;

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::{LayoutDocument, LayoutPage};

use super::backend::{LopdfBackend, PdfBackend};
use super::layout::LayoutExtractor;
use super::options::{ErrorMode, ParseOptions};

/// Renders a PDF into a [`LayoutDocument`].
pub struct PdfParser<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ParseOptions,
}

impl PdfParser<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Reject non-PDF input before handing it to lopdf
        detect_format_from_path(path)?;

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_reader(reader)?;
        Ok(Self::with_backend(backend, options))
    }
}

impl<B: PdfBackend> PdfParser<B> {
    /// Wrap an already-loaded backend.
    pub fn with_backend(backend: B, options: ParseOptions) -> Self {
        Self { backend, options }
    }

    /// Options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Render every selected page.
    ///
    /// In strict mode the first page error aborts the parse; in lenient mode
    /// the page is logged and kept empty so page numbering stays intact.
    pub fn parse(&self) -> Result<LayoutDocument> {
        if self.backend.is_encrypted() {
            log::warn!("document is encrypted; text may not decode");
        }

        let extractor = LayoutExtractor::new(&self.backend);
        let mut document = LayoutDocument::new();

        for (number, page_id) in self.backend.pages() {
            if !self.options.pages.includes(number) {
                continue;
            }

            match extractor.extract_page(number, page_id) {
                Ok(page) => document.add_page(page),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to extract page {}: {}", number, e);
                    document.add_page(LayoutPage::new(number));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(document)
    }

    /// Render a single page (1-indexed).
    pub fn parse_page(&self, number: u32) -> Result<LayoutPage> {
        let pages = self.backend.pages();
        let page_id = pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, pages.len() as u32))?;
        LayoutExtractor::new(&self.backend).extract_page(number, *page_id)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.backend.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.backend.version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::backend::{BackendFontInfo, ContentOp, PageId, PdfValue};
    use crate::parser::options::PageSelection;
    use std::collections::BTreeMap;

    /// Three one-line pages; page 2 has a broken content stream.
    struct ThreePages;

    impl PdfBackend for ThreePages {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (10, 0)), (2, (20, 0)), (3, (30, 0))])
        }

        fn page_fonts(&self, _page: PageId) -> Result<Vec<BackendFontInfo>> {
            Ok(vec![BackendFontInfo {
                name: b"F1".to_vec(),
                base_font: "Times-Roman".to_string(),
            }])
        }

        fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
            match page {
                (20, 0) => Err(Error::PdfParse("bad stream".to_string())),
                (id, _) => Ok(format!("Page {}", id / 10).into_bytes()),
            }
        }

        fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
            Ok(vec![
                ContentOp::new("BT", vec![]),
                ContentOp::new(
                    "Tf",
                    vec![PdfValue::Name(b"F1".to_vec()), PdfValue::Integer(11)],
                ),
                ContentOp::new("Tj", vec![PdfValue::Str(data.to_vec())]),
                ContentOp::new("ET", vec![]),
            ])
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            String::from_utf8_lossy(bytes).into_owned()
        }

        fn version(&self) -> String {
            "1.4".to_string()
        }
    }

    #[test]
    fn test_strict_mode_fails_on_broken_page() {
        let parser = PdfParser::with_backend(ThreePages, ParseOptions::default());
        assert!(matches!(parser.parse(), Err(Error::PdfParse(_))));
    }

    #[test]
    fn test_lenient_mode_keeps_empty_page() {
        let parser = PdfParser::with_backend(ThreePages, ParseOptions::new().lenient());
        let doc = parser.parse().unwrap();

        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.pages[0].blocks[0].lines[0].text(), "Page 1");
        assert_eq!(doc.pages[1].number, 2);
        assert!(doc.pages[1].blocks.is_empty());
        assert_eq!(doc.pages[2].blocks[0].lines[0].spans[0].font, "Times-Roman");
    }

    #[test]
    fn test_page_selection_keeps_real_numbers() {
        let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![3]));
        let doc = PdfParser::with_backend(ThreePages, options).parse().unwrap();

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].number, 3);
    }

    #[test]
    fn test_parse_page_out_of_range() {
        let parser = PdfParser::with_backend(ThreePages, ParseOptions::default());
        assert!(matches!(
            parser.parse_page(9),
            Err(Error::PageOutOfRange(9, 3))
        ));
        assert_eq!(parser.parse_page(1).unwrap().number, 1);
        assert_eq!(parser.page_count(), 3);
        assert_eq!(parser.version(), "1.4");
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(PdfParser::from_bytes(b"definitely not a pdf").is_err());
    }
}
