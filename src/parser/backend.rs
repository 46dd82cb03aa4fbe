//! PDF backend abstraction layer.
//!
//! The layout extractor only talks to [`PdfBackend`], so it can be driven by
//! lopdf in production and by an in-memory fake in tests.

use std::collections::{BTreeMap, HashSet};

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// A font resource of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFontInfo {
    /// Resource name used by `Tf` (e.g., `F1`)
    pub name: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold")
    pub base_font: String,
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value of an integer or real operand.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `index`, or `default` when missing or not a number.
    pub fn number(&self, index: usize, default: f32) -> f32 {
        self.operands
            .get(index)
            .and_then(PdfValue::as_number)
            .unwrap_or(default)
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// All pages as (page number → PageId), in page order.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Font resources of a page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Names of the image XObjects a page can paint with `Do`.
    fn page_images(&self, _page: PageId) -> HashSet<Vec<u8>> {
        HashSet::new()
    }

    /// Raw (decompressed) content stream bytes of a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse content stream bytes into operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a string operand with the encoding of `font_name` on `page`.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;

    /// PDF header version (e.g., "1.7").
    fn version(&self) -> String;

    /// Whether the document is encrypted.
    fn is_encrypted(&self) -> bool {
        false
    }
}

/// Text decoding fallback when no font encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// Load from a reader.
    pub fn load_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    /// Resolve a dictionary that may be stored inline or by reference.
    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(fonts
            .iter()
            .map(|(name, dict)| BackendFontInfo {
                name: name.clone(),
                base_font: dict
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(name).to_string()),
            })
            .collect())
    }

    fn page_images(&self, page: PageId) -> HashSet<Vec<u8>> {
        let xobjects = self
            .doc
            .get_dictionary(page)
            .ok()
            .and_then(|d| d.get(b"Resources").ok())
            .and_then(|r| self.resolve_dict(r))
            .and_then(|r| r.get(b"XObject").ok())
            .and_then(|x| self.resolve_dict(x));

        let Some(xobjects) = xobjects else {
            return HashSet::new();
        };

        xobjects
            .iter()
            .filter(|(_, obj)| {
                let stream = match obj {
                    Object::Reference(r) => self.doc.get_object(*r).ok(),
                    other => Some(*other),
                };
                matches!(stream, Some(Object::Stream(s)) if is_image(&s.dict))
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        // A page without contents is blank, not broken.
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => Ok(stream_bytes(s)),
                _ => Err(Error::PdfParse("invalid content stream".to_string())),
            },
            Object::Array(parts) => {
                let mut content = Vec::new();
                for part in parts {
                    if let Object::Reference(r) = part {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            content.extend_from_slice(&stream_bytes(s));
                            content.push(b' ');
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("invalid content stream".to_string())),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(fonts) = self.doc.get_page_fonts(page) {
            if let Some(font) = fonts.get(font_name) {
                if let Ok(enc) = font.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }

    fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }
}

fn is_image(dict: &Dictionary) -> bool {
    dict.get(b"Subtype")
        .ok()
        .and_then(|t| t.as_name().ok())
        .is_some_and(|n| n == b"Image")
}

/// Decoded stream data; unfiltered streams are returned as stored.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}
