//! Input format detection.
//!
//! Recognizes PDF files by their `%PDF-x.y` header and layout dumps by a
//! leading JSON object.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Kind of input a file holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFormat {
    /// A PDF document
    Pdf(PdfFormat),
    /// A serialized layout (JSON)
    LayoutJson,
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Readers tolerate junk before the header within the first kilobyte.
const HEADER_WINDOW: usize = 1024;

/// Detect PDF format from a file path.
///
/// # Example
/// ```no_run
/// use pdfoutline::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("document.pdf").unwrap();
/// println!("PDF version: {}", format.version);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    detect_format_from_bytes(&read_header(path.as_ref())?)
}

/// Detect PDF format from the leading bytes of a file.
///
/// # Returns
/// * `Ok(PdfFormat)` if the data carries a valid PDF header
/// * `Err(Error::UnknownFormat)` if the data is not a PDF
/// * `Err(Error::UnsupportedVersion)` if the header version is malformed
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    let window = &data[..data.len().min(HEADER_WINDOW)];
    let start = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version_start = start + PDF_MAGIC.len();
    let version_bytes = data
        .get(version_start..version_start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

/// Detect whether a file is a PDF or a layout dump.
pub fn detect_input_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    detect_input_from_bytes(&read_header(path.as_ref())?)
}

/// Detect whether leading bytes belong to a PDF or a layout dump.
pub fn detect_input_from_bytes(data: &[u8]) -> Result<InputFormat> {
    match detect_format_from_bytes(data) {
        Ok(format) => return Ok(InputFormat::Pdf(format)),
        Err(Error::UnknownFormat) => {}
        Err(e) => return Err(e),
    }

    let body = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    match body.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Ok(InputFormat::LayoutJson),
        _ => Err(Error::UnknownFormat),
    }
}

fn read_header(path: &Path) -> Result<Vec<u8>> {
    let mut header = Vec::with_capacity(HEADER_WINDOW);
    File::open(path)?
        .take(HEADER_WINDOW as u64)
        .read_to_end(&mut header)?;
    Ok(header)
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    matches!(
        version.as_bytes(),
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit()
    )
}

/// Check if a file is a valid PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes represent a valid PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
