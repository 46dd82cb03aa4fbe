//! Content-stream walker producing [`LayoutPage`]s.
//!
//! Each `BT`/`ET` text object becomes one text block. Within a block, spans
//! stay on the current line while the baseline holds; any vertical move
//! starts a new line. Painting an image XObject adds an image block.

use std::collections::{HashMap, HashSet};
use std::mem;

use crate::error::Result;
use crate::model::{LayoutBlock, LayoutLine, LayoutPage, LayoutSpan};

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};

/// Font size in effect before the first `Tf`.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// `TJ` adjustment, in thousandths of text space, read as a word gap.
const SPACE_THRESHOLD: f32 = 200.0;

/// Baseline shift (text space units) that starts a new line.
const BASELINE_EPSILON: f32 = 0.5;

/// Builds the layout of single pages from a [`PdfBackend`].
pub struct LayoutExtractor<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: PdfBackend + ?Sized> LayoutExtractor<'a, B> {
    /// Create an extractor over a backend.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Extract page `number` (1-indexed, as reported by the backend).
    pub fn extract_page(&self, number: u32, page_id: PageId) -> Result<LayoutPage> {
        let fonts: HashMap<Vec<u8>, String> = self
            .backend
            .page_fonts(page_id)?
            .into_iter()
            .map(|f| (f.name, f.base_font))
            .collect();
        let images = self.backend.page_images(page_id);
        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;

        let mut walker = PageWalker {
            backend: self.backend,
            page_id,
            fonts: &fonts,
            images: &images,
            state: TextState::default(),
            builder: PageBuilder::new(number),
        };
        for op in &ops {
            walker.apply(op);
        }

        let page = walker.builder.finish();
        log::debug!(
            "page {}: {} operation(s), {} block(s)",
            number,
            ops.len(),
            page.blocks.len()
        );
        Ok(page)
    }
}

/// Interprets the operators of one page.
struct PageWalker<'w, B: PdfBackend + ?Sized> {
    backend: &'w B,
    page_id: PageId,
    fonts: &'w HashMap<Vec<u8>, String>,
    images: &'w HashSet<Vec<u8>>,
    state: TextState,
    builder: PageBuilder,
}

impl<B: PdfBackend + ?Sized> PageWalker<'_, B> {
    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "BT" => {
                self.builder.end_block();
                self.state.in_text = true;
                self.state.matrix = TextMatrix::default();
            }
            "ET" => {
                self.builder.end_block();
                self.state.in_text = false;
            }
            "Tf" => {
                if let Some(PdfValue::Name(resource)) = op.operands.first() {
                    self.state.font = self
                        .fonts
                        .get(resource)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(resource).into_owned());
                    self.state.font_resource = resource.clone();
                }
                self.state.font_size = op.number(1, DEFAULT_FONT_SIZE);
            }
            "TL" => self.state.leading = op.number(0, 0.0),
            "Td" => self.state.matrix.translate(op.number(0, 0.0), op.number(1, 0.0)),
            "TD" => {
                let ty = op.number(1, 0.0);
                self.state.leading = -ty;
                self.state.matrix.translate(op.number(0, 0.0), ty);
            }
            "Tm" => self.state.matrix.set([
                op.number(0, 1.0),
                op.number(1, 0.0),
                op.number(2, 0.0),
                op.number(3, 1.0),
                op.number(4, 0.0),
                op.number(5, 0.0),
            ]),
            "T*" => self.state.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.emit(text);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = self.decode_array(items);
                    self.emit(text);
                }
            }
            "'" | "\"" => {
                self.state.next_line();
                let index = if op.operator == "\"" { 2 } else { 0 };
                if let Some(PdfValue::Str(bytes)) = op.operands.get(index) {
                    let text = self.decode(bytes);
                    self.emit(text);
                }
            }
            "Do" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    if self.images.contains(name) {
                        self.builder.push_image();
                    }
                }
            }
            _ => {}
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.backend
            .decode_text(self.page_id, &self.state.font_resource, bytes)
    }

    /// Concatenate a `TJ` array, turning wide negative kerns into spaces.
    fn decode_array(&self, items: &[PdfValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                other => {
                    if let Some(n) = other.as_number() {
                        if -n > SPACE_THRESHOLD {
                            push_word_gap(&mut combined);
                        }
                    }
                }
            }
        }
        combined
    }

    fn emit(&mut self, text: String) {
        if !self.state.in_text || text.trim().is_empty() {
            return;
        }
        let size = self.state.font_size.abs() * self.state.matrix.vertical_scale();
        let span = LayoutSpan::new(text, self.state.font.clone(), size);
        self.builder.push_span(span, self.state.matrix.f);
    }
}

/// Add a word space unless the text already ends in one or in a script
/// written without spaces.
fn push_word_gap(text: &mut String) {
    match text.chars().last() {
        Some(c) if c != ' ' && c != '\u{00A0}' && !is_spaceless_script_char(c) => {
            text.push(' ');
        }
        _ => {}
    }
}

/// Chinese and Japanese characters, which take no word spaces (Korean does).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2EBEF
            | 0x3040..=0x309F
            | 0x30A0..=0x30FF
            | 0x3000..=0x303F
    )
}

/// Text state carried between operators.
#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    /// Base font name of the current font
    font: String,
    /// Resource name of the current font, for decoding
    font_resource: Vec<u8>,
    font_size: f32,
    /// Leading set by `TL`/`TD`; zero means "use the font size"
    leading: f32,
    matrix: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font: String::new(),
            font_resource: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            leading: 0.0,
            matrix: TextMatrix::default(),
        }
    }
}

impl TextState {
    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size
        };
        self.matrix.translate(0.0, -leading);
    }
}

/// Text matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, [a, b, c, d, e, f]: [f32; 6]) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    /// Length of the transformed unit vertical vector.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Accumulates spans into lines, lines into blocks, blocks into a page.
#[derive(Debug)]
struct PageBuilder {
    page: LayoutPage,
    lines: Vec<LayoutLine>,
    spans: Vec<LayoutSpan>,
    baseline: Option<f32>,
}

impl PageBuilder {
    fn new(number: u32) -> Self {
        Self {
            page: LayoutPage::new(number),
            lines: Vec::new(),
            spans: Vec::new(),
            baseline: None,
        }
    }

    fn push_span(&mut self, span: LayoutSpan, baseline: f32) {
        if self
            .baseline
            .is_some_and(|current| (current - baseline).abs() > BASELINE_EPSILON)
        {
            self.end_line();
        }
        self.baseline = Some(baseline);
        self.spans.push(span);
    }

    fn end_line(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(LayoutLine::new(mem::take(&mut self.spans)));
        }
        self.baseline = None;
    }

    fn end_block(&mut self) {
        self.end_line();
        if !self.lines.is_empty() {
            self.page
                .add_block(LayoutBlock::text(mem::take(&mut self.lines)));
        }
    }

    fn push_image(&mut self) {
        self.end_block();
        self.page.add_block(LayoutBlock::image());
    }

    fn finish(mut self) -> LayoutPage {
        self.end_block();
        self.page
    }
}
