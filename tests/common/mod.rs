//! Test fixtures: small PDFs and layouts built in memory.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pdfoutline::{LayoutBlock, LayoutDocument, LayoutLine, LayoutPage, LayoutSpan};

/// One text object: font resource (`F1` bold, `F2` regular), size, text.
pub type Line<'a> = (&'a str, f32, &'a str);

/// Build a PDF with one `BT`/`ET` text object per line.
pub fn build_pdf(pages: &[Vec<Line<'_>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => bold_id,
            "F2" => regular_id,
        },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        let mut y = 760;
        for (font, size, text) in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), Object::Real(*size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(72), Object::Integer(y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
            y -= 40;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("PDF serializes");
    buffer
}

/// The two-page annual report used across tests.
pub fn annual_report_pdf() -> Vec<u8> {
    build_pdf(&[
        vec![
            ("F1", 24.0, "Annual Report 2024"),
            ("F2", 10.0, "This report summarizes the year."),
        ],
        vec![
            ("F2", 14.0, "1. Introduction"),
            ("F2", 12.0, "1.1 background"),
            ("F2", 10.0, "Body text on the second page."),
        ],
    ])
}

/// A text block of single-span lines, one per `\n`.
pub fn block(text: &str, font: &str, size: f32) -> LayoutBlock {
    LayoutBlock::text(
        text.lines()
            .map(|l| LayoutLine::new(vec![LayoutSpan::new(l, font, size)]))
            .collect(),
    )
}

/// A page of blocks.
pub fn page(number: u32, blocks: Vec<LayoutBlock>) -> LayoutPage {
    let mut page = LayoutPage::new(number);
    for b in blocks {
        page.add_block(b);
    }
    page
}

/// A document of pages.
pub fn document(pages: Vec<LayoutPage>) -> LayoutDocument {
    let mut doc = LayoutDocument::new();
    for p in pages {
        doc.add_page(p);
    }
    doc
}
