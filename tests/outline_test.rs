//! End-to-end outline extraction tests.

mod common;

use common::{annual_report_pdf, block, build_pdf, document, page};
use pdfoutline::render::{to_json, to_markdown, JsonFormat};
use pdfoutline::{
    extract_bytes, extract_layout, ExtractionResult, HeadingLevel, LayoutDocument, OutlineConfig,
    OutlineEntry, OutlineExtractor, PageSelection, ParseOptions, PdfOutline, PdfParser,
};

#[test]
fn test_pdf_annual_report() {
    let result = extract_bytes(&annual_report_pdf()).unwrap();

    assert_eq!(result.title, "Annual Report 2024");
    assert_eq!(
        result.outline,
        vec![OutlineEntry::new(HeadingLevel::H1, "Introduction", 2)]
    );
}

#[test]
fn test_pdf_layout_carries_fonts_and_sizes() {
    let parser = PdfParser::from_bytes(&annual_report_pdf()).unwrap();
    assert_eq!(parser.page_count(), 2);

    let layout = parser.parse().unwrap();
    let first = &layout.pages[0];
    assert_eq!(first.number, 1);
    assert_eq!(first.blocks.len(), 2);

    let span = first.blocks[0].spans().next().unwrap();
    assert_eq!(span.text, "Annual Report 2024");
    assert_eq!(span.font, "Helvetica-Bold");
    assert_eq!(span.size, 24.0);
}

#[test]
fn test_pdf_page_selection() {
    let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![2]));
    let layout = PdfParser::from_bytes_with_options(&annual_report_pdf(), options)
        .unwrap()
        .parse()
        .unwrap();

    assert_eq!(layout.page_count(), 1);
    assert_eq!(layout.pages[0].number, 2);
}

#[test]
fn test_pdf_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, annual_report_pdf()).unwrap();

    let result = pdfoutline::extract_file(&path).unwrap();
    assert_eq!(result.title, "Annual Report 2024");
    assert_eq!(result.outline.len(), 1);
}

#[test]
fn test_pdf_numbered_levels() {
    let pdf = build_pdf(&[
        vec![
            ("F1", 22.0, "Field Manual"),
            ("F2", 10.0, "Prepared for internal use."),
        ],
        vec![
            ("F2", 12.0, "1 Safety Rules"),
            ("F2", 12.0, "1.1 Protective Equipment"),
            ("F2", 12.0, "1.1.1 Gloves and Masks"),
            ("F2", 10.0, "Always wear the listed equipment."),
        ],
    ]);

    let result = extract_bytes(&pdf).unwrap();
    assert_eq!(result.title, "Field Manual");
    assert_eq!(
        result.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "Safety Rules", 2),
            OutlineEntry::new(HeadingLevel::H2, "Protective Equipment", 2),
            OutlineEntry::new(HeadingLevel::H3, "Gloves and Masks", 2),
        ]
    );
}

#[test]
fn test_layout_outline_sorted_by_page() {
    let doc = document(vec![
        page(
            1,
            vec![
                block("Handbook", "Arial-Bold", 26.0),
                block("Welcome", "Arial-Bold", 14.0),
                block("Read this first.", "Arial", 10.0),
            ],
        ),
        page(
            2,
            vec![
                block("2 Benefits", "Arial", 12.0),
                block("Some benefits text.", "Arial", 10.0),
            ],
        ),
        page(
            3,
            vec![
                block("Appendix", "Arial-Bold", 14.0),
                block("More text here.", "Arial", 10.0),
            ],
        ),
    ]);

    let result = extract_layout(&doc);
    assert_eq!(result.title, "Handbook");

    let pages: Vec<u32> = result.outline.iter().map(|e| e.page).collect();
    let mut sorted = pages.clone();
    sorted.sort();
    assert_eq!(pages, sorted);
    assert!(result.outline.iter().all(|e| !e.text.is_empty()));
    assert!(result
        .outline
        .iter()
        .any(|e| e.text == "Benefits" && e.level == HeadingLevel::H1));
}

#[test]
fn test_repeated_heading_and_footer() {
    let doc = document(vec![
        page(
            1,
            vec![
                block("Quarterly Review", "Verdana-Bold", 24.0),
                block("Highlights", "Verdana-Bold", 15.0),
                block("Revenue grew steadily.", "Verdana", 10.0),
                block("Internal Draft", "Verdana-Bold", 8.0),
            ],
        ),
        page(
            2,
            vec![
                block("HIGHLIGHTS", "Verdana-Bold", 15.0),
                block("Costs fell slightly.", "Verdana", 10.0),
                block("Internal Draft", "Verdana-Bold", 8.0),
            ],
        ),
    ]);

    let result = extract_layout(&doc);
    assert_eq!(result.title, "Quarterly Review");
    assert_eq!(
        result.outline,
        vec![OutlineEntry::new(HeadingLevel::H2, "Highlights", 1)]
    );
}

#[test]
fn test_body_only_document() {
    let doc = document(vec![page(
        1,
        vec![
            block("just a plain paragraph of body text.", "Times-Roman", 11.0),
            block("another plain paragraph follows here.", "Times-Roman", 11.0),
        ],
    )]);

    let result = extract_layout(&doc);
    assert!(result.outline.is_empty());
}

#[test]
fn test_extractor_reusable_across_documents() {
    let extractor = OutlineExtractor::new();
    let report = document(vec![page(
        1,
        vec![
            block("Report", "Arial-Bold", 20.0),
            block("Summary", "Arial-Bold", 14.0),
            block("Body.", "Arial", 10.0),
        ],
    )]);

    let first = extractor.extract(&report);
    let empty = extractor.extract(&LayoutDocument::new());
    let second = extractor.extract(&report);

    assert_eq!(first, second);
    assert_eq!(empty, ExtractionResult::default());
}

#[test]
fn test_config_changes_outcome() {
    let doc = document(vec![page(
        1,
        vec![
            block("Guide", "Arial-Bold", 20.0),
            block("A Rather Long Bold Section Heading", "Arial-Bold", 14.0),
            block("Body.", "Arial", 10.0),
        ],
    )]);

    let strict = OutlineExtractor::with_config(OutlineConfig::new().with_max_text_len(10)).unwrap();
    assert!(strict.extract(&doc).outline.is_empty());
    assert_eq!(OutlineExtractor::new().extract(&doc).outline.len(), 1);
}

#[test]
fn test_builder_lenient_bytes() {
    let result = PdfOutline::new()
        .lenient()
        .with_pages(PageSelection::Range(1..=1))
        .extract_bytes(&annual_report_pdf())
        .unwrap();

    assert_eq!(result.title, "Annual Report 2024");
    assert!(result.outline.is_empty());
}

#[test]
fn test_render_outputs() {
    let result = extract_bytes(&annual_report_pdf()).unwrap();

    let json = to_json(&result, JsonFormat::Compact).unwrap();
    assert_eq!(
        json,
        r#"{"title":"Annual Report 2024","outline":[{"level":"H1","text":"Introduction","page":2}]}"#
    );

    let markdown = to_markdown(&result);
    assert!(markdown.starts_with("# Annual Report 2024\n"));
    assert!(markdown.contains("- Introduction (p. 2)"));
}
