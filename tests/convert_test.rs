//! End-to-end tests for template conversion.

mod common;

use std::fs;

use common::{main_document, para, read_part, styled, write_docx, write_package, write_template};
use docbrand::{Compositor, Docbrand, Error, ParsedDocument, StyleSheet};

const NUMBERED_BOLD: &str = concat!(
    r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="3"/></w:numPr></w:pPr>"#,
    r#"<w:r><w:rPr><w:b/></w:rPr><w:t>Due Date</w:t></w:r></w:p>"#
);

fn notes_body() -> String {
    [
        styled("Heading1", "Scope"),
        NUMBERED_BOLD.to_string(),
        para("March 31"),
        concat!(
            r#"<w:tbl><w:tblGrid><w:gridCol w:w="2000"/><w:gridCol w:w="3000"/></w:tblGrid>"#,
            r#"<w:tr><w:tc><w:p><w:r><w:t>Item</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Owner</w:t></w:r></w:p></w:tc></w:tr>"#,
            r#"<w:tr><w:tc><w:p><w:r><w:t>Audit</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Finance</w:t></w:r></w:p></w:tc></w:tr>"#,
            r#"</w:tbl>"#
        )
        .to_string(),
    ]
    .concat()
}

#[test]
fn test_convert_keeps_cover_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.docx");
    let template = dir.path().join("template.docx");
    let output = dir.path().join("notes_branded.docx");
    write_docx(&input, &notes_body());
    write_template(&template);

    docbrand::convert(&input, &template, &output, Some("Annual Report")).unwrap();

    let document = read_part(&output, "word/document.xml").unwrap();
    assert!(document.contains("Annual Report"));
    assert!(!document.contains("Cover Title"));
    assert!(document.contains("cover table"));
    assert!(document.contains("cover break"));
    assert!(document.contains("Back page"));
    assert!(!document.contains("placeholder content"));
    assert!(!document.contains("content break"));

    let scope = document.find("Scope").unwrap();
    let due = document.find("Due Date").unwrap();
    let back = document.find("Back page").unwrap();
    assert!(document.find("Annual Report").unwrap() < scope);
    assert!(scope < due && due < back);
    assert!(document.contains(r#"w:val="HeadingStyle1-18pt""#));
    assert!(document.contains(r#"w:fill="F5A800""#));
    assert!(document.contains("Finance"));

    // Template-only parts survive the rewrite
    assert_eq!(
        read_part(&output, "word/styles.xml"),
        read_part(&template, "word/styles.xml")
    );
    assert!(read_part(&output, "word/numbering.xml").is_some());
}

#[test]
fn test_converted_document_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.docx");
    let template = dir.path().join("template.docx");
    let output = dir.path().join("branded.docx");
    write_docx(&input, &notes_body());
    write_template(&template);

    let docbrand = Docbrand::new().with_template(&template).with_title("Annual Report");
    docbrand.convert(&input, &output).unwrap();

    let reparsed = docbrand.parse(&output).unwrap();
    let text = reparsed.plain_text();
    assert!(text.contains("Annual Report"));
    assert!(text.contains("Scope"));
    assert!(text.contains("March 31"));
    assert_eq!(reparsed.tables().filter(|t| t.headers.len() == 2).count(), 1);
}

#[test]
fn test_empty_input_copies_template() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blank.docx");
    let template = dir.path().join("template.docx");
    let output = dir.path().join("out.docx");
    write_docx(&input, "<w:p/><w:p><w:r><w:t>  </w:t></w:r></w:p>");
    write_template(&template);

    docbrand::convert(&input, &template, &output, Some("Ignored")).unwrap();
    assert_eq!(fs::read(&template).unwrap(), fs::read(&output).unwrap());
}

#[test]
fn test_template_without_body_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.docx");
    let template = dir.path().join("template.docx");
    let output = dir.path().join("out.docx");
    write_docx(&input, &notes_body());
    let document = format!(r#"<w:document xmlns:w="{}"/>"#, common::W_NS);
    write_package(&template, &[("word/document.xml", document.as_bytes())]);

    assert!(matches!(
        docbrand::convert(&input, &template, &output, None),
        Err(Error::TemplateCorrupt(_))
    ));
    assert!(!output.exists());
}

#[test]
fn test_template_without_sections_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.docx");
    let template = dir.path().join("template.docx");
    let output = dir.path().join("out.docx");
    write_docx(&input, &notes_body());
    let document = main_document(&para("lonely"));
    write_package(&template, &[("word/document.xml", document.as_bytes())]);

    assert!(matches!(
        docbrand::convert(&input, &template, &output, None),
        Err(Error::TemplateCorrupt(_))
    ));
    assert!(!output.exists());
}

#[test]
fn test_output_must_differ_from_template() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.docx");
    let template = dir.path().join("template.docx");
    write_docx(&input, &notes_body());
    write_template(&template);
    let before = fs::read(&template).unwrap();

    assert!(matches!(
        Compositor::new(&template).compose(&ParsedDocument::new(), &template, None),
        Err(Error::Config(_))
    ));
    assert_eq!(fs::read(&template).unwrap(), before);
}

#[test]
fn test_inspect_template() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.docx");
    write_template(&template);

    let report = docbrand::inspect_template(&template, &StyleSheet::default()).unwrap();
    assert!(report.is_complete());
    assert!(report.section_markers);
    assert_eq!(report.paragraph_count, 5);

    let styles = StyleSheet {
        body_style: "Unknown".into(),
        ..StyleSheet::default()
    };
    let report = docbrand::inspect_template(&template, &styles).unwrap();
    assert_eq!(report.missing_styles, vec!["Unknown"]);
}

#[test]
fn test_convert_to_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.docx");
    let template = dir.path().join("template.docx");
    write_docx(&input, &notes_body());
    write_template(&template);

    let artifact = docbrand::convert_to_artifact(&input, &template, None).unwrap();
    let document = read_part(artifact.path(), "word/document.xml").unwrap();
    assert!(document.contains("Cover Title"));
    assert!(document.contains("Scope"));
}
