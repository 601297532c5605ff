//! Package builders shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Wrap body children in a complete main document.
pub fn main_document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        W_NS, body
    )
}

/// A paragraph with a single plain run.
pub fn para(text: &str) -> String {
    format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
}

/// A paragraph in `style`.
pub fn styled(style: &str, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
        style, text
    )
}

/// A paragraph carrying a section break.
pub fn section_break(text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
        text
    )
}

/// Write a ZIP package holding `parts` in order.
pub fn write_package(path: &Path, parts: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, data) in parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

/// Write a minimal `.docx` with the given body children.
pub fn write_docx(path: &Path, body: &str) {
    let document = main_document(body);
    write_package(
        path,
        &[
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", RELS.as_bytes()),
            ("word/document.xml", document.as_bytes()),
        ],
    );
}

/// Write a branded template: a cover with a title, a content region with
/// placeholder text and a back page, plus styles and numbering parts.
pub fn write_template(path: &Path) {
    let body = [
        styled("CoverText-Aprial18pt", "Cover Title"),
        "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cover table</w:t></w:r></w:p></w:tc></w:tr></w:tbl>".to_string(),
        section_break("cover break"),
        para("placeholder content"),
        section_break("content break"),
        para("Back page"),
    ]
    .concat();
    let document = main_document(&body);

    let styles = format!(
        concat!(
            r#"<w:styles xmlns:w="{}">"#,
            r#"<w:style w:type="paragraph" w:styleId="HeadingStyle1-18pt"/>"#,
            r#"<w:style w:type="paragraph" w:styleId="HeadingStyle2-14pt"/>"#,
            r#"<w:style w:type="paragraph" w:styleId="BodyCopy-Arial10pt"/>"#,
            r#"<w:style w:type="paragraph" w:styleId="CoverText-Aprial18pt"/>"#,
            r#"</w:styles>"#
        ),
        W_NS
    );
    let numbering = format!(
        r#"<w:numbering xmlns:w="{}"><w:num w:numId="55"/><w:num w:numId="56"/></w:numbering>"#,
        W_NS
    );

    write_package(
        path,
        &[
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", RELS.as_bytes()),
            ("word/document.xml", document.as_bytes()),
            ("word/styles.xml", styles.as_bytes()),
            ("word/numbering.xml", numbering.as_bytes()),
        ],
    );
}

/// Read one part of a package as text.
pub fn read_part(path: &Path, name: &str) -> Option<String> {
    docbrand::package::read_part_from_archive(path, name)
        .unwrap()
        .map(|data| String::from_utf8(data).unwrap())
}
