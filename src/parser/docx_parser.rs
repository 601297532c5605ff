//! Structural parser for WordprocessingML documents.

use std::path::Path;

use crate::detect::ensure_zip_package;
use crate::error::{Error, Result};
use crate::model::{Block, BlockKind, ContentBlock, ParsedDocument, TableBlock};
use crate::package::{read_part_from_archive, MAIN_DOCUMENT_PART};
use crate::wordml::{self, Paragraph, Table};
use crate::xml::{Element, XmlDocument};

use super::classify::{classify, Signals};
use super::options::ParseOptions;

/// Parser turning a `.docx` main document into a [`ParsedDocument`].
pub struct DocxParser {
    doc: XmlDocument,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a `.docx` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a `.docx` file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Reject flat XML and legacy binary documents up front
        ensure_zip_package(path)?;

        let data = read_part_from_archive(path, MAIN_DOCUMENT_PART)?.ok_or_else(|| {
            Error::Parse(format!("{} is missing {}", path.display(), MAIN_DOCUMENT_PART))
        })?;

        Self::from_document_xml_with_options(&data, options)
    }

    /// Parse the raw bytes of a `word/document.xml` part.
    pub fn from_document_xml(data: &[u8]) -> Result<Self> {
        Self::from_document_xml_with_options(data, ParseOptions::default())
    }

    /// Parse the raw bytes of a `word/document.xml` part with custom options.
    pub fn from_document_xml_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let doc = XmlDocument::parse(data)?;
        if wordml::body(&doc).is_none() {
            return Err(Error::Parse("main document has no w:body".into()));
        }
        Ok(Self { doc, options })
    }

    /// Parse the document body into ordered blocks.
    pub fn parse(&self) -> Result<ParsedDocument> {
        let body = wordml::body(&self.doc)
            .ok_or_else(|| Error::Parse("main document has no w:body".into()))?;

        let mut blocks = Vec::new();
        for child in body.elements() {
            if let Some(block) = self.parse_child(child) {
                blocks.push(block);
            }
        }

        if self.options.merge_descriptions {
            blocks = merge_descriptions(blocks);
        }

        let document = ParsedDocument::from_blocks(blocks);
        log::debug!(
            "Parsed {} blocks ({} tables)",
            document.len(),
            document.tables().count()
        );
        Ok(document)
    }

    fn parse_child(&self, child: &Element) -> Option<Block> {
        if let Some(table) = Table::new(child) {
            return parse_table(&table).map(Block::Table);
        }

        let paragraph = Paragraph::new(child)?;
        let text = paragraph.text();
        if text.trim().is_empty() {
            return None;
        }

        let signals = Signals::from_paragraph(&paragraph, &self.options.styles);
        let kind = classify(&signals);
        Some(Block::Content(ContentBlock::new(kind, text)))
    }
}

/// Build a table block: first row is the header; tables without rows are
/// dropped.
fn parse_table(table: &Table<'_>) -> Option<TableBlock> {
    let mut rows = table.rows().into_iter();
    let headers = rows.next()?;
    Some(TableBlock::new(headers, rows.collect()).with_column_widths(table.grid_widths()))
}

/// Attach the body blocks directly following each bold bullet to it as
/// description lines.
pub fn merge_descriptions(blocks: Vec<Block>) -> Vec<Block> {
    let mut merged: Vec<Block> = Vec::with_capacity(blocks.len());

    for block in blocks {
        if let Block::Content(content) = &block {
            if content.kind == BlockKind::Body {
                if let Some(Block::Content(parent)) = merged.last_mut() {
                    if parent.kind == BlockKind::BulletBold {
                        parent.children.push(content.text.clone());
                        continue;
                    }
                }
            }
        }
        merged.push(block);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(body: &str) -> Vec<u8> {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
        .into_bytes()
    }

    fn parse(body: &str) -> ParsedDocument {
        DocxParser::from_document_xml(&document(body))
            .unwrap()
            .parse()
            .unwrap()
    }

    const BULLET: &str = r#"<w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="3"/></w:numPr></w:pPr>"#;

    #[test]
    fn test_scope_due_date_scenario() {
        let doc = parse(&format!(
            concat!(
                r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Scope</w:t></w:r></w:p>"#,
                r#"<w:p>{}<w:r><w:rPr><w:b/></w:rPr><w:t>Due Date</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:t>March 31</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:t>Extended to April 15</w:t></w:r></w:p>"#,
            ),
            BULLET
        ));

        assert_eq!(
            doc.blocks,
            vec![
                Block::Content(ContentBlock::new(BlockKind::H1, "Scope")),
                Block::Content(
                    ContentBlock::new(BlockKind::BulletBold, "Due Date").with_children(vec![
                        "March 31".to_string(),
                        "Extended to April 15".to_string()
                    ])
                ),
            ]
        );
    }

    #[test]
    fn test_empty_paragraphs_skipped() {
        let doc = parse(concat!(
            r#"<w:p/>"#,
            r#"<w:p><w:r><w:t>   </w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>text</w:t></w:r></w:p>"#,
        ));
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.blocks[0].as_content().unwrap().kind, BlockKind::Body);
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let doc = parse(r#"<w:p><w:r><w:t xml:space="preserve"> padded </w:t></w:r></w:p>"#);
        assert_eq!(doc.blocks[0].as_content().unwrap().text, " padded ");
    }

    #[test]
    fn test_plain_bullet_and_bold_line() {
        let doc = parse(&format!(
            concat!(
                r#"<w:p>{}<w:r><w:t>item</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:t>after bullet</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Bold line</w:t></w:r></w:p>"#,
            ),
            BULLET
        ));
        let kinds: Vec<BlockKind> = doc.content_blocks().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BlockKind::Bullet, BlockKind::Body, BlockKind::H3]);
        assert!(doc.content_blocks().all(|b| b.children.is_empty()));
    }

    #[test]
    fn test_table_parsing() {
        let doc = parse(concat!(
            r#"<w:tbl><w:tblGrid><w:gridCol w:w="4000"/><w:gridCol w:w="5164"/></w:tblGrid>"#,
            r#"<w:tr><w:tc><w:p><w:r><w:t>Item</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Cost</w:t></w:r></w:p></w:tc></w:tr>"#,
            r#"<w:tr><w:tc><w:p><w:r><w:t>Audit</w:t></w:r></w:p></w:tc></w:tr>"#,
            r#"</w:tbl>"#,
            r#"<w:tbl><w:tblPr/></w:tbl>"#,
        ));

        assert_eq!(doc.len(), 1);
        let table = doc.blocks[0].as_table().unwrap();
        assert_eq!(table.headers, vec!["Item", "Cost"]);
        assert_eq!(table.rows, vec![vec!["Audit".to_string()]]);
        assert_eq!(table.column_widths, Some(vec![4000, 5164]));
    }

    #[test]
    fn test_zero_grid_width_drops_declared_widths() {
        let doc = parse(concat!(
            r#"<w:tbl><w:tblGrid><w:gridCol w:w="2000"/><w:gridCol w:w="0"/><w:gridCol w:w="7164"/></w:tblGrid>"#,
            r#"<w:tr><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>C</w:t></w:r></w:p></w:tc></w:tr>"#,
            r#"</w:tbl>"#,
        ));

        let table = doc.blocks[0].as_table().unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.column_widths, None);
    }

    #[test]
    fn test_table_interrupts_descriptions() {
        let doc = parse(&format!(
            concat!(
                r#"<w:p>{}<w:r><w:rPr><w:b/></w:rPr><w:t>Lead</w:t></w:r></w:p>"#,
                r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>H</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
                r#"<w:p><w:r><w:t>after table</w:t></w:r></w:p>"#,
            ),
            BULLET
        ));
        assert_eq!(doc.len(), 3);
        assert!(doc.blocks[0].as_content().unwrap().children.is_empty());
    }

    #[test]
    fn test_flat_option() {
        let data = document(&format!(
            concat!(
                r#"<w:p>{}<w:r><w:rPr><w:b/></w:rPr><w:t>Lead</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:t>desc</w:t></w:r></w:p>"#,
            ),
            BULLET
        ));
        let doc = DocxParser::from_document_xml_with_options(&data, ParseOptions::new().flat())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let data = document(concat!(
            r#"<w:p><w:pPr><w:outlineLvl w:val="1"/></w:pPr><w:r><w:t>Two</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>Body</w:t></w:r></w:p>"#,
        ));
        let first = DocxParser::from_document_xml(&data).unwrap().parse().unwrap();
        let second = DocxParser::from_document_xml(&data).unwrap().parse().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_body() {
        let data = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#;
        assert!(matches!(
            DocxParser::from_document_xml(data),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            DocxParser::from_document_xml(b"<w:document><w:body>"),
            Err(Error::Parse(_))
        ));
    }
}
