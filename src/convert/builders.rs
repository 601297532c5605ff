//! Paragraph and table builders for the content region.
//!
//! Every builder emits elements that reference the template's styles and
//! numbering definitions by id; all visual defaults come from the template.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Block, BlockKind, ContentBlock, ParsedDocument, TableBlock};
use crate::style::StyleSheet;
use crate::xml::{ns, Element, QName};

/// Spacer paragraphs opening the content region.
pub const LEADING_SPACERS: usize = 4;
/// Spacer paragraphs closing the content region.
pub const TRAILING_SPACERS: usize = 2;

/// Left indent and hanging indent of list items, in twips.
const LIST_INDENT: &str = "426";
/// Line spacing of list items, indented body copy and table cells.
const LIST_LINE: &str = "276";
/// Line spacing of level-2 headings.
const H2_LINE: &str = "480";
/// Run size override of level-2 headings (12pt).
const H2_RUN_SIZE: &str = "24";
/// Run size of table cell text (10pt).
const CELL_RUN_SIZE: &str = "20";
/// Table width as a percentage in fiftieths (100%).
const TABLE_WIDTH_PCT: &str = "5000";
/// Border width in eighths of a point.
const BORDER_SIZE: &str = "8";

const TABLE_BORDER_SIDES: &[&str] = &["top", "left", "bottom", "right", "insideH", "insideV"];
const CELL_BORDER_SIDES: &[&str] = &["top", "left", "bottom", "right"];
const CELL_MARGINS: &[(&str, &str)] = &[("top", "15"), ("left", "97"), ("bottom", "0"), ("right", "97")];

static LEADING_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[\x{2022}\x{25CF}\x{25AA}\x{25B8}\x{25BA}\x{2023}\x{25E6}\x{25CB}\x{2013}\x{2014}-]\s*)?")
        .expect("leading bullet pattern is valid")
});

/// Remove leading whitespace and at most one typed bullet glyph (with the
/// whitespace following it).
pub fn strip_bullet(text: &str) -> &str {
    match LEADING_BULLET.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Builds content region elements from parsed blocks.
pub struct ContentBuilder<'a> {
    styles: &'a StyleSheet,
}

impl<'a> ContentBuilder<'a> {
    /// Create a builder emitting the given style sheet's ids.
    pub fn new(styles: &'a StyleSheet) -> Self {
        Self { styles }
    }

    /// Build the complete content region, spacers included.
    pub fn build(&self, document: &ParsedDocument) -> Vec<Element> {
        let mut out = Vec::with_capacity(document.len() * 2 + LEADING_SPACERS + TRAILING_SPACERS);

        for _ in 0..LEADING_SPACERS {
            out.push(self.heading1_spacer());
        }
        for block in document {
            self.push_block(block, &mut out);
        }
        for _ in 0..TRAILING_SPACERS {
            out.push(spacer(&self.styles.heading2_style, None));
        }

        out
    }

    fn push_block(&self, block: &Block, out: &mut Vec<Element>) {
        match block {
            Block::Table(table) => {
                out.push(spacer(&self.styles.body_style, None));
                out.push(self.table(table));
                out.push(spacer(&self.styles.body_style, None));
            }
            Block::Content(content) => self.push_content(content, out),
        }
    }

    fn push_content(&self, block: &ContentBlock, out: &mut Vec<Element>) {
        match block.kind {
            BlockKind::H1 => {
                out.push(self.heading1_spacer());
                out.push(self.heading1(&block.text));
                out.push(spacer(&self.styles.heading2_style, None));
            }
            BlockKind::H2 => out.push(self.heading2(&block.text)),
            BlockKind::H3 => out.push(self.heading3(&block.text)),
            BlockKind::BulletBold => {
                out.push(self.bullet(&block.text, true));
                out.extend(block.children.iter().map(|line| self.indented_body(line)));
            }
            BlockKind::Bullet => out.push(self.bullet(&block.text, false)),
            BlockKind::Body => out.push(self.body(&block.text)),
            BlockKind::BodyIndent => out.push(self.indented_body(&block.text)),
        }
    }

    // ========================================================================
    // Paragraphs
    // ========================================================================

    fn heading1_spacer(&self) -> Element {
        spacer(&self.styles.heading1_style, Some(("0", "240")))
    }

    /// Level-1 heading in the H1 style.
    pub fn heading1(&self, text: &str) -> Element {
        let ppr = properties(&self.styles.heading1_style)
            .with_child(Element::w("spacing").with_w_attr("before", "0").with_w_attr("after", "240"));
        paragraph(ppr, run(None, text))
    }

    /// Level-2 heading in the H2 style with a 12pt run override.
    pub fn heading2(&self, text: &str) -> Element {
        let ppr = properties(&self.styles.heading2_style)
            .with_child(Element::w("spacing").with_w_attr("before", "0").with_w_attr("line", H2_LINE));
        let rpr = Element::w("rPr")
            .with_child(val("sz", H2_RUN_SIZE))
            .with_child(val("szCs", H2_RUN_SIZE));
        paragraph(ppr, run(Some(rpr), text))
    }

    /// Level-3 heading: body copy with a bold run.
    pub fn heading3(&self, text: &str) -> Element {
        let rpr = Element::w("rPr")
            .with_child(Element::w("b"))
            .with_child(val("bCs", "0"));
        paragraph(properties(&self.styles.body_style), run(Some(rpr), text))
    }

    /// Numbered list item; bold items use the lead-in numbering definition.
    pub fn bullet(&self, text: &str, bold: bool) -> Element {
        let num_id = if bold {
            &self.styles.bullet_bold_num_id
        } else {
            &self.styles.bullet_num_id
        };
        let ppr = properties(&self.styles.body_style)
            .with_child(
                Element::w("numPr")
                    .with_child(val("ilvl", "0"))
                    .with_child(val("numId", num_id)),
            )
            .with_child(Element::w("spacing").with_w_attr("line", LIST_LINE))
            .with_child(
                Element::w("ind")
                    .with_w_attr("left", LIST_INDENT)
                    .with_w_attr("hanging", LIST_INDENT),
            );
        let rpr = bold.then(|| Element::w("rPr").with_child(Element::w("b")));
        paragraph(ppr, run(rpr, strip_bullet(text)))
    }

    /// Body copy indented to the list text position.
    pub fn indented_body(&self, text: &str) -> Element {
        let ppr = properties(&self.styles.body_style)
            .with_child(Element::w("spacing").with_w_attr("line", LIST_LINE))
            .with_child(Element::w("ind").with_w_attr("left", LIST_INDENT));
        paragraph(ppr, run(None, text))
    }

    /// Plain body copy.
    pub fn body(&self, text: &str) -> Element {
        paragraph(properties(&self.styles.body_style), run(None, text))
    }

    // ========================================================================
    // Tables
    // ========================================================================

    /// Branded table: header row on the header fill, data rows on the body
    /// fill, navy borders.
    pub fn table(&self, table: &TableBlock) -> Element {
        let columns = table.column_count().max(1);

        let mut tbl = Element::w("tbl")
            .with_child(self.table_properties())
            .with_child(self.grid(table, columns))
            .with_child(self.row(&table.headers, columns, true));
        for row in &table.rows {
            tbl = tbl.with_child(self.row(row, columns, false));
        }
        tbl
    }

    /// Grid column widths: declared widths when they cover every column,
    /// otherwise an even split of the table width.
    pub fn column_widths(&self, table: &TableBlock, columns: usize) -> Vec<u32> {
        match &table.column_widths {
            Some(widths) if widths.len() >= columns => widths[..columns].to_vec(),
            _ => {
                let even = self.styles.table_width / columns.max(1) as u32;
                vec![even; columns]
            }
        }
    }

    fn table_properties(&self) -> Element {
        let mut cell_margins = Element::w("tblCellMar");
        for side in ["left", "right"] {
            cell_margins = cell_margins.with_child(width(side, "0", "dxa"));
        }

        Element::w("tblPr")
            .with_child(width("tblW", TABLE_WIDTH_PCT, "pct"))
            .with_child(val("jc", "center"))
            .with_child(self.borders("tblBorders", TABLE_BORDER_SIDES))
            .with_child(cell_margins)
    }

    fn grid(&self, table: &TableBlock, columns: usize) -> Element {
        self.column_widths(table, columns)
            .into_iter()
            .fold(Element::w("tblGrid"), |grid, w| {
                grid.with_child(Element::w("gridCol").with_w_attr("w", &w.to_string()))
            })
    }

    fn borders(&self, name: &str, sides: &[&str]) -> Element {
        sides.iter().fold(Element::w(name), |borders, side| {
            borders.with_child(
                Element::w(side)
                    .with_w_attr("val", "single")
                    .with_w_attr("sz", BORDER_SIZE)
                    .with_w_attr("space", "0")
                    .with_w_attr("color", &self.styles.table_border_color),
            )
        })
    }

    fn row(&self, cells: &[String], columns: usize, header: bool) -> Element {
        (0..columns).fold(Element::w("tr"), |tr, idx| {
            let text = cells.get(idx).map(String::as_str).unwrap_or("");
            tr.with_child(self.cell(text, header))
        })
    }

    fn cell(&self, text: &str, header: bool) -> Element {
        let fill = if header {
            &self.styles.table_header_fill
        } else {
            &self.styles.table_body_fill
        };

        let margins = CELL_MARGINS
            .iter()
            .fold(Element::w("tcMar"), |mar, (side, w)| mar.with_child(width(side, w, "dxa")));

        let tc_pr = Element::w("tcPr")
            .with_child(self.borders("tcBorders", CELL_BORDER_SIDES))
            .with_child(
                Element::w("shd")
                    .with_w_attr("val", "clear")
                    .with_w_attr("color", "auto")
                    .with_w_attr("fill", fill),
            )
            .with_child(margins)
            .with_child(val("vAlign", if header { "bottom" } else { "center" }));

        text.split('\n')
            .fold(Element::w("tc").with_child(tc_pr), |tc, line| {
                tc.with_child(self.cell_paragraph(line, header))
            })
    }

    fn cell_paragraph(&self, text: &str, header: bool) -> Element {
        let ppr = properties(&self.styles.heading2_style).with_child(
            Element::w("spacing")
                .with_w_attr("line", LIST_LINE)
                .with_w_attr("lineRule", "auto"),
        );
        let bold = if header {
            Element::w("b")
        } else {
            val("b", "0")
        };
        let rpr = Element::w("rPr")
            .with_child(bold)
            .with_child(val("sz", CELL_RUN_SIZE))
            .with_child(val("szCs", CELL_RUN_SIZE));
        paragraph(ppr, run(Some(rpr), text))
    }
}

/// Empty paragraph carrying only a style and optional before/after spacing.
pub fn spacer(style: &str, spacing: Option<(&str, &str)>) -> Element {
    let mut ppr = properties(style);
    if let Some((before, after)) = spacing {
        ppr = ppr.with_child(
            Element::w("spacing")
                .with_w_attr("before", before)
                .with_w_attr("after", after),
        );
    }
    Element::w("p").with_child(ppr)
}

fn properties(style: &str) -> Element {
    Element::w("pPr").with_child(val("pStyle", style))
}

fn paragraph(ppr: Element, run: Element) -> Element {
    Element::w("p").with_child(ppr).with_child(run)
}

fn run(rpr: Option<Element>, text: &str) -> Element {
    let mut t = Element::w("t").with_attr(QName::new(ns::XML, "space"), "preserve");
    if !text.is_empty() {
        t = t.with_text(text);
    }

    let mut r = Element::w("r");
    if let Some(rpr) = rpr {
        r = r.with_child(rpr);
    }
    r.with_child(t)
}

fn val(local: &str, value: &str) -> Element {
    Element::w(local).with_w_attr("val", value)
}

fn width(local: &str, w: &str, kind: &str) -> Element {
    Element::w(local).with_w_attr("w", w).with_w_attr("type", kind)
}
