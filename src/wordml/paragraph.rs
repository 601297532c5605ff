//! Paragraph (`w:p`) view.

use super::run::Run;
use crate::xml::Element;

/// Read-only view of a `w:p` element.
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    el: &'a Element,
}

impl<'a> Paragraph<'a> {
    /// Wrap an element, returning `None` unless it is a `w:p`.
    pub fn new(el: &'a Element) -> Option<Self> {
        el.is_w("p").then_some(Self { el })
    }

    /// The underlying element.
    pub fn element(&self) -> &'a Element {
        self.el
    }

    /// The `w:pPr` element, if any.
    pub fn properties(&self) -> Option<&'a Element> {
        self.el.w_child("pPr")
    }

    fn property(&self, local: &str) -> Option<&'a Element> {
        self.properties().and_then(|ppr| ppr.w_child(local))
    }

    /// Paragraph style id (`w:pStyle/@w:val`).
    pub fn style_id(&self) -> Option<&'a str> {
        self.property("pStyle").and_then(|s| s.w_attr("val"))
    }

    /// Whether the paragraph uses list numbering.
    ///
    /// A `w:numId` of `0` explicitly removes numbering.
    pub fn has_numbering(&self) -> bool {
        self.property("numPr")
            .and_then(|num| num.w_child("numId"))
            .and_then(|id| id.w_attr("val"))
            .is_some_and(|val| val != "0")
    }

    /// Declared outline level, if present and numeric.
    pub fn outline_level(&self) -> Option<u32> {
        self.property("outlineLvl")
            .and_then(|lvl| lvl.w_attr("val"))
            .and_then(|val| val.trim().parse().ok())
    }

    /// Whether the paragraph properties carry a `w:sectPr` (a section break).
    pub fn has_section_break(&self) -> bool {
        self.property("sectPr").is_some()
    }

    /// Raw `w:spacing/@w:line` value.
    pub fn line_spacing(&self) -> Option<&'a str> {
        self.property("spacing").and_then(|s| s.w_attr("line"))
    }

    /// Raw left indent, falling back to the bidi-aware `w:start`.
    pub fn left_indent(&self) -> Option<&'a str> {
        self.property("ind")
            .and_then(|ind| ind.w_attr("left").or_else(|| ind.w_attr("start")))
    }

    /// Direct runs of the paragraph.
    pub fn runs(&self) -> impl Iterator<Item = Run<'a>> + 'a {
        self.el.elements().filter_map(Run::new)
    }

    /// Whether the first direct run is bold. Later runs are not consulted.
    pub fn first_run_bold(&self) -> bool {
        self.runs().next().is_some_and(|r| r.is_bold())
    }

    /// Largest parseable font size among direct runs, in half-points.
    pub fn max_font_size(&self) -> Option<u32> {
        self.runs().filter_map(|r| r.font_size()).max()
    }

    /// Text of every `w:t` in the paragraph, in document order.
    pub fn text(&self) -> String {
        self.el.w_descendants("t").map(|t| t.text()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    fn para(xml: &str) -> Element {
        let doc = XmlDocument::parse(
            format!(
                r#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{}</w:p>"#,
                xml
            )
            .as_bytes(),
        )
        .unwrap();
        doc.root
    }

    #[test]
    fn test_style_and_numbering() {
        let el = para(
            r#"<w:pPr><w:pStyle w:val="Body"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="5"/></w:numPr></w:pPr>"#,
        );
        let p = Paragraph::new(&el).unwrap();
        assert_eq!(p.style_id(), Some("Body"));
        assert!(p.has_numbering());

        let el = para(r#"<w:pPr><w:numPr><w:numId w:val="0"/></w:numPr></w:pPr>"#);
        assert!(!Paragraph::new(&el).unwrap().has_numbering());

        let el = para(r#"<w:pPr><w:numPr><w:numId/></w:numPr></w:pPr>"#);
        assert!(!Paragraph::new(&el).unwrap().has_numbering());
    }

    #[test]
    fn test_text_includes_nested_runs() {
        let el = para(
            r#"<w:r><w:t>Due </w:t></w:r><w:hyperlink><w:r><w:t>Date</w:t></w:r></w:hyperlink>"#,
        );
        let p = Paragraph::new(&el).unwrap();
        assert_eq!(p.text(), "Due Date");
        assert_eq!(p.runs().count(), 1);
    }

    #[test]
    fn test_first_run_bold_only() {
        let el = para(r#"<w:r><w:t>plain</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>bold</w:t></w:r>"#);
        assert!(!Paragraph::new(&el).unwrap().first_run_bold());

        let el = para(r#"<w:r><w:rPr><w:b/></w:rPr><w:t>bold</w:t></w:r>"#);
        assert!(Paragraph::new(&el).unwrap().first_run_bold());
    }

    #[test]
    fn test_outline_and_size() {
        let el = para(
            r#"<w:pPr><w:outlineLvl w:val="1"/></w:pPr><w:r><w:rPr><w:sz w:val="28"/></w:rPr></w:r><w:r><w:rPr><w:sz w:val="x"/></w:rPr></w:r>"#,
        );
        let p = Paragraph::new(&el).unwrap();
        assert_eq!(p.outline_level(), Some(1));
        assert_eq!(p.max_font_size(), Some(28));

        let el = para(r#"<w:pPr><w:outlineLvl/></w:pPr>"#);
        assert_eq!(Paragraph::new(&el).unwrap().outline_level(), None);
    }

    #[test]
    fn test_indent_fallback() {
        let el = para(r#"<w:pPr><w:ind w:start="426" w:hanging="426"/></w:pPr>"#);
        assert_eq!(Paragraph::new(&el).unwrap().left_indent(), Some("426"));

        let el = para(r#"<w:pPr><w:ind w:left="720" w:start="426"/></w:pPr>"#);
        assert_eq!(Paragraph::new(&el).unwrap().left_indent(), Some("720"));
    }

    #[test]
    fn test_section_break() {
        let el = para(r#"<w:pPr><w:sectPr/></w:pPr>"#);
        assert!(Paragraph::new(&el).unwrap().has_section_break());
        let el = para(r#"<w:r><w:t>x</w:t></w:r>"#);
        assert!(!Paragraph::new(&el).unwrap().has_section_break());
    }
}
