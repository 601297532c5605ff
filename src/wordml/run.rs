//! Run (`w:r`) view.

use crate::xml::Element;

/// Font attributes of `w:rFonts` inspected by the audit, in checking order.
pub const FONT_SLOTS: &[&str] = &["ascii", "hAnsi", "cs"];

/// Read-only view of a `w:r` element.
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    el: &'a Element,
}

impl<'a> Run<'a> {
    /// Wrap an element, returning `None` unless it is a `w:r`.
    pub fn new(el: &'a Element) -> Option<Self> {
        el.is_w("r").then_some(Self { el })
    }

    /// The underlying element.
    pub fn element(&self) -> &'a Element {
        self.el
    }

    /// The `w:rPr` element, if any.
    pub fn properties(&self) -> Option<&'a Element> {
        self.el.w_child("rPr")
    }

    fn property(&self, local: &str) -> Option<&'a Element> {
        self.properties().and_then(|rpr| rpr.w_child(local))
    }

    /// Whether the run is directly bold.
    ///
    /// `w:b` without a value means bold; `0` and `false` switch it off.
    pub fn is_bold(&self) -> bool {
        match self.property("b") {
            Some(b) => !matches!(b.w_attr("val"), Some("0") | Some("false")),
            None => false,
        }
    }

    /// The raw `w:sz` value in half-points, if declared and non-empty.
    pub fn font_size_raw(&self) -> Option<&'a str> {
        self.property("sz")
            .and_then(|sz| sz.w_attr("val"))
            .filter(|v| !v.is_empty())
    }

    /// The declared font size in half-points, if it parses.
    pub fn font_size(&self) -> Option<u32> {
        self.font_size_raw().and_then(|v| v.trim().parse().ok())
    }

    /// Declared font names in `w:rFonts`, in [`FONT_SLOTS`] order.
    pub fn fonts(&self) -> Vec<&'a str> {
        let Some(fonts) = self.property("rFonts") else {
            return Vec::new();
        };
        FONT_SLOTS
            .iter()
            .filter_map(|slot| fonts.w_attr(slot))
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// The highlight color, if any.
    pub fn highlight(&self) -> Option<&'a str> {
        self.property("highlight").and_then(|h| h.w_attr("val"))
    }

    /// Concatenated text of the run's own `w:t` children.
    pub fn text(&self) -> String {
        self.el.w_children("t").map(|t| t.text()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(props: Element, text: &str) -> Element {
        Element::w("r")
            .with_child(props)
            .with_child(Element::w("t").with_text(text))
    }

    #[test]
    fn test_bold_values() {
        let bold = run(Element::w("rPr").with_child(Element::w("b")), "x");
        assert!(Run::new(&bold).unwrap().is_bold());

        for off in ["0", "false"] {
            let el = run(
                Element::w("rPr").with_child(Element::w("b").with_w_attr("val", off)),
                "x",
            );
            assert!(!Run::new(&el).unwrap().is_bold());
        }

        let plain = run(Element::w("rPr"), "x");
        assert!(!Run::new(&plain).unwrap().is_bold());
    }

    #[test]
    fn test_font_size() {
        let el = run(
            Element::w("rPr").with_child(Element::w("sz").with_w_attr("val", "24")),
            "x",
        );
        let r = Run::new(&el).unwrap();
        assert_eq!(r.font_size_raw(), Some("24"));
        assert_eq!(r.font_size(), Some(24));

        let el = run(
            Element::w("rPr").with_child(Element::w("sz").with_w_attr("val", "big")),
            "x",
        );
        assert_eq!(Run::new(&el).unwrap().font_size(), None);
    }

    #[test]
    fn test_fonts_in_slot_order() {
        let el = run(
            Element::w("rPr").with_child(
                Element::w("rFonts")
                    .with_w_attr("cs", "Times")
                    .with_w_attr("ascii", "Calibri"),
            ),
            "x",
        );
        assert_eq!(Run::new(&el).unwrap().fonts(), vec!["Calibri", "Times"]);
    }

    #[test]
    fn test_not_a_run() {
        assert!(Run::new(&Element::w("p")).is_none());
    }
}
