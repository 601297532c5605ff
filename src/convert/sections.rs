//! Template section model.
//!
//! The template body holds three sections: the cover, the content region
//! and the back matter. The first two top-level paragraphs carrying a
//! section break (`w:pPr/w:sectPr`) close the cover and the content region;
//! templates with fewer breaks fall back to the paragraph indices of the
//! style sheet's [`SectionLayout`].

use crate::error::{Error, Result};
use crate::style::{SectionLayout, StyleSheet};
use crate::wordml::{edit, Paragraph};
use crate::xml::{Element, Node};

/// Paragraph indices of the section boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBounds {
    /// Last cover paragraph (inclusive)
    pub cover_end: usize,
    /// Paragraph closing the content region
    pub content_break: usize,
    /// Whether the bounds come from section break markers
    pub from_markers: bool,
}

impl SectionBounds {
    /// Locate the section boundaries of a template body.
    ///
    /// # Errors
    ///
    /// `Error::TemplateCorrupt` if the fallback indices do not fit the body.
    pub fn locate(body: &Element, layout: &SectionLayout) -> Result<Self> {
        let paragraphs: Vec<Paragraph<'_>> = body.elements().filter_map(Paragraph::new).collect();

        let markers: Vec<usize> = paragraphs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_section_break())
            .map(|(idx, _)| idx)
            .take(2)
            .collect();

        let bounds = if let [cover_end, content_break] = markers[..] {
            Self {
                cover_end,
                content_break,
                from_markers: true,
            }
        } else {
            log::warn!(
                "Template has {} section break(s), using fallback layout (cover ends at {}, back starts at {})",
                markers.len(),
                layout.cover_end,
                layout.back_start
            );
            Self {
                cover_end: layout.cover_end,
                content_break: layout.content_break(),
                from_markers: false,
            }
        };

        if bounds.content_break >= paragraphs.len() || bounds.cover_end >= bounds.content_break {
            return Err(Error::TemplateCorrupt(format!(
                "section boundaries (cover end {}, content break {}) do not fit {} paragraphs",
                bounds.cover_end,
                bounds.content_break,
                paragraphs.len()
            )));
        }

        log::debug!(
            "Template sections: cover 0..={}, content break {}",
            bounds.cover_end,
            bounds.content_break
        );
        Ok(bounds)
    }
}

/// The preserved parts of a template body, split by position.
#[derive(Debug)]
pub struct Sections {
    /// Body children up to and including the last cover paragraph
    pub cover: Vec<Node>,
    /// The paragraph whose `w:sectPr` lays out the content region
    pub content_break: Element,
    /// Body children after the content break
    pub back: Vec<Node>,
    /// The body-level `w:sectPr` of the final section
    pub final_section: Option<Element>,
}

impl Sections {
    /// Take the body's children apart along `bounds`.
    ///
    /// The template's own content region is dropped; non-paragraph elements
    /// of the cover and back sections keep their positions.
    pub fn split(body: &mut Element, bounds: SectionBounds) -> Result<Self> {
        let mut children = std::mem::take(&mut body.children);

        let final_section = match children.iter().rposition(|n| n.is_w("sectPr")) {
            Some(idx) => match children.remove(idx) {
                Node::Element(el) => Some(el),
                _ => None,
            },
            None => None,
        };

        let positions: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_w("p"))
            .map(|(idx, _)| idx)
            .collect();
        let position = |paragraph: usize| {
            positions.get(paragraph).copied().ok_or_else(|| {
                Error::TemplateCorrupt(format!("template has no paragraph {}", paragraph))
            })
        };
        let cover_end = position(bounds.cover_end)?;
        let content_break = position(bounds.content_break)?;

        let back = children.split_off(content_break + 1);
        let content_break = match children.pop() {
            Some(Node::Element(el)) => el,
            _ => {
                return Err(Error::TemplateCorrupt(
                    "content break is not a paragraph".into(),
                ))
            }
        };
        children.truncate(cover_end + 1);

        Ok(Self {
            cover: children,
            content_break,
            back,
            final_section,
        })
    }

    /// Replace the cover title.
    ///
    /// The first cover paragraph in the cover-title style with visible text
    /// receives `title`. Returns `false` when no such paragraph exists.
    pub fn set_title(&mut self, title: &str, styles: &StyleSheet) -> bool {
        let target = self.cover.iter_mut().filter_map(Node::as_element_mut).find(|el| {
            Paragraph::new(el).is_some_and(|p| {
                p.style_id() == Some(styles.cover_title_style.as_str()) && !p.text().trim().is_empty()
            })
        });

        match target {
            Some(p) => edit::replace_text(p, title),
            None => false,
        }
    }

    /// Rebuild the body children around a new content region:
    /// cover, content, the emptied content break, back, final `w:sectPr`.
    pub fn reassemble(self, content: Vec<Element>) -> Vec<Node> {
        let Self {
            cover,
            mut content_break,
            back,
            final_section,
        } = self;
        edit::strip_runs(&mut content_break);

        let mut children = cover;
        children.reserve(content.len() + back.len() + 2);
        children.extend(content.into_iter().map(Node::Element));
        children.push(Node::Element(content_break));
        children.extend(back);
        children.extend(final_section.map(Node::Element));
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordml;
    use crate::xml::XmlDocument;

    fn template(body: &str) -> XmlDocument {
        XmlDocument::parse(
            format!(
                r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
                body
            )
            .as_bytes(),
        )
        .unwrap()
    }

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
    }

    fn break_para(text: &str) -> String {
        format!(
            r#"<w:p><w:pPr><w:sectPr><w:pgSz w:w="11906"/></w:sectPr></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
            text
        )
    }

    fn marked_template() -> XmlDocument {
        template(&format!(
            "{}<w:tbl/>{}{}{}{}{}<w:sectPr/>",
            para("title"),
            break_para("cover end"),
            para("old content"),
            break_para("content end"),
            para("back"),
            "<w:bookmarkStart/>"
        ))
    }

    fn texts(nodes: &[Node]) -> Vec<String> {
        nodes
            .iter()
            .filter_map(Node::as_element)
            .filter_map(Paragraph::new)
            .map(|p| p.text())
            .collect()
    }

    #[test]
    fn test_locate_by_markers() {
        let doc = marked_template();
        let body = wordml::body(&doc).unwrap();
        let bounds = SectionBounds::locate(body, &SectionLayout::default()).unwrap();
        assert_eq!(
            bounds,
            SectionBounds {
                cover_end: 1,
                content_break: 3,
                from_markers: true
            }
        );
    }

    #[test]
    fn test_fallback_out_of_range_is_corrupt() {
        let doc = template(&para("only"));
        let body = wordml::body(&doc).unwrap();
        assert!(matches!(
            SectionBounds::locate(body, &SectionLayout::default()),
            Err(Error::TemplateCorrupt(_))
        ));
    }

    #[test]
    fn test_fallback_layout() {
        let body = format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}{}{}{}{}<w:sectPr/>",
            para("0"),
            para("cell"),
            para("1"),
            para("2"),
            para("3"),
            para("4"),
            para("5")
        );
        let mut doc = template(&body);
        let layout = SectionLayout {
            cover_end: 1,
            back_start: 4,
        };
        let bounds = SectionBounds::locate(wordml::body(&doc).unwrap(), &layout).unwrap();
        assert_eq!(bounds.cover_end, 1);
        assert_eq!(bounds.content_break, 3);
        assert!(!bounds.from_markers);

        let original: Vec<Node> = wordml::body(&doc).unwrap().children.clone();
        let body = wordml::body_mut(&mut doc).unwrap();
        let sections = Sections::split(body, bounds).unwrap();
        assert_eq!(sections.cover, original[..3]);
        assert_eq!(sections.back, original[5..7]);

        body.children = sections.reassemble(vec![Element::w("p")]);
        assert_eq!(body.children[..3], original[..3]);
        assert_eq!(body.children[5..7], original[5..7]);
        assert_eq!(body.children.last(), original.last());

        let text = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert!(text.contains("<w:t>cell</w:t>"));
        assert!(!text.contains("<w:t>2</w:t>"));
        assert!(!text.contains("<w:t>3</w:t>"));
    }

    #[test]
    fn test_split_and_reassemble() {
        let mut doc = marked_template();
        let body = wordml::body_mut(&mut doc).unwrap();
        let bounds = SectionBounds::locate(body, &SectionLayout::default()).unwrap();
        let sections = Sections::split(body, bounds).unwrap();

        assert_eq!(texts(&sections.cover), vec!["title", "cover end"]);
        assert!(sections.cover.iter().any(|n| n.is_w("tbl")));
        assert_eq!(texts(&sections.back), vec!["back"]);
        assert!(sections.final_section.is_some());

        let content = vec![Element::w("p")];
        body.children = sections.reassemble(content);

        let names: Vec<&str> = body.elements().map(|e| e.name.local.as_str()).collect();
        assert_eq!(names, vec!["p", "tbl", "p", "p", "p", "p", "bookmarkStart", "sectPr"]);

        let content_break = body.elements().nth(4).unwrap();
        assert!(content_break.w_child("r").is_none());
        assert!(content_break.w_path(&["pPr", "sectPr", "pgSz"]).is_some());
    }

    #[test]
    fn test_set_title() {
        let styles = StyleSheet::default();
        let mut doc = template(&format!(
            concat!(
                r#"<w:p><w:pPr><w:pStyle w:val="CoverText-Aprial18pt"/></w:pPr></w:p>"#,
                r#"<w:p><w:pPr><w:pStyle w:val="CoverText-Aprial18pt"/></w:pPr>"#,
                r#"<w:r><w:rPr><w:color w:val="FFFFFF"/></w:rPr><w:t>Old</w:t></w:r><w:r><w:t> Title</w:t></w:r></w:p>"#,
                "{}{}{}"
            ),
            break_para("cover end"),
            break_para("content end"),
            "<w:sectPr/>"
        ));
        let body = wordml::body_mut(&mut doc).unwrap();
        let bounds = SectionBounds::locate(body, &styles.layout).unwrap();
        let mut sections = Sections::split(body, bounds).unwrap();

        assert!(sections.set_title("Annual Report", &styles));
        let title = sections.cover[1].as_element().unwrap();
        let view = Paragraph::new(title).unwrap();
        assert_eq!(view.text(), "Annual Report");
        assert_eq!(view.runs().count(), 1);
        assert!(title.w_path(&["r", "rPr", "color"]).is_some());

        let mut bare = Sections {
            cover: vec![],
            content_break: Element::w("p"),
            back: vec![],
            final_section: None,
        };
        assert!(!bare.set_title("Annual Report", &styles));
    }
}
