//! In-place paragraph edits.

use super::schema::{PPR_ORDER, RPR_ORDER};
use crate::xml::{ns, Element, Node, QName};

/// Run children that render text or text-like content.
const TEXT_BEARING: &[&str] = &[
    "t",
    "tab",
    "br",
    "cr",
    "sym",
    "noBreakHyphen",
    "softHyphen",
];

/// Paragraph highlight colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight<'a> {
    /// `w:highlight/@w:val` set on every run
    pub run_color: &'a str,
    /// `w:shd/@w:fill` set on the paragraph
    pub paragraph_fill: &'a str,
}

/// Mark a paragraph with a highlight on every direct run and a shading on
/// the paragraph.
///
/// Properties are inserted in schema order. Applying the same highlight
/// twice leaves the paragraph unchanged.
pub fn highlight_paragraph(p: &mut Element, highlight: Highlight<'_>) {
    for run in p.elements_mut().filter(|el| el.is_w("r")) {
        run.ensure_leading_w_child("rPr")
            .ensure_w_child("highlight", RPR_ORDER)
            .set_w_attr("val", highlight.run_color);
    }

    let shd = p
        .ensure_leading_w_child("pPr")
        .ensure_w_child("shd", PPR_ORDER);
    shd.set_w_attr("val", "clear");
    shd.set_w_attr("color", "auto");
    shd.set_w_attr("fill", highlight.paragraph_fill);
}

/// Remove every direct run, keeping paragraph properties.
pub fn strip_runs(p: &mut Element) {
    p.remove_elements(|el| el.is_w("r"));
}

/// Replace the visible text of a paragraph with `text`.
///
/// The first direct run keeps its `w:rPr`; its first `w:t` receives the new
/// text and its other text-bearing children are removed, as are all later
/// direct runs. Returns `false` if the paragraph has no run.
pub fn replace_text(p: &mut Element, text: &str) -> bool {
    let mut seen_run = false;
    p.children.retain(|node| {
        if !node.is_w("r") {
            return true;
        }
        let keep = !seen_run;
        seen_run = true;
        keep
    });

    let Some(run) = p.elements_mut().find(|el| el.is_w("r")) else {
        return false;
    };

    let mut seen_text = false;
    run.children.retain(|node| match node {
        Node::Element(el) if el.is_w("t") => {
            let keep = !seen_text;
            seen_text = true;
            keep
        }
        Node::Element(el) => !TEXT_BEARING.iter().any(|name| el.is_w(name)),
        _ => true,
    });

    if run.w_child("t").is_none() {
        run.children.push(Element::w("t").into());
    }
    if let Some(t) = run.w_child_mut("t") {
        t.set_text(text);
        t.set_attr(QName::new(ns::XML, "space"), "preserve");
    }
    true
}
