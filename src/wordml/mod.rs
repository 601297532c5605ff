//! Typed WordprocessingML views over the XML tree.
//!
//! Views borrow elements of an [`XmlDocument`](crate::xml::XmlDocument) and
//! answer the questions the parser, auditor and compositor ask (style id,
//! numbering, bold, sizes, text). Mutations live in [`edit`].

pub mod edit;
mod paragraph;
mod run;
pub mod schema;
mod table;

pub use edit::Highlight;
pub use paragraph::Paragraph;
pub use run::{Run, FONT_SLOTS};
pub use table::{cell_text, Table};

use crate::xml::{Element, XmlDocument};

/// The `w:body` element of a main document part.
pub fn body(doc: &XmlDocument) -> Option<&Element> {
    if !doc.root.is_w("document") {
        return None;
    }
    doc.root.w_child("body")
}

/// Mutable form of [`body`].
pub fn body_mut(doc: &mut XmlDocument) -> Option<&mut Element> {
    if !doc.root.is_w("document") {
        return None;
    }
    doc.root.w_child_mut("body")
}

/// Top-level paragraphs of a body, in document order.
pub fn paragraphs(body: &Element) -> impl Iterator<Item = Paragraph<'_>> {
    body.elements().filter_map(Paragraph::new)
}
