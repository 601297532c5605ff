//! Table (`w:tbl`) view.

use super::paragraph::Paragraph;
use crate::xml::Element;

/// Read-only view of a `w:tbl` element.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    el: &'a Element,
}

impl<'a> Table<'a> {
    /// Wrap an element, returning `None` unless it is a `w:tbl`.
    pub fn new(el: &'a Element) -> Option<Self> {
        el.is_w("tbl").then_some(Self { el })
    }

    /// The underlying element.
    pub fn element(&self) -> &'a Element {
        self.el
    }

    /// Declared `w:gridCol` widths in twips, one per grid column.
    ///
    /// A grid with any missing, non-numeric or zero width is unusable as a
    /// whole and yields no widths, so positions never shift.
    pub fn grid_widths(&self) -> Vec<u32> {
        let Some(grid) = self.el.w_child("tblGrid") else {
            return Vec::new();
        };
        grid.w_children("gridCol")
            .map(|col| {
                col.w_attr("w")
                    .and_then(|w| w.trim().parse::<u32>().ok())
                    .filter(|w| *w > 0)
            })
            .collect::<Option<Vec<u32>>>()
            .unwrap_or_default()
    }

    /// Cell texts per row; rows without cells are left out.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.el
            .w_children("tr")
            .map(|tr| tr.w_children("tc").map(cell_text).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect()
    }
}

/// Text of a cell: trimmed non-empty paragraph texts joined with `\n`.
pub fn cell_text(tc: &Element) -> String {
    tc.elements()
        .filter_map(Paragraph::new)
        .map(|p| p.text())
        .filter_map(|text| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
