//! The branded template contract.
//!
//! Style ids, numbering ids, colors and section layout fallbacks shared by
//! the parser (to recognize styles), the auditor (to scope rules) and the
//! compositor (to emit them).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Named constants of the branded template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    /// Paragraph style id of level-1 headings
    pub heading1_style: String,

    /// Paragraph style id of level-2 headings (also used for table cells)
    pub heading2_style: String,

    /// Paragraph style id of body copy
    pub body_style: String,

    /// Paragraph style id of the cover title
    pub cover_title_style: String,

    /// Numbering definition id for bold (lead-in) bullets
    pub bullet_bold_num_id: String,

    /// Numbering definition id for plain bullets
    pub bullet_num_id: String,

    /// Fill color of table header rows
    pub table_header_fill: String,

    /// Fill color of table data rows
    pub table_body_fill: String,

    /// Color of table borders
    pub table_border_color: String,

    /// Total table width in twips, split evenly when no widths are declared
    pub table_width: u32,

    /// Run highlight applied by the audit
    pub highlight_color: String,

    /// Paragraph shading fill applied by the audit
    pub highlight_fill: String,

    /// Section boundaries used when the template has too few section breaks
    pub layout: SectionLayout,
}

impl StyleSheet {
    /// Create the default style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a style sheet from a JSON file.
    ///
    /// Missing keys take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read style sheet {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&data)
    }

    /// Parse a style sheet from JSON text.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let sheet: Self = serde_json::from_str(data)
            .map_err(|e| Error::Config(format!("invalid style sheet: {}", e)))?;
        sheet.validate()?;
        Ok(sheet)
    }

    /// Check that ids are non-empty and the layout is consistent.
    pub fn validate(&self) -> Result<()> {
        let ids = [
            ("heading1_style", &self.heading1_style),
            ("heading2_style", &self.heading2_style),
            ("body_style", &self.body_style),
            ("cover_title_style", &self.cover_title_style),
            ("bullet_bold_num_id", &self.bullet_bold_num_id),
            ("bullet_num_id", &self.bullet_num_id),
        ];
        for (name, value) in ids {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }

        if self.table_width == 0 {
            return Err(Error::Config("table_width must be positive".into()));
        }

        if self.layout.back_start <= self.layout.cover_end + 1 {
            return Err(Error::Config(format!(
                "layout.back_start ({}) must leave a break paragraph after layout.cover_end ({})",
                self.layout.back_start, self.layout.cover_end
            )));
        }

        Ok(())
    }

    /// Style ids the template is expected to define.
    pub fn style_ids(&self) -> [&str; 4] {
        [
            self.heading1_style.as_str(),
            self.heading2_style.as_str(),
            self.body_style.as_str(),
            self.cover_title_style.as_str(),
        ]
    }

    /// Numbering ids the template is expected to define.
    pub fn num_ids(&self) -> [&str; 2] {
        [self.bullet_bold_num_id.as_str(), self.bullet_num_id.as_str()]
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            heading1_style: "HeadingStyle1-18pt".to_string(),
            heading2_style: "HeadingStyle2-14pt".to_string(),
            body_style: "BodyCopy-Arial10pt".to_string(),
            cover_title_style: "CoverText-Aprial18pt".to_string(),
            bullet_bold_num_id: "56".to_string(),
            bullet_num_id: "55".to_string(),
            table_header_fill: "F5A800".to_string(),
            table_body_fill: "FDF1E7".to_string(),
            table_border_color: "011E41".to_string(),
            table_width: 9164,
            highlight_color: "yellow".to_string(),
            highlight_fill: "FFFF00".to_string(),
            layout: SectionLayout::default(),
        }
    }
}

/// Fallback paragraph indices of the template sections.
///
/// Indices count top-level paragraphs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLayout {
    /// Last paragraph of the cover (inclusive)
    pub cover_end: usize,

    /// First paragraph of the back section; the paragraph before it is the
    /// content break
    pub back_start: usize,
}

impl SectionLayout {
    /// Index of the paragraph closing the content section.
    pub fn content_break(&self) -> usize {
        self.back_start.saturating_sub(1)
    }
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            cover_end: 6,
            back_start: 180,
        }
    }
}
