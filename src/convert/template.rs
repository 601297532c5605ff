//! Template inspection.
//!
//! Reports which parts of the style sheet contract a template does not
//! fulfil. Gaps are never fatal: Word falls back to default formatting for
//! unknown style and numbering ids.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::detect::ensure_zip_package;
use crate::error::{Error, Result};
use crate::package::{read_part_from_archive, MAIN_DOCUMENT_PART, NUMBERING_PART, STYLES_PART};
use crate::style::StyleSheet;
use crate::wordml;
use crate::xml::{Element, XmlDocument};

use super::sections::SectionBounds;

/// Result of inspecting a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateReport {
    /// Top-level paragraphs in the template body
    pub paragraph_count: usize,

    /// Whether section break markers delimit the content region
    pub section_markers: bool,

    /// Style ids from the style sheet that `styles.xml` does not define
    pub missing_styles: Vec<String>,

    /// Numbering ids from the style sheet that `numbering.xml` does not define
    pub missing_num_ids: Vec<String>,
}

impl TemplateReport {
    /// Check whether every style and numbering id is defined.
    pub fn is_complete(&self) -> bool {
        self.missing_styles.is_empty() && self.missing_num_ids.is_empty()
    }

    /// Log every gap as a warning.
    pub fn log_warnings(&self) {
        for id in &self.missing_styles {
            log::warn!("Template does not define paragraph style '{}'", id);
        }
        for id in &self.missing_num_ids {
            log::warn!("Template does not define numbering id '{}'", id);
        }
    }
}

/// Inspect a template package against a style sheet.
///
/// # Errors
///
/// `Error::TemplateCorrupt` if the main document is missing, malformed, has
/// no body or its sections cannot be located.
pub fn inspect_template<P: AsRef<Path>>(path: P, styles: &StyleSheet) -> Result<TemplateReport> {
    let path = path.as_ref();
    ensure_zip_package(path)?;

    let data = read_part_from_archive(path, MAIN_DOCUMENT_PART)?
        .ok_or_else(|| Error::TemplateCorrupt(format!("missing {}", MAIN_DOCUMENT_PART)))?;
    let document = parse_template_document(&data)?;
    let bounds = locate_sections(&document, styles)?;

    inspect_parts(
        &document,
        bounds,
        read_part_from_archive(path, STYLES_PART)?.as_deref(),
        read_part_from_archive(path, NUMBERING_PART)?.as_deref(),
        styles,
    )
}

/// Parse a template's main document, reporting every failure as corruption.
pub(crate) fn parse_template_document(data: &[u8]) -> Result<XmlDocument> {
    let document = XmlDocument::parse(data).map_err(|e| match e {
        Error::Parse(msg) => Error::TemplateCorrupt(msg),
        other => other,
    })?;
    if wordml::body(&document).is_none() {
        return Err(Error::TemplateCorrupt("main document has no w:body".into()));
    }
    Ok(document)
}

/// Locate the section boundaries of a parsed template main document.
pub(crate) fn locate_sections(document: &XmlDocument, styles: &StyleSheet) -> Result<SectionBounds> {
    let body = wordml::body(document)
        .ok_or_else(|| Error::TemplateCorrupt("main document has no w:body".into()))?;
    SectionBounds::locate(body, &styles.layout)
}

/// Build a report from already loaded parts and located sections.
pub(crate) fn inspect_parts(
    document: &XmlDocument,
    bounds: SectionBounds,
    styles_part: Option<&[u8]>,
    numbering_part: Option<&[u8]>,
    styles: &StyleSheet,
) -> Result<TemplateReport> {
    let body = wordml::body(document)
        .ok_or_else(|| Error::TemplateCorrupt("main document has no w:body".into()))?;

    let defined_styles = defined_ids(styles_part, STYLES_PART, "style", "styleId");
    let defined_nums = defined_ids(numbering_part, NUMBERING_PART, "num", "numId");

    Ok(TemplateReport {
        paragraph_count: wordml::paragraphs(body).count(),
        section_markers: bounds.from_markers,
        missing_styles: missing(&styles.style_ids(), &defined_styles),
        missing_num_ids: missing(&styles.num_ids(), &defined_nums),
    })
}

/// Ids declared by the `w:` children named `local` of a part's root.
fn defined_ids(part: Option<&[u8]>, name: &str, local: &str, attr: &str) -> HashSet<String> {
    let Some(data) = part else {
        log::debug!("Template has no {}", name);
        return HashSet::new();
    };
    match XmlDocument::parse(data) {
        Ok(doc) => doc
            .root
            .w_children(local)
            .filter_map(|el: &Element| el.w_attr(attr))
            .map(str::to_string)
            .collect(),
        Err(e) => {
            log::warn!("Cannot read template {}: {}", name, e);
            HashSet::new()
        }
    }
}

fn missing(wanted: &[&str], defined: &HashSet<String>) -> Vec<String> {
    wanted
        .iter()
        .filter(|id| !defined.contains(**id))
        .map(|id| id.to_string())
        .collect()
}
