//! Audit rule engine.
//!
//! Checks every non-empty top-level paragraph of a document against the
//! formatting [`rules`], highlights the paragraphs that violate at least one
//! rule and writes the result to a new package. The input is never modified.
//!
//! # Example
//!
//! ```no_run
//! use docbrand::audit::Auditor;
//!
//! let result = Auditor::new().audit("report.docx", "report_audit.docx")?;
//! if !result.is_clean() {
//!     println!("{}", result.summary());
//! }
//! # Ok::<(), docbrand::Error>(())
//! ```

mod options;
pub mod rules;

pub use options::{AuditOptions, RuleSet};
pub use rules::{default_rules, ParagraphContext, Rule};

use std::path::Path;

use crate::detect::ensure_zip_package;
use crate::error::{Error, Result};
use crate::model::{AuditFinding, AuditResult};
use crate::package::{copy_file, ensure_distinct, read_part_from_archive, Artifact, Package, MAIN_DOCUMENT_PART};
use crate::wordml::{self, edit, Highlight, Paragraph};
use crate::xml::XmlDocument;

/// Runs the formatting rules over documents.
pub struct Auditor {
    options: AuditOptions,
    rules: Vec<Box<dyn Rule>>,
}

impl Auditor {
    /// Create an auditor with the default rules and options.
    pub fn new() -> Self {
        Self::with_options(AuditOptions::default())
    }

    /// Create an auditor with custom options.
    pub fn with_options(options: AuditOptions) -> Self {
        Self {
            options,
            rules: default_rules(),
        }
    }

    /// Options in use.
    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    /// Audit `input` and write the highlighted copy to `output`.
    ///
    /// A document without findings is copied byte-for-byte. On error no
    /// output file is left behind.
    pub fn audit<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<AuditResult> {
        let input = input.as_ref();
        let output = output.as_ref();
        ensure_distinct(input, output)?;
        ensure_zip_package(input)?;

        let data = read_part_from_archive(input, MAIN_DOCUMENT_PART)?.ok_or_else(|| {
            Error::Parse(format!("{} is missing {}", input.display(), MAIN_DOCUMENT_PART))
        })?;
        let mut doc = XmlDocument::parse(&data)?;
        let result = self.audit_document(&mut doc)?;

        if result.is_clean() {
            copy_file(input, output)?;
        } else {
            let package = Package::unpack(input)?;
            package.write_part(MAIN_DOCUMENT_PART, &doc.to_bytes()?)?;
            package.repack(output)?;
        }

        log::info!(
            "Audited {}: {} finding(s) in {} paragraph(s)",
            input.display(),
            result.len(),
            result.flagged_paragraphs().len()
        );
        Ok(result)
    }

    /// Audit `input` into a fresh temporary artifact.
    pub fn audit_to_artifact<P: AsRef<Path>>(&self, input: P) -> Result<(Artifact, AuditResult)> {
        let artifact = Artifact::new()?;
        let result = self.audit(input, artifact.path())?;
        Ok((artifact, result))
    }

    /// Audit a parsed main document in place, highlighting flagged
    /// paragraphs.
    pub fn audit_document(&self, doc: &mut XmlDocument) -> Result<AuditResult> {
        let body = wordml::body_mut(doc)
            .ok_or_else(|| Error::Parse("main document has no w:body".into()))?;

        let highlight = Highlight {
            run_color: &self.options.styles.highlight_color,
            paragraph_fill: &self.options.styles.highlight_fill,
        };

        let mut result = AuditResult::new();
        let paragraphs = body.elements_mut().filter(|el| el.is_w("p"));
        for (index, el) in paragraphs.enumerate() {
            let findings = match Paragraph::new(el) {
                Some(paragraph) => self.check_paragraph(index, paragraph),
                None => continue,
            };
            if findings.is_empty() {
                continue;
            }
            edit::highlight_paragraph(el, highlight);
            for finding in findings {
                result.add(finding);
            }
        }

        log::debug!("Audit found {} finding(s)", result.len());
        Ok(result)
    }

    /// Run every rule over one paragraph.
    pub fn check_paragraph(&self, index: usize, paragraph: Paragraph<'_>) -> Vec<AuditFinding> {
        let text = paragraph.text();
        if text.trim().is_empty() {
            return Vec::new();
        }

        let ctx = ParagraphContext {
            paragraph,
            text: &text,
            style: paragraph.style_id(),
            styles: &self.options.styles,
            rules: &self.options.rules,
        };

        self.rules
            .iter()
            .flat_map(|rule| {
                rule.check(&ctx)
                    .into_iter()
                    .map(move |description| AuditFinding::new(index, rule.kind(), description))
            })
            .collect()
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}
