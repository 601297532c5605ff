//! # docbrand
//!
//! Brand compliance tooling for Word (WordprocessingML) documents.
//!
//! The library works on `.docx` packages in two ways:
//!
//! - **Audit**: check every top-level paragraph against the brand rules
//!   (font, sizes, typed bullets, line spacing, list indents), highlight the
//!   violating paragraphs and report the findings.
//! - **Convert**: extract headings, bullets, tables and body copy from a
//!   document and re-render them inside a branded template, keeping the
//!   template's cover and back sections.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docbrand::{audit, convert};
//!
//! fn main() -> docbrand::Result<()> {
//!     let result = audit("draft.docx", "draft_audit.docx")?;
//!     println!("{}", result.summary());
//!
//!     convert("draft.docx", "template.docx", "draft_branded.docx", Some("Annual Report"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Namespace-robust XML access**: parts are read by namespace URI, not prefix
//! - **Schema-ordered edits**: inserted properties keep the order Word expects
//! - **Configurable contract**: style ids, numbering ids and colors live in a
//!   JSON-loadable [`StyleSheet`]
//! - **Clean outputs**: scratch areas and partial files never outlive a call

pub mod audit;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod package;
pub mod parser;
pub mod render;
pub mod style;
pub mod wordml;
pub mod xml;

// Re-export commonly used types
pub use audit::{AuditOptions, Auditor, RuleSet};
pub use convert::{inspect_template, Compositor, ConvertOptions, TemplateReport};
pub use detect::{detect_container_from_bytes, detect_container_from_path, ContainerKind};
pub use error::{Error, Result};
pub use model::{
    AuditFinding, AuditResult, Block, BlockKind, ContentBlock, ParsedDocument, RuleKind,
    TableBlock,
};
pub use package::Artifact;
pub use parser::{DocxParser, ParseOptions};
pub use render::JsonFormat;
pub use style::{SectionLayout, StyleSheet};

use std::path::{Path, PathBuf};

/// Parse a `.docx` file into content blocks.
///
/// # Example
///
/// ```no_run
/// use docbrand::parse_file;
///
/// let doc = parse_file("notes.docx").unwrap();
/// println!("Blocks: {}", doc.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedDocument> {
    DocxParser::open(path)?.parse()
}

/// Parse a `.docx` file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<ParsedDocument> {
    DocxParser::open_with_options(path, options)?.parse()
}

/// Audit `input` with the default rules, writing the highlighted copy to
/// `output`.
///
/// # Example
///
/// ```no_run
/// let result = docbrand::audit("draft.docx", "draft_audit.docx")?;
/// for finding in &result.findings {
///     println!("P{}: {}", finding.paragraph_index, finding.description);
/// }
/// # Ok::<(), docbrand::Error>(())
/// ```
pub fn audit<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<AuditResult> {
    Auditor::new().audit(input, output)
}

/// Audit `input` into a temporary artifact.
pub fn audit_to_artifact<P: AsRef<Path>>(input: P) -> Result<(Artifact, AuditResult)> {
    Auditor::new().audit_to_artifact(input)
}

/// Convert `input` into `template`, writing the branded document to
/// `output`.
///
/// # Example
///
/// ```no_run
/// docbrand::convert("notes.docx", "template.docx", "branded.docx", Some("Annual Report"))?;
/// # Ok::<(), docbrand::Error>(())
/// ```
pub fn convert<P, T, Q>(input: P, template: T, output: Q, title: Option<&str>) -> Result<()>
where
    P: AsRef<Path>,
    T: AsRef<Path>,
    Q: AsRef<Path>,
{
    Compositor::new(template.as_ref()).convert(input, output, title)
}

/// Convert `input` into `template`, producing a temporary artifact.
pub fn convert_to_artifact<P: AsRef<Path>, T: AsRef<Path>>(
    input: P,
    template: T,
    title: Option<&str>,
) -> Result<Artifact> {
    Compositor::new(template.as_ref()).convert_to_artifact(input, title)
}

/// Check whether a template file exists.
pub fn template_is_available<P: AsRef<Path>>(template: P) -> bool {
    template.as_ref().is_file()
}

/// Builder bundling a style sheet, audit rules and a template.
///
/// # Example
///
/// ```no_run
/// use docbrand::{Docbrand, StyleSheet};
///
/// let styles = StyleSheet::from_json_file("brand.json")?;
/// let docbrand = Docbrand::new()
///     .with_styles(styles)
///     .with_template("template.docx")
///     .with_title("Annual Report");
///
/// let result = docbrand.audit("draft.docx", "draft_audit.docx")?;
/// if result.is_clean() {
///     docbrand.convert("draft.docx", "draft_branded.docx")?;
/// }
/// # Ok::<(), docbrand::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Docbrand {
    styles: StyleSheet,
    rules: RuleSet,
    template: Option<PathBuf>,
    title: Option<String>,
    merge_descriptions: bool,
}

impl Docbrand {
    /// Create a builder with the default contract and no template.
    pub fn new() -> Self {
        Self {
            styles: StyleSheet::default(),
            rules: RuleSet::default(),
            template: None,
            title: None,
            merge_descriptions: true,
        }
    }

    /// Set the style sheet shared by parsing, auditing and converting.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Set the audit thresholds.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Set the branded template.
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set the cover title used by conversions.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Keep every paragraph as its own block when parsing.
    pub fn flat(mut self) -> Self {
        self.merge_descriptions = false;
        self
    }

    /// Style sheet in use.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Parsing options derived from the builder.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_styles(self.styles.clone())
            .with_merge_descriptions(self.merge_descriptions)
    }

    /// Auditor configured from the builder.
    pub fn auditor(&self) -> Auditor {
        Auditor::with_options(
            AuditOptions::new()
                .with_styles(self.styles.clone())
                .with_rules(self.rules.clone()),
        )
    }

    /// Compositor configured from the builder.
    ///
    /// # Errors
    ///
    /// `Error::Config` if no template was set.
    pub fn compositor(&self) -> Result<Compositor> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| Error::Config("no template configured".into()))?;

        let mut options = ConvertOptions::new().with_styles(self.styles.clone());
        options.title = self.title.clone();
        Ok(Compositor::with_options(template, options))
    }

    /// Parse a document.
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<ParsedDocument> {
        parse_file_with_options(path, self.parse_options())
    }

    /// Audit a document.
    pub fn audit<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<AuditResult> {
        self.auditor().audit(input, output)
    }

    /// Audit a document into a temporary artifact.
    pub fn audit_to_artifact<P: AsRef<Path>>(&self, input: P) -> Result<(Artifact, AuditResult)> {
        self.auditor().audit_to_artifact(input)
    }

    /// Convert a document into the template.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<()> {
        let compositor = self.compositor()?;
        package::ensure_distinct(input.as_ref(), output.as_ref())?;
        let document = self.parse(&input)?;
        compositor.compose(&document, output, None)
    }

    /// Convert a document into a temporary artifact.
    pub fn convert_to_artifact<P: AsRef<Path>>(&self, input: P) -> Result<Artifact> {
        let artifact = Artifact::new()?;
        self.convert(input, artifact.path())?;
        Ok(artifact)
    }

    /// Inspect the configured template.
    pub fn inspect_template(&self) -> Result<TemplateReport> {
        let compositor = self.compositor()?;
        inspect_template(compositor.template(), &self.styles)
    }
}

impl Default for Docbrand {
    fn default() -> Self {
        Self::new()
    }
}
