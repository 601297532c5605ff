//! Template compositor.
//!
//! Re-renders the content of a user document inside a branded template:
//! the template's cover and back sections are kept as they are, its content
//! region is replaced with paragraphs and tables built from the parsed
//! document, and the cover title is optionally replaced.
//!
//! # Example
//!
//! ```no_run
//! use docbrand::convert::Compositor;
//!
//! let compositor = Compositor::new("branded_template.docx");
//! compositor.convert("notes.docx", "notes_branded.docx", Some("Annual Report"))?;
//! # Ok::<(), docbrand::Error>(())
//! ```

mod builders;
mod options;
mod sections;
mod template;

pub use builders::{spacer, strip_bullet, ContentBuilder, LEADING_SPACERS, TRAILING_SPACERS};
pub use options::ConvertOptions;
pub use sections::{SectionBounds, Sections};
pub use template::{inspect_template, TemplateReport};

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::ParsedDocument;
use crate::package::{copy_file, ensure_distinct, Artifact, Package, MAIN_DOCUMENT_PART, NUMBERING_PART, STYLES_PART};
use crate::parser::{DocxParser, ParseOptions};
use crate::wordml;
use crate::xml::{ns, XmlDocument};

use template::{inspect_parts, locate_sections, parse_template_document};

/// Composes parsed documents into a branded template.
pub struct Compositor {
    template: PathBuf,
    options: ConvertOptions,
}

impl Compositor {
    /// Create a compositor for the template at `template`.
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self::with_options(template, ConvertOptions::default())
    }

    /// Create a compositor with custom options.
    pub fn with_options(template: impl Into<PathBuf>, options: ConvertOptions) -> Self {
        Self {
            template: template.into(),
            options,
        }
    }

    /// Path of the template.
    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert `input` into the template and write the result to `output`.
    ///
    /// A document without content produces an unmodified copy of the
    /// template. On error no output file is left behind.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        title: Option<&str>,
    ) -> Result<()> {
        let input = input.as_ref();
        ensure_distinct(input, output.as_ref())?;
        let parse_options = ParseOptions::new().with_styles(self.options.styles.clone());
        let document = DocxParser::open_with_options(input, parse_options)?.parse()?;
        self.compose(&document, output, title)?;

        log::info!(
            "Converted {} ({} blocks) into {}",
            input.display(),
            document.len(),
            self.template.display()
        );
        Ok(())
    }

    /// Convert `input` into a fresh temporary artifact.
    pub fn convert_to_artifact<P: AsRef<Path>>(&self, input: P, title: Option<&str>) -> Result<Artifact> {
        let artifact = Artifact::new()?;
        self.convert(input, artifact.path(), title)?;
        Ok(artifact)
    }

    /// Compose an already parsed document into the template.
    pub fn compose<P: AsRef<Path>>(
        &self,
        document: &ParsedDocument,
        output: P,
        title: Option<&str>,
    ) -> Result<()> {
        let output = output.as_ref();
        ensure_distinct(&self.template, output)?;

        if document.is_empty() {
            log::warn!("No content found in the input document, copying the template");
            return copy_file(&self.template, output);
        }

        let package = Package::unpack(&self.template)?;
        let data = package
            .read_part(MAIN_DOCUMENT_PART)?
            .ok_or_else(|| Error::TemplateCorrupt(format!("missing {}", MAIN_DOCUMENT_PART)))?;
        let mut main = parse_template_document(&data)?;
        let bounds = locate_sections(&main, &self.options.styles)?;

        let report = inspect_parts(
            &main,
            bounds,
            package.read_part(STYLES_PART)?.as_deref(),
            package.read_part(NUMBERING_PART)?.as_deref(),
            &self.options.styles,
        )?;
        report.log_warnings();

        self.compose_sections(&mut main, document, title, bounds)?;

        package.write_part(MAIN_DOCUMENT_PART, &main.to_bytes()?)?;
        package.repack(output)?;
        Ok(())
    }

    /// Replace the content region of a parsed template main document.
    ///
    /// Returns the section boundaries that were used.
    pub fn compose_document(
        &self,
        template: &mut XmlDocument,
        document: &ParsedDocument,
        title: Option<&str>,
    ) -> Result<SectionBounds> {
        let bounds = locate_sections(template, &self.options.styles)?;
        self.compose_sections(template, document, title, bounds)?;
        Ok(bounds)
    }

    /// Replace the content region along already located boundaries.
    fn compose_sections(
        &self,
        template: &mut XmlDocument,
        document: &ParsedDocument,
        title: Option<&str>,
        bounds: SectionBounds,
    ) -> Result<()> {
        let styles = &self.options.styles;
        let body = wordml::body_mut(template)
            .ok_or_else(|| Error::TemplateCorrupt("main document has no w:body".into()))?;

        let mut sections = Sections::split(body, bounds)?;

        if let Some(title) = self.options.effective_title(title) {
            if !sections.set_title(title, styles) {
                log::warn!(
                    "No cover paragraph in style '{}' with text, title not set",
                    styles.cover_title_style
                );
            }
        }

        let content = ContentBuilder::new(styles).build(document);
        log::debug!("Built {} content region elements", content.len());
        body.children = sections.reassemble(content);

        template.declare_namespace("w", ns::W);
        Ok(())
    }
}
