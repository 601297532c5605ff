//! Error types for docbrand library.

use std::io;
use thiserror::Error;

/// Result type alias for docbrand operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while auditing or converting documents.
///
/// Every variant is fatal for the current call: no partial output file is
/// left behind when one of these is returned.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a valid or openable ZIP archive.
    #[error("Invalid container: {0}")]
    Container(String),

    /// The main document part is missing or is not well-formed XML.
    #[error("Document parsing error: {0}")]
    Parse(String),

    /// The template lacks a required part or its section layout cannot be located.
    #[error("Template is corrupt: {0}")]
    TemplateCorrupt(String),

    /// The input is a container flavor other than a WordprocessingML ZIP package.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Error rendering a report (text or JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid configuration (style sheet file, option values).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Container(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Parse("missing word/document.xml".into());
        assert_eq!(
            err.to_string(),
            "Document parsing error: missing word/document.xml"
        );

        let err = Error::TemplateCorrupt("no w:body element".into());
        assert_eq!(err.to_string(), "Template is corrupt: no w:body element");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: Error = zip::result::ZipError::InvalidArchive("bad magic".into()).into();
        assert!(matches!(err, Error::Container(_)));

        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let err: Error = zip::result::ZipError::Io(io_err).into();
        assert!(matches!(err, Error::Io(_)));
    }
}
