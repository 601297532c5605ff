//! Container flavor detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Container flavor of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// ZIP archive (the only supported flavor)
    Zip,
    /// Flat OPC: the whole package as a single XML document
    FlatXml,
    /// Legacy OLE compound file (`.doc`)
    Compound,
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerKind::Zip => write!(f, "ZIP package"),
            ContainerKind::FlatXml => write!(f, "flat XML package"),
            ContainerKind::Compound => write!(f, "OLE compound file"),
        }
    }
}

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// ZIP end-of-central-directory magic, the first bytes of an empty archive
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";
/// OLE compound document magic
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Detect the container flavor from a file path.
///
/// # Returns
/// * `Ok(ContainerKind)` if the header matches a known flavor
/// * `Err(Error::Container)` if the file is empty or unrecognized
pub fn detect_container_from_path<P: AsRef<Path>>(path: P) -> Result<ContainerKind> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(16);
    reader.by_ref().take(16).read_to_end(&mut header)?;
    detect_container_from_bytes(&header)
}

/// Detect the container flavor from the leading bytes of a file.
pub fn detect_container_from_bytes(data: &[u8]) -> Result<ContainerKind> {
    if data.is_empty() {
        return Err(Error::Container("file is empty".into()));
    }

    if data.starts_with(ZIP_MAGIC) || data.starts_with(ZIP_EMPTY_MAGIC) {
        return Ok(ContainerKind::Zip);
    }

    if data.starts_with(OLE_MAGIC) {
        return Ok(ContainerKind::Compound);
    }

    let text = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let text = trim_ascii_start(text);
    if text.starts_with(b"<?xml") || text.starts_with(b"<pkg:package") {
        return Ok(ContainerKind::FlatXml);
    }

    Err(Error::Container("not a ZIP archive".into()))
}

/// Require the input to be a ZIP package.
///
/// Other recognized flavors are rejected with `Error::UnsupportedInput`.
pub fn ensure_zip_package<P: AsRef<Path>>(path: P) -> Result<()> {
    match detect_container_from_path(path)? {
        ContainerKind::Zip => Ok(()),
        other => Err(Error::UnsupportedInput(format!(
            "{} is not supported, expected a .docx ZIP package",
            other
        ))),
    }
}

/// Check if a file looks like a ZIP package.
pub fn is_zip_package<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_container_from_path(path), Ok(ContainerKind::Zip))
}

/// Name the office application a package belongs to when it is not a
/// WordprocessingML package, judging by its part names.
pub fn foreign_package_kind<'a, I>(part_names: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    for name in part_names {
        if name.starts_with("xl/") {
            return Some("spreadsheet");
        }
        if name.starts_with("ppt/") {
            return Some("presentation");
        }
    }
    None
}

fn trim_ascii_start(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    &data[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_zip() {
        let data = b"PK\x03\x04\x14\x00\x06\x00";
        assert_eq!(
            detect_container_from_bytes(data).unwrap(),
            ContainerKind::Zip
        );
    }

    #[test]
    fn test_detect_flat_xml() {
        let data = b"\xEF\xBB\xBF<?xml version=\"1.0\"?><pkg:package/>";
        assert_eq!(
            detect_container_from_bytes(data).unwrap(),
            ContainerKind::FlatXml
        );
    }

    #[test]
    fn test_detect_compound() {
        let data = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00];
        assert_eq!(
            detect_container_from_bytes(&data).unwrap(),
            ContainerKind::Compound
        );
    }

    #[test]
    fn test_detect_empty() {
        let result = detect_container_from_bytes(b"");
        assert!(matches!(result, Err(Error::Container(_))));
    }

    #[test]
    fn test_detect_unknown() {
        let result = detect_container_from_bytes(b"%PDF-1.7\n");
        assert!(matches!(result, Err(Error::Container(_))));
    }

    #[test]
    fn test_foreign_package_kind() {
        let parts = ["[Content_Types].xml", "xl/workbook.xml"];
        assert_eq!(foreign_package_kind(parts), Some("spreadsheet"));

        let parts = ["[Content_Types].xml", "word/document.xml"];
        assert_eq!(foreign_package_kind(parts), None);
    }
}
