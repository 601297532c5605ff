//! OOXML package (ZIP container) I/O.
//!
//! A package is unpacked into an isolated scratch directory, edited part by
//! part and repacked into a new archive. Scratch directories and produced
//! artifacts are owned by RAII handles so they are released on every exit
//! path, including errors.

mod archive;
mod artifact;

pub use archive::{read_part_from_archive, repack, unpack, CONTENT_TYPES_PART};
pub use artifact::{copy_file, ensure_distinct, Artifact};

use crate::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Part name of the main WordprocessingML document.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";
/// Part name of the style definitions.
pub const STYLES_PART: &str = "word/styles.xml";
/// Part name of the numbering definitions.
pub const NUMBERING_PART: &str = "word/numbering.xml";

/// An unpacked package living in its own scratch directory.
///
/// The scratch directory is removed when the package is dropped.
#[derive(Debug)]
pub struct Package {
    dir: TempDir,
}

impl Package {
    /// Unpack an archive into a fresh scratch directory.
    pub fn unpack<P: AsRef<Path>>(archive: P) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("docbrand-").tempdir()?;
        let entries = unpack(archive.as_ref(), dir.path())?;
        log::debug!(
            "Unpacked {} entries from {} into {}",
            entries,
            archive.as_ref().display(),
            dir.path().display()
        );
        Ok(Self { dir })
    }

    /// Root of the scratch directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Filesystem path of a part (`/`-separated part name).
    pub fn part_path(&self, name: &str) -> PathBuf {
        name.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.dir.path().to_path_buf(), |path, segment| {
                path.join(segment)
            })
    }

    /// Check whether a part exists.
    pub fn has_part(&self, name: &str) -> bool {
        self.part_path(name).is_file()
    }

    /// Read a part, returning `None` if it does not exist.
    pub fn read_part(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.part_path(name)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write (or replace) a part.
    pub fn write_part(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.part_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }

    /// Repack the scratch directory into an archive at `dest`.
    ///
    /// Returns the number of entries written.
    pub fn repack<P: AsRef<Path>>(&self, dest: P) -> Result<usize> {
        repack(self.dir.path(), dest.as_ref())
    }
}
