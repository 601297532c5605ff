//! Output artifacts handed to callers.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// A produced `.docx` file owned by the caller.
///
/// The file is deleted when the artifact is dropped unless it has been
/// persisted or kept.
#[derive(Debug)]
pub struct Artifact {
    path: TempPath,
}

impl Artifact {
    /// Reserve a fresh, empty artifact file in the system temp directory.
    pub fn new() -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("docbrand-")
            .suffix(".docx")
            .tempfile()?;
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    /// Path of the artifact file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the artifact to `dest`, replacing any file there.
    ///
    /// Falls back to a copy when the rename crosses filesystems.
    pub fn persist<P: AsRef<Path>>(self, dest: P) -> Result<()> {
        let dest = dest.as_ref();
        match self.path.persist(dest) {
            Ok(()) => Ok(()),
            Err(err) => {
                log::debug!("Rename to {} failed ({}), copying", dest.display(), err.error);
                copy_file(&err.path, dest)
            }
        }
    }

    /// Stop managing the file and return its path.
    pub fn keep(self) -> Result<PathBuf> {
        self.path.keep().map_err(|e| e.error.into())
    }
}

/// Copy `src` to `dest`, removing a partially written `dest` on failure.
///
/// `src` is opened before `dest` is touched, so an unreadable source leaves
/// an existing `dest` in place.
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    let mut source = BufReader::new(File::open(src)?);

    let guard = OutputGuard::new(dest);
    let mut out = BufWriter::new(File::create(dest)?);
    io::copy(&mut source, &mut out)?;
    out.flush()?;
    guard.commit();
    Ok(())
}

/// Refuse to write `output` over `input`.
///
/// # Errors
///
/// `Error::Config` if both paths name the same existing file.
pub fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    if !output.exists() {
        return Ok(());
    }
    let same = match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        return Err(Error::Config(format!(
            "output {} would overwrite an input",
            output.display()
        )));
    }
    Ok(())
}

/// Removes a partially written output file unless committed.
pub(crate) struct OutputGuard<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> OutputGuard<'a> {
    pub(crate) fn new(path: &'a Path) -> Self {
        Self { path, armed: true }
    }

    pub(crate) fn commit(mut self) {
        self.armed = false;
    }
}

impl Drop for OutputGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.path.exists() {
            if let Err(e) = fs::remove_file(self.path) {
                log::warn!("Failed to remove partial output {}: {}", self.path.display(), e);
            }
        }
    }
}
