//! Unpacking and repacking ZIP archives.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::artifact::OutputGuard;

/// Package part listing content types; written first when repacking.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Extract every entry of `archive` into `dir`, preserving relative paths.
///
/// Entries whose names would escape `dir` are skipped. Returns the number of
/// files written.
///
/// # Errors
///
/// `Error::Container` if the file is not a ZIP archive, contains no entries,
/// or holds encrypted entries.
pub fn unpack(archive: &Path, dir: &Path) -> Result<usize> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file))
        .map_err(|e| Error::Container(format!("cannot open archive: {}", e)))?;

    if zip.len() == 0 {
        return Err(Error::Container("archive is empty".into()));
    }

    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;

        if entry.encrypted() {
            return Err(Error::Container(format!(
                "entry {} is encrypted",
                entry.name()
            )));
        }

        let Some(relative) = entry.enclosed_name() else {
            log::warn!("Skipping entry with unsafe path: {}", entry.name());
            continue;
        };
        let target = dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(&target)?);
        io::copy(&mut entry, &mut out)?;
        written += 1;
    }

    Ok(written)
}

/// Write every regular file under `dir` into a new archive at `archive`.
///
/// Entry names are the `/`-joined paths relative to `dir`; no directory
/// entries are written. `[Content_Types].xml` comes first, the remaining
/// entries follow in sorted walk order. An existing file at `archive` is
/// replaced, and a partially written archive is removed on failure.
pub fn repack(dir: &Path, archive: &Path) -> Result<usize> {
    let mut files = Vec::new();
    collect_files(dir, dir, &mut files)?;
    files.sort_by(|(a, _), (b, _)| entry_order(a).cmp(&entry_order(b)).then_with(|| a.cmp(b)));

    if archive.exists() {
        fs::remove_file(archive)?;
    }

    let guard = OutputGuard::new(archive);
    let mut zip = ZipWriter::new(BufWriter::new(File::create(archive)?));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, path) in &files {
        zip.start_file(name.as_str(), options)?;
        let mut source = BufReader::new(File::open(path)?);
        io::copy(&mut source, &mut zip)?;
    }

    let mut inner = zip.finish()?;
    io::Write::flush(&mut inner)?;
    guard.commit();

    log::debug!("Repacked {} entries into {}", files.len(), archive.display());
    Ok(files.len())
}

/// Read a single part from an archive without extracting it.
///
/// Returns `Ok(None)` when the archive has no such part.
pub fn read_part_from_archive(archive: &Path, name: &str) -> Result<Option<Vec<u8>>> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file))
        .map_err(|e| Error::Container(format!("cannot open archive: {}", e)))?;

    if zip.len() == 0 {
        return Err(Error::Container("archive is empty".into()));
    }

    if !zip.file_names().any(|n| n == name) {
        if let Some(kind) = crate::detect::foreign_package_kind(zip.file_names()) {
            return Err(Error::UnsupportedInput(format!(
                "{} package is not a WordprocessingML document",
                kind
            )));
        }
        return Ok(None);
    }

    let mut entry = zip.by_name(name)?;
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;
    Ok(Some(data))
}

fn entry_order(name: &str) -> u8 {
    if name == CONTENT_TYPES_PART {
        0
    } else {
        1
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<(String, PathBuf)>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(root, &path, out)?;
        } else if file_type.is_file() {
            out.push((entry_name(root, &path)?, path));
        }
    }

    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| Error::Container(format!("{} is outside the package", path.display())))?;

    let segments = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    Ok(segments.join("/"))
}
