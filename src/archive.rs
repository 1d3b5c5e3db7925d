//! ZIP packaging of the build output directory.
//!
//! Every regular file under the source directory becomes one entry named by
//! its path relative to that directory, using `/` separators on every
//! platform. Symlinks to files are stored with their target's contents.
//! Directories are implied by entry names and never stored. The archive
//! itself is skipped when it is written inside the source directory.

use crate::error::{ArchiveError, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Default archive file name, created in the working directory
pub const DEFAULT_ARCHIVE_NAME: &str = "release.zip";

/// What ended up in a finished archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Archive location
    pub path: PathBuf,
    /// Number of file entries written
    pub files: usize,
    /// Size of the archive on disk
    pub bytes: u64,
}

/// Removes the archive file when dropped.
///
/// Create it as soon as the archive path is known so the file is cleaned up
/// no matter which later step fails.
#[derive(Debug)]
pub struct ArchiveGuard {
    path: PathBuf,
}

impl ArchiveGuard {
    /// Take ownership of the archive at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Guarded archive path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArchiveGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}

/// Entry name for `path` relative to `root`, with `/` separators
fn entry_name(root: &Path, path: &Path) -> std::result::Result<String, ArchiveError> {
    let rel = path
        .strip_prefix(root)
        .map_err(|e| ArchiveError::Io(io::Error::other(e)))?;

    Ok(rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

fn write_archive(source: &Path, destination: &Path) -> std::result::Result<ArchiveSummary, ArchiveError> {
    if !source.exists() {
        return Err(ArchiveError::DirectoryNotFound {
            path: source.to_path_buf(),
        });
    }
    if !source.is_dir() {
        return Err(ArchiveError::NotADirectory {
            path: source.to_path_buf(),
        });
    }

    let mut zip = ZipWriter::new(BufWriter::new(File::create(destination)?));
    let archive_path = destination.canonicalize()?;
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut files = 0;

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file || entry.path().canonicalize()? == archive_path {
            continue;
        }

        let name = entry_name(source, entry.path())?;
        log::trace!("adding {}", name);
        zip.start_file(name, options)?;
        let mut input = File::open(entry.path())?;
        io::copy(&mut input, &mut zip)?;
        files += 1;
    }

    let writer = zip.finish()?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;

    Ok(ArchiveSummary {
        path: destination.to_path_buf(),
        files,
        bytes: std::fs::metadata(destination)?.len(),
    })
}

/// Package every regular file under `source` into a ZIP at `destination`.
///
/// On failure a partially written archive may remain; removing it is the
/// caller's job (see [`ArchiveGuard`]).
pub async fn create_archive(source: &Path, destination: &Path) -> Result<ArchiveSummary> {
    log::info!(
        "Archiving {} into {}",
        source.display(),
        destination.display()
    );

    let source = source.to_path_buf();
    let destination = destination.to_path_buf();
    let summary = tokio::task::spawn_blocking(move || write_archive(&source, &destination))
        .await
        .map_err(|e| ArchiveError::Task(e.to_string()))??;

    Ok(summary)
}
