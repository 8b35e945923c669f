//! High-level public API for loading, listing and extracting archives.

use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use crate::Archive;
use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::extraction::ExtractionEngine;

/// Loads the directory table of the archive at `path`.
///
/// # Errors
///
/// Returns `ExtractionError::Parse` if the file cannot be opened or read.
pub fn load_archive<P: AsRef<Path>>(path: P) -> Result<Archive> {
    Archive::open(path)
}

/// Returns `(name, size)` pairs in directory order.
///
/// # Examples
///
/// ```
/// use sffx_core::Archive;
/// use sffx_core::list_entries;
///
/// assert!(list_entries(&Archive::default()).is_empty());
/// ```
#[must_use]
pub fn list_entries(archive: &Archive) -> Vec<(&str, u32)> {
    archive
        .entries()
        .iter()
        .map(|entry| (entry.name(), entry.size()))
        .collect()
}

/// Extracts every entry of `archive` from an already open `source`.
///
/// Returns the number of entries skipped because their name could not be
/// recovered. Use [`ExtractionEngine`] directly for the full report or a
/// custom configuration.
///
/// # Errors
///
/// See [`ExtractionEngine::extract`].
pub fn extract<R, P>(
    archive: &Archive,
    source: &mut R,
    destination: P,
    progress: &mut dyn ProgressCallback,
) -> Result<usize>
where
    R: Read + Seek,
    P: AsRef<Path>,
{
    ExtractionEngine::default()
        .extract(archive, source, destination, progress)
        .map(|report| report.skipped_count())
}

/// Opens the archive at `archive_path` and extracts it to `output_dir`.
///
/// # Errors
///
/// Returns `ExtractionError::Parse` if the archive cannot be read, or any
/// error from [`ExtractionEngine::extract`].
///
/// # Examples
///
/// ```no_run
/// use sffx_core::ExtractionConfig;
/// use sffx_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive("data.sff", "/tmp/output", &ExtractionConfig::default())?;
/// println!(
///     "Extracted {} files, skipped {}",
///     report.files_extracted,
///     report.skipped_count()
/// );
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    extract_archive_with_progress(archive_path, output_dir, config, &mut NoopProgress)
}

/// Like [`extract_archive`], reporting progress once per entry.
///
/// # Errors
///
/// Same as [`extract_archive`].
pub fn extract_archive_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let archive = Archive::open(archive_path)?;
    let mut source =
        File::open(archive_path).map_err(|e| ExtractionError::parse(archive_path, e))?;

    ExtractionEngine::new(config.clone()).extract(&archive, &mut source, output_dir, progress)
}
