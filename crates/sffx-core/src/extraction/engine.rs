//! Core extraction engine.

use std::fs;
use std::io::BufReader;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use super::CancelFlag;
use super::stream::read_payload;
use crate::Archive;
use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::types::DestDir;
use crate::types::SanitizedName;
use crate::types::sanitize;

/// Main extraction engine.
///
/// Reads payloads strictly sequentially: the source is positioned at the
/// payload offset once and never seeks again, so memory use is bounded by the
/// largest single entry.
///
/// # Examples
///
/// ```no_run
/// use sffx_core::Archive;
/// use sffx_core::ExtractionConfig;
/// use sffx_core::extraction::ExtractionEngine;
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = Archive::open("data.sff")?;
/// let mut source = File::open("data.sff")?;
///
/// let engine = ExtractionEngine::new(ExtractionConfig::default());
/// let report = engine.extract(&archive, &mut source, "out", &mut |done: usize, total: usize| {
///     println!("{done}/{total}");
/// })?;
/// println!("skipped {}", report.skipped_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractionEngine {
    config: ExtractionConfig,
    cancel: Option<CancelFlag>,
}

impl ExtractionEngine {
    /// Creates a new extraction engine with the given configuration.
    #[must_use]
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Attaches a cancellation flag polled between entries.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts every entry of `archive` from `source` into `destination`.
    ///
    /// For each entry, in order: read exactly its declared size, sanitize its
    /// name, then either skip it (unrecoverable name) or write it, creating
    /// missing parent directories and overwriting existing files (a symlink
    /// in the file's place is replaced, not followed). `progress`
    /// is called once per entry in both cases.
    ///
    /// Total payload length is not validated up front: a short source fails
    /// on the first entry that cannot be read in full, after all earlier
    /// entries have been written.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::TruncatedArchive` if a payload is cut short
    /// - `ExtractionError::Filesystem` if a directory or file cannot be written
    /// - `ExtractionError::PathEscape` if an existing output directory resolves
    ///   outside the destination; nothing is created past that directory
    /// - `ExtractionError::Cancelled` if the cancel flag was set
    /// - `ExtractionError::Io` if the destination is invalid or the source
    ///   cannot be read
    ///
    /// Files written before the error stay on disk.
    pub fn extract<R, P>(
        &self,
        archive: &Archive,
        source: &mut R,
        destination: P,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport>
    where
        R: Read + Seek,
        P: AsRef<Path>,
    {
        let start = Instant::now();
        let dest = if self.config.create_destination {
            DestDir::create(destination.as_ref())?
        } else {
            DestDir::new(destination.as_ref())?
        };

        source.seek(SeekFrom::Start(archive.payload_offset()))?;
        let mut reader = BufReader::with_capacity(self.config.read_buffer_size.max(1), source);

        let total = archive.len();
        let mut report = ExtractionReport::new();

        for (index, entry) in archive.entries().iter().enumerate() {
            if self.is_cancelled() {
                info!(completed = index, total, "extraction cancelled");
                return Err(ExtractionError::Cancelled {
                    completed: index,
                    total,
                });
            }

            let data = read_payload(&mut reader, index, entry)?;
            let name = sanitize(entry.name());

            if name.is_unrecoverable() {
                warn!(index, raw = entry.name(), "skipping entry with unrecoverable name");
                report.files_skipped += 1;
                report.add_warning(format!(
                    "skipped entry #{index}: unrecoverable name {:?}",
                    entry.name()
                ));
            } else {
                self.write_entry(&dest, index, &name, &data, &mut report)?;
            }

            progress.on_progress(index + 1, total);
        }

        progress.on_complete();
        report.duration = start.elapsed();

        info!(
            extracted = report.files_extracted,
            skipped = report.files_skipped,
            bytes = report.bytes_written,
            "extraction complete"
        );
        Ok(report)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }

    fn write_entry(
        &self,
        dest: &DestDir,
        index: usize,
        name: &SanitizedName,
        data: &[u8],
        report: &mut ExtractionReport,
    ) -> Result<()> {
        let out_path = dest.join(name);

        if let Some((_, dirs)) = name.segments().split_last() {
            let mut dir = dest.as_path().to_path_buf();
            for segment in dirs {
                dir.push(segment);
                match fs::symlink_metadata(&dir) {
                    Ok(_) => {
                        if self.config.verify_containment {
                            Self::ensure_contained(dest, index, &dir, &out_path)?;
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        fs::create_dir(&dir).map_err(|e| ExtractionError::filesystem(index, &dir, e))?;
                        report.directories_created += 1;
                    }
                    Err(e) => return Err(ExtractionError::filesystem(index, &dir, e)),
                }
            }
        }

        // A symlink at the leaf is replaced, never written through.
        if fs::symlink_metadata(&out_path).is_ok_and(|m| m.file_type().is_symlink()) {
            debug!(index, path = %out_path.display(), "replacing symlink");
            fs::remove_file(&out_path).map_err(|e| ExtractionError::filesystem(index, &out_path, e))?;
        }

        fs::write(&out_path, data).map_err(|e| ExtractionError::filesystem(index, &out_path, e))?;

        debug!(index, path = %out_path.display(), bytes = data.len(), "wrote entry");
        report.files_extracted += 1;
        report.bytes_written += data.len() as u64;
        Ok(())
    }

    /// Fails with `PathEscape` if an existing directory on the way to
    /// `out_path` resolves outside the destination.
    fn ensure_contained(dest: &DestDir, index: usize, dir: &Path, out_path: &Path) -> Result<()> {
        let inside = dest
            .contains(dir)
            .map_err(|e| ExtractionError::filesystem(index, dir, e))?;
        if inside {
            Ok(())
        } else {
            Err(ExtractionError::PathEscape {
                index,
                path: out_path.to_path_buf(),
            })
        }
    }
}
