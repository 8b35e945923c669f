//! Extraction reporting and progress callbacks.

use std::time::Duration;

/// Report of an archive extraction operation.
///
/// A successful run always carries the skip count, even when it is zero.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of files written to disk.
    pub files_extracted: usize,

    /// Number of entries skipped because their name was unrecoverable.
    pub files_skipped: usize,

    /// Number of directories created.
    pub directories_created: usize,

    /// Total payload bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,

    /// Warnings generated during extraction, one per skipped entry.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries skipped for unrecoverable names.
    #[must_use]
    pub const fn skipped_count(&self) -> usize {
        self.files_skipped
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns the number of entries processed, written or skipped.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_extracted + self.files_skipped
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Callback trait for progress reporting during extraction.
///
/// `on_progress` is invoked exactly once per entry, with `completed` running
/// from 1 to `total` in order, whether the entry was written or skipped. It
/// runs synchronously on the extracting thread and must not block.
///
/// Closures taking `(completed, total)` implement this trait directly.
///
/// # Examples
///
/// ```
/// use sffx_core::ProgressCallback;
///
/// struct Percent;
///
/// impl ProgressCallback for Percent {
///     fn on_progress(&mut self, completed: usize, total: usize) {
///         println!("{:.0}%", completed as f64 / total as f64 * 100.0);
///     }
/// }
///
/// let mut calls = Vec::new();
/// let mut closure = |done: usize, total: usize| calls.push((done, total));
/// closure.on_progress(1, 2);
/// assert_eq!(calls, [(1, 2)]);
/// ```
pub trait ProgressCallback: Send {
    /// Called after each entry has been written or skipped.
    ///
    /// # Arguments
    ///
    /// * `completed` - Number of entries processed so far (1-indexed)
    /// * `total` - Total number of entries in the archive
    fn on_progress(&mut self, completed: usize, total: usize);

    /// Called once when every entry has been processed successfully.
    fn on_complete(&mut self) {}
}

impl<F> ProgressCallback for F
where
    F: FnMut(usize, usize) + Send,
{
    fn on_progress(&mut self, completed: usize, total: usize) {
        self(completed, total);
    }
}

/// No-op implementation of `ProgressCallback` that does nothing.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_progress(&mut self, _completed: usize, _total: usize) {}
}
