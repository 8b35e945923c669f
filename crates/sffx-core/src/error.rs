//! Error types for archive loading and extraction.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while loading or extracting an archive.
///
/// Every variant is fatal for the operation that produced it. Entries whose
/// names cannot be recovered are not errors: they are skipped and counted in
/// [`ExtractionReport::files_skipped`](crate::ExtractionReport::files_skipped).
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The archive file could not be opened or its directory table read.
    #[error("failed to read archive {}: {source}", path.display())]
    Parse {
        /// Path of the archive that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An entry declares more payload bytes than the source still holds.
    #[error(
        "truncated archive: entry #{index} ({name}) declares {expected} bytes but only {available} remain"
    )]
    TruncatedArchive {
        /// Zero-based index of the entry being read.
        index: usize,
        /// Raw name of the entry as stored in the directory table.
        name: String,
        /// Declared payload size.
        expected: u32,
        /// Bytes that could actually be read.
        available: u64,
    },

    /// Creating a directory or writing an extracted file failed.
    #[error("failed to write entry #{index} to {}: {source}", path.display())]
    Filesystem {
        /// Zero-based index of the entry being written.
        index: usize,
        /// Output path that could not be created or written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The output path resolves outside the destination directory.
    #[error("entry #{index} resolves outside the destination: {}", path.display())]
    PathEscape {
        /// Zero-based index of the offending entry.
        index: usize,
        /// Output path that escaped.
        path: PathBuf,
    },

    /// Extraction was cancelled between two entries.
    #[error("extraction cancelled after {completed} of {total} entries")]
    Cancelled {
        /// Entries fully processed before cancellation was observed.
        completed: usize,
        /// Total number of entries in the archive.
        total: usize,
    },

    /// I/O operation on the archive source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    /// Wraps an I/O error raised while opening or reading the directory table.
    pub(crate) fn parse(path: &Path, source: std::io::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wraps an I/O error raised while materializing an entry.
    pub(crate) fn filesystem(index: usize, path: &Path, source: std::io::Error) -> Self {
        Self::Filesystem {
            index,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the index of the entry that caused the error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use sffx_core::ExtractionError;
    ///
    /// let err = ExtractionError::TruncatedArchive {
    ///     index: 3,
    ///     name: "data\\level.bin".to_string(),
    ///     expected: 100,
    ///     available: 40,
    /// };
    /// assert_eq!(err.entry_index(), Some(3));
    /// ```
    #[must_use]
    pub const fn entry_index(&self) -> Option<usize> {
        match self {
            Self::TruncatedArchive { index, .. }
            | Self::Filesystem { index, .. }
            | Self::PathEscape { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns the filesystem path involved in the error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Parse { path, .. } | Self::Filesystem { path, .. } | Self::PathEscape { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }

    /// Returns `true` if the archive ended before a declared payload did.
    #[must_use]
    pub const fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedArchive { .. })
    }

    /// Returns `true` if the run stopped because the caller cancelled it.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Returns a short context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use sffx_core::ExtractionError;
    ///
    /// let err = ExtractionError::TruncatedArchive {
    ///     index: 0,
    ///     name: "a.txt".to_string(),
    ///     expected: 5,
    ///     available: 2,
    /// };
    /// assert_eq!(err.context(), Some("a.txt"));
    ///
    /// let err = ExtractionError::Cancelled { completed: 1, total: 2 };
    /// assert_eq!(err.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::TruncatedArchive { name, .. } => Some(name),
            _ => None,
        }
    }
}
