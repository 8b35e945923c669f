//! Error conversion utilities for CLI.
//!
//! Converts sffx-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use sffx_core::ExtractionError;
use std::path::Path;

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::Parse { path, source } => {
            anyhow!(
                "Cannot read archive '{}': {}\n\
                 HINT: Check that the file exists and is readable.",
                path.display(),
                source
            )
        }
        ExtractionError::TruncatedArchive {
            index,
            name,
            expected,
            available,
        } => {
            anyhow!(
                "Archive '{}' is truncated at entry #{} ({}): {} bytes declared, {} available\n\
                 HINT: Files before this entry were extracted. Run 'sffx verify' for a full report.",
                archive.display(),
                index,
                name,
                expected,
                available
            )
        }
        ExtractionError::Filesystem {
            index,
            path,
            source,
        } => {
            anyhow!(
                "Failed to write entry #{} of '{}' to '{}': {}\n\
                 HINT: Check permissions and free space in the output directory.",
                index,
                archive.display(),
                path.display(),
                source
            )
        }
        ExtractionError::PathEscape { index, path } => {
            anyhow!(
                "Entry #{} of '{}' would be written outside the output directory: '{}'\n\
                 HINT: The output directory contains a symlink. Extract into an empty directory.",
                index,
                archive.display(),
                path.display()
            )
        }
        ExtractionError::Cancelled { completed, total } => {
            anyhow!(
                "Extraction of '{}' cancelled after {} of {} entries",
                archive.display(),
                completed,
                total
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_truncated_error() {
        let err = ExtractionError::TruncatedArchive {
            index: 4,
            name: "maps\\town.bin".to_string(),
            expected: 100,
            available: 40,
        };
        let converted = convert_extraction_error(err, Path::new("data.sff"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("truncated at entry #4"));
        assert!(msg.contains("data.sff"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_parse_error() {
        let err = ExtractionError::Parse {
            path: PathBuf::from("missing.sff"),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };
        let msg = format!("{:?}", convert_extraction_error(err, Path::new("missing.sff")));
        assert!(msg.contains("Cannot read archive 'missing.sff'"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_filesystem_error() {
        let err = ExtractionError::Filesystem {
            index: 1,
            path: PathBuf::from("out/a/b.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = format!("{:?}", convert_extraction_error(err, Path::new("x.sff")));
        assert!(msg.contains("entry #1"));
        assert!(msg.contains("out/a/b.txt"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err = ExtractionError::Io(io_err);
        let converted = convert_extraction_error(err, Path::new("archive.sff"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
    }
}
