//! Validated destination directory type.

use crate::ExtractionError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

use super::SanitizedName;

/// A validated destination directory for extraction.
///
/// Once constructed, a `DestDir` is guaranteed to be an existing directory
/// represented by an absolute canonical path.
///
/// # Examples
///
/// ```no_run
/// use sffx_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/unpacked")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates a new `DestDir` from an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if the path does not exist, is not a
    /// directory, or cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(ExtractionError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("destination directory does not exist: {}", path.display()),
            )));
        }

        if !path.is_dir() {
            return Err(ExtractionError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            ExtractionError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {}", path.display(), e),
            ))
        })?;

        Ok(Self(canonical))
    }

    /// Creates the directory (and any missing parents) if needed, then
    /// validates it like [`DestDir::new`].
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if the directory cannot be created or
    /// validated.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path).map_err(|e| {
            ExtractionError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create destination {}: {}", path.display(), e),
            ))
        })?;
        Self::new(path)
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins sanitized segments onto this destination directory.
    #[must_use]
    pub fn join(&self, name: &SanitizedName) -> PathBuf {
        let mut path = self.0.clone();
        path.extend(name.segments());
        path
    }

    /// Returns `true` if `dir` resolves to a location inside this
    /// destination once symlinks are followed.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from canonicalizing `dir`.
    pub fn contains(&self, dir: &Path) -> std::io::Result<bool> {
        Ok(dir.canonicalize()?.starts_with(&self.0))
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
