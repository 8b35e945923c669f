//! Extraction configuration.

/// Default capacity of the buffered reader wrapped around the source (64 KiB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Options controlling how an archive is extracted.
///
/// The defaults match the behaviour expected by every frontend: create the
/// destination if it is missing, and refuse writes that resolve outside it.
///
/// # Examples
///
/// ```
/// use sffx_core::ExtractionConfig;
///
/// let config = ExtractionConfig {
///     create_destination: false,
///     ..Default::default()
/// };
/// assert!(config.verify_containment);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Create the destination directory (and its parents) when missing.
    pub create_destination: bool,

    /// Capacity of the buffered reader used for the archive source.
    pub read_buffer_size: usize,

    /// Canonicalize each output directory and reject entries whose parent
    /// resolves outside the destination (for example through a symlink that
    /// already exists there).
    pub verify_containment: bool,
}

impl Default for ExtractionConfig {
    /// Default values:
    /// - `create_destination`: true
    /// - `read_buffer_size`: 64 KiB
    /// - `verify_containment`: true
    fn default() -> Self {
        Self {
            create_destination: true,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            verify_containment: true,
        }
    }
}

impl ExtractionConfig {
    /// Sets whether a missing destination is created.
    #[must_use]
    pub fn with_create_destination(mut self, create: bool) -> Self {
        self.create_destination = create;
        self
    }

    /// Sets the source read buffer capacity. Zero is clamped to one byte.
    #[must_use]
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    /// Sets whether output directories are checked for containment.
    #[must_use]
    pub fn with_verify_containment(mut self, verify: bool) -> Self {
        self.verify_containment = verify;
        self
    }
}
