//! Parsed archive directory.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::ExtractionError;
use crate::Result;
use crate::formats::RECORD_SIZE;
use crate::formats::parse_directory;
use crate::formats::read_directory;

/// One directory record: an embedded name and a payload size.
///
/// The entry's index in [`Archive::entries`] is also its position in the
/// payload stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    name: String,
    size: u32,
}

impl Entry {
    pub(crate) fn new(name: String, size: u32) -> Self {
        Self { name, size }
    }

    /// Returns the name as decoded from the directory table.
    ///
    /// The name is untrusted and may contain `\` or `/` separators; use
    /// [`sanitize`](crate::sanitize) before touching the filesystem with it.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared payload size in bytes. Never zero.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }
}

/// A parsed archive: the ordered entry list and the payload start offset.
///
/// An `Archive` is immutable once parsed. Share it across threads with
/// `Arc<Archive>`.
///
/// # Examples
///
/// ```
/// use sffx_core::Archive;
///
/// // An empty table is a valid archive.
/// let archive = Archive::parse(&[]);
/// assert!(archive.is_empty());
/// assert_eq!(archive.payload_offset(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Archive {
    entries: Vec<Entry>,
}

impl Archive {
    /// Parses the directory table from the complete archive bytes.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            entries: parse_directory(bytes),
        }
    }

    /// Reads the directory table from a reader positioned at byte 0.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if the reader fails.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            entries: read_directory(reader)?,
        })
    }

    /// Opens an archive file and reads its directory table.
    ///
    /// Only the table is read; payloads are left on disk until extraction.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Parse` if the file cannot be opened or read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sffx_core::Archive;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let archive = Archive::open("data.sff")?;
    /// for entry in archive.entries() {
    ///     println!("{} ({} bytes)", entry.name(), entry.size());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ExtractionError::parse(path, e))?;
        let mut reader = BufReader::new(file);
        let entries = read_directory(&mut reader).map_err(|e| ExtractionError::parse(path, e))?;

        debug!(
            path = %path.display(),
            entries = entries.len(),
            "loaded archive"
        );
        Ok(Self { entries })
    }

    /// Returns the entries in directory order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the entry at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the byte position where payload data begins.
    ///
    /// Always `RECORD_SIZE * len()`.
    #[must_use]
    pub fn payload_offset(&self) -> u64 {
        (RECORD_SIZE as u64) * (self.entries.len() as u64)
    }

    /// Returns the sum of all declared payload sizes.
    #[must_use]
    pub fn total_payload_size(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.size)).sum()
    }
}
