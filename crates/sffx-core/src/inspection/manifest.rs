//! Archive manifest types.

/// Metadata for all entries of an archive, in directory order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    /// Entries in directory order.
    pub entries: Vec<ManifestEntry>,

    /// Number of entries.
    pub total_entries: usize,

    /// Sum of all declared payload sizes in bytes.
    pub total_size: u64,

    /// Byte offset where the payload region starts.
    pub payload_offset: u64,
}

impl ArchiveManifest {
    /// Creates an empty manifest for a payload region at `payload_offset`.
    #[must_use]
    pub fn new(payload_offset: u64) -> Self {
        Self {
            payload_offset,
            ..Self::default()
        }
    }

    /// Appends an entry and updates the totals.
    pub fn add_entry(&mut self, entry: ManifestEntry) {
        self.total_entries += 1;
        self.total_size += u64::from(entry.size);
        self.entries.push(entry);
    }

    /// Returns the number of entries whose name cannot be recovered.
    #[must_use]
    pub fn unrecoverable_count(&self) -> usize {
        self.entries.iter().filter(|e| e.output_path.is_none()).count()
    }
}

/// One row of an [`ArchiveManifest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Zero-based position in the directory table.
    pub index: usize,

    /// Name as stored in the archive.
    pub name: String,

    /// Declared payload size in bytes.
    pub size: u32,

    /// Upper-cased file extension, without the dot.
    pub extension: Option<String>,

    /// Relative output path after sanitization, `None` if the entry would be
    /// skipped.
    pub output_path: Option<String>,
}
