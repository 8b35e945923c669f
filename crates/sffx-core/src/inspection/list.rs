//! Archive listing implementation.

use crate::Archive;
use crate::inspection::manifest::ArchiveManifest;
use crate::inspection::manifest::ManifestEntry;
use crate::types::sanitize;

/// Lists archive contents without extracting.
///
/// Returns a manifest with one row per entry, in directory order. Only the
/// already parsed table is used; no payload bytes are read.
///
/// # Examples
///
/// ```
/// use sffx_core::Archive;
/// use sffx_core::list_archive;
///
/// let manifest = list_archive(&Archive::default());
/// assert_eq!(manifest.total_entries, 0);
/// assert_eq!(manifest.total_size, 0);
/// ```
#[must_use]
pub fn list_archive(archive: &Archive) -> ArchiveManifest {
    let mut manifest = ArchiveManifest::new(archive.payload_offset());

    for (index, entry) in archive.entries().iter().enumerate() {
        let sanitized = sanitize(entry.name());
        let output_path = (!sanitized.is_unrecoverable()).then(|| sanitized.to_string());

        manifest.add_entry(ManifestEntry {
            index,
            name: entry.name().to_string(),
            size: entry.size(),
            extension: extension_of(entry.name()),
            output_path,
        });
    }

    manifest
}

/// Returns the upper-cased extension of the last path segment.
///
/// Leading dots mark hidden files rather than an extension, so `.profile`
/// has none.
fn extension_of(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let (_, ext) = base.trim_start_matches('.').rsplit_once('.')?;
    let ext = ext.trim();
    (!ext.is_empty()).then(|| ext.to_uppercase())
}
