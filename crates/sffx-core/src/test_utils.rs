//! Test utilities for building in-memory SFF archives.
//!
//! The library never writes archives; these helpers exist so unit,
//! integration and CLI tests can produce fixtures without binary files in the
//! repository.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::Path;

use crate::formats::NAME_FIELD_LEN;
use crate::formats::RECORD_SIZE;
use crate::formats::SENTINEL;

/// Builder for SFF test archives.
///
/// Records are written back to back, followed by the payloads in the same
/// order. No terminator record is emitted unless requested: the parser stops
/// when the bytes after the last record no longer decode as a record, so
/// keep the first payload short or starting with a zero byte when the table
/// must end exactly after the added files.
///
/// # Examples
///
/// ```
/// use sffx_core::Archive;
/// use sffx_core::test_utils::SffTestBuilder;
///
/// let bytes = SffTestBuilder::new()
///     .add_file("a.txt", b"HELLO")
///     .add_file("b/c.bin", b"xyz")
///     .build();
///
/// let archive = Archive::parse(&bytes);
/// assert_eq!(archive.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SffTestBuilder {
    table: Vec<u8>,
    payload: Vec<u8>,
}

impl SffTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record and its payload.
    #[must_use]
    pub fn add_file(self, name: &str, data: &[u8]) -> Self {
        self.add_raw(name.as_bytes(), data)
    }

    /// Adds a record with raw name bytes (which may hold non-ASCII bytes).
    ///
    /// Names longer than the name field are truncated.
    #[must_use]
    pub fn add_raw(mut self, name: &[u8], data: &[u8]) -> Self {
        let size = u32::try_from(data.len()).unwrap();
        self.push_record(size, name);
        self.payload.extend_from_slice(data);
        self
    }

    /// Adds a record declaring `size` bytes without appending any payload.
    ///
    /// Useful for producing truncated archives.
    #[must_use]
    pub fn add_declared(mut self, name: &str, size: u32) -> Self {
        self.push_record(size, name.as_bytes());
        self
    }

    /// Appends a sentinel record to the table.
    #[must_use]
    pub fn add_sentinel(mut self) -> Self {
        self.push_record(SENTINEL, b"sentinel");
        self
    }

    /// Appends raw bytes after the payload region.
    #[must_use]
    pub fn add_trailing(mut self, data: &[u8]) -> Self {
        self.payload.extend_from_slice(data);
        self
    }

    /// Returns the complete archive bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mut out = self.table;
        out.extend(self.payload);
        out
    }

    /// Writes the archive to `path`.
    pub fn write_to(self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }

    fn push_record(&mut self, size: u32, name: &[u8]) {
        let mut record = [0u8; RECORD_SIZE];
        record[..4].copy_from_slice(&size.to_le_bytes());
        let len = name.len().min(NAME_FIELD_LEN);
        record[4..4 + len].copy_from_slice(&name[..len]);
        self.table.extend_from_slice(&record);
    }
}
