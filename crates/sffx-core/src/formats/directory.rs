//! Directory table parser.
//!
//! The table is a run of [`RECORD_SIZE`]-byte records starting at byte 0.
//! Parsing stops at the first terminator record or at a trailing partial
//! record; neither case is an error. Whatever follows the accepted records is
//! the payload region.

use std::io::ErrorKind;
use std::io::Read;

use tracing::debug;

use super::record::RECORD_SIZE;
use super::record::RawRecord;
use super::record::decode_record;
use crate::archive::Entry;

/// Parses the directory table from an in-memory buffer.
///
/// Never fails: malformed content ends the table early.
#[must_use]
pub fn parse_directory(bytes: &[u8]) -> Vec<Entry> {
    let entries: Vec<Entry> = bytes
        .chunks_exact(RECORD_SIZE)
        .map_while(|chunk| {
            let record: &RawRecord = chunk.try_into().ok()?;
            decode_record(record)
        })
        .collect();

    debug!(entries = entries.len(), "parsed directory table from buffer");
    entries
}

/// Parses the directory table from a reader positioned at byte 0.
///
/// Only the table itself is consumed; payload bytes after the terminator
/// record are left unread except for the terminator slot.
///
/// # Errors
///
/// Returns an error if the reader fails for any reason other than reaching
/// the end of input.
pub fn read_directory<R: Read>(reader: &mut R) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut record: RawRecord = [0u8; RECORD_SIZE];

    loop {
        match reader.read_exact(&mut record) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }

        match decode_record(&record) {
            Some(entry) => entries.push(entry),
            None => break,
        }
    }

    debug!(entries = entries.len(), "read directory table");
    Ok(entries)
}
