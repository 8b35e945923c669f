//! Fixed-size directory record layout.
//!
//! Every record in the directory table is exactly [`RECORD_SIZE`] bytes:
//!
//! ```text
//! +--------+------------------------------------+
//! | u32 LE | name, null padded (128 bytes)      |
//! | size   |                                    |
//! +--------+------------------------------------+
//! ```

use crate::archive::Entry;

/// Width of the little-endian size field.
pub const SIZE_FIELD_LEN: usize = 4;

/// Width of the null-padded name field.
pub const NAME_FIELD_LEN: usize = 128;

/// Total size of one directory record.
pub const RECORD_SIZE: usize = SIZE_FIELD_LEN + NAME_FIELD_LEN;

/// Reserved size value marking the end of the directory table.
pub const SENTINEL: u32 = 0xCCCC_CCCC;

/// One raw directory record.
pub type RawRecord = [u8; RECORD_SIZE];

/// Decodes the size field of a record.
#[must_use]
pub fn record_size_field(record: &RawRecord) -> u32 {
    u32::from_le_bytes([record[0], record[1], record[2], record[3]])
}

/// Decodes the name field up to its first null byte.
///
/// Names are ASCII. Every byte outside that range becomes its own U+FFFD,
/// so the decode never fails and multi-byte sequences are not joined.
#[must_use]
pub fn record_name_field(record: &RawRecord) -> String {
    let field = &record[SIZE_FIELD_LEN..];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    field[..end]
        .iter()
        .map(|&b| if b.is_ascii() { char::from(b) } else { char::REPLACEMENT_CHARACTER })
        .collect()
}

/// Decodes one record, returning `None` if it terminates the table.
///
/// A record terminates the table when its size is zero, equals
/// [`SENTINEL`], or its decoded name is empty.
#[must_use]
pub fn decode_record(record: &RawRecord) -> Option<Entry> {
    let size = record_size_field(record);
    if size == 0 || size == SENTINEL {
        return None;
    }

    let name = record_name_field(record);
    if name.is_empty() {
        return None;
    }

    Some(Entry::new(name, size))
}
