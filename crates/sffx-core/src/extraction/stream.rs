//! Sequential payload reads.

use std::io::Read;

use crate::ExtractionError;
use crate::Result;
use crate::archive::Entry;

/// Upper bound for the up-front buffer reservation (8 MiB).
///
/// Declared sizes come from an untrusted table, so larger payloads grow the
/// buffer as bytes actually arrive.
const MAX_PREALLOC: usize = 8 * 1024 * 1024;

/// Reads exactly `entry.size()` bytes from the current reader position.
///
/// The reader is left positioned right after the payload, ready for the
/// next entry.
///
/// # Errors
///
/// Returns `ExtractionError::TruncatedArchive` if the reader ends before the
/// declared size, or `ExtractionError::Io` if reading fails.
pub fn read_payload<R: Read>(reader: &mut R, index: usize, entry: &Entry) -> Result<Vec<u8>> {
    let expected = entry.size();
    let capacity = usize::try_from(expected).map_or(MAX_PREALLOC, |n| n.min(MAX_PREALLOC));
    let mut buf = Vec::with_capacity(capacity);

    reader.by_ref().take(u64::from(expected)).read_to_end(&mut buf)?;

    let available = buf.len() as u64;
    if available < u64::from(expected) {
        return Err(ExtractionError::TruncatedArchive {
            index,
            name: entry.name().to_string(),
            expected,
            available,
        });
    }

    Ok(buf)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_exact_and_advances() {
        let mut reader = Cursor::new(b"HELLOxyz".to_vec());
        let a = Entry::new("a.txt".into(), 5);
        let b = Entry::new("b.bin".into(), 3);

        assert_eq!(read_payload(&mut reader, 0, &a).unwrap(), b"HELLO");
        assert_eq!(read_payload(&mut reader, 1, &b).unwrap(), b"xyz");
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_short_read_is_truncation() {
        let mut reader = Cursor::new(vec![7u8; 40]);
        let entry = Entry::new("big.bin".into(), 100);

        let err = read_payload(&mut reader, 4, &entry).unwrap_err();
        match err {
            ExtractionError::TruncatedArchive {
                index,
                expected,
                available,
                ..
            } => {
                assert_eq!(index, 4);
                assert_eq!(expected, 100);
                assert_eq!(available, 40);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_large_declared_size_does_not_preallocate_everything() {
        let mut reader = Cursor::new(vec![1u8; 16]);
        let entry = Entry::new("huge".into(), u32::MAX - 1);
        assert!(read_payload(&mut reader, 0, &entry).unwrap_err().is_truncation());
    }
}
