//! Property-based tests for the directory parser and name sanitizer.
//!
//! These tests use proptest to generate arbitrary tables and names and
//! verify the structural invariants hold across a wide range of cases.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use sffx_core::Archive;
use sffx_core::formats::RECORD_SIZE;
use sffx_core::formats::SENTINEL;
use sffx_core::sanitize;
use sffx_core::types::sanitized_name::RESERVED_CHARS;

/// Encodes one raw 136-byte record.
fn record(size: u32, name: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; RECORD_SIZE];
    out[..4].copy_from_slice(&size.to_le_bytes());
    let len = name.len().min(RECORD_SIZE - 4);
    out[4..4 + len].copy_from_slice(&name[..len]);
    out
}

fn valid_size() -> impl Strategy<Value = u32> {
    (1u32..u32::MAX).prop_filter("sentinel is reserved", |s| *s != SENTINEL)
}

fn valid_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./\\\\-]{1,64}"
}

fn terminator() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        Just(record(0, b"zero")),
        Just(record(SENTINEL, b"sentinel")),
        valid_size().prop_map(|size| record(size, b"")),
    ]
}

proptest! {
    /// Parsing arbitrary bytes terminates and accounts for the offset.
    #[test]
    fn prop_parse_terminates(bytes in prop::collection::vec(any::<u8>(), 0..2048)) {
        let archive = Archive::parse(&bytes);
        prop_assert!(archive.len() <= bytes.len() / RECORD_SIZE);
        prop_assert_eq!(archive.payload_offset(), (RECORD_SIZE * archive.len()) as u64);
    }

    /// A terminator at position k yields exactly k entries.
    #[test]
    fn prop_terminator_at_k(
        entries in prop::collection::vec((valid_name(), valid_size()), 0..16),
        end in terminator(),
        tail in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut bytes = Vec::new();
        for (name, size) in &entries {
            bytes.extend(record(*size, name.as_bytes()));
        }
        bytes.extend(end);
        bytes.extend(tail);

        let archive = Archive::parse(&bytes);
        prop_assert_eq!(archive.len(), entries.len());
        prop_assert_eq!(archive.payload_offset(), (RECORD_SIZE * entries.len()) as u64);
        for (entry, (name, size)) in archive.entries().iter().zip(&entries) {
            prop_assert_eq!(entry.name(), name.as_str());
            prop_assert_eq!(entry.size(), *size);
        }
    }

    /// Parsed entries never carry a zero or sentinel size.
    #[test]
    fn prop_entry_sizes_valid(bytes in prop::collection::vec(any::<u8>(), 0..4096)) {
        for entry in Archive::parse(&bytes).entries() {
            prop_assert!(entry.size() != 0);
            prop_assert!(entry.size() != SENTINEL);
            prop_assert!(!entry.name().is_empty());
        }
    }

    /// Sanitizing an already sanitized name changes nothing.
    #[test]
    fn prop_sanitize_idempotent(raw in any::<String>()) {
        let once = sanitize(&raw);
        let twice = sanitize(&once.to_string());
        prop_assert_eq!(once.segments(), twice.segments());
        prop_assert_eq!(once.is_unrecoverable(), twice.is_unrecoverable());
    }

    /// No segment contains reserved or non-printable characters.
    #[test]
    fn prop_segments_are_clean(raw in any::<String>()) {
        for segment in sanitize(&raw).segments() {
            prop_assert!(!segment.is_empty());
            prop_assert!(segment != "." && segment != "..");
            for c in segment.chars() {
                prop_assert!(!RESERVED_CHARS.contains(&c), "reserved {:?} in {:?}", c, segment);
                prop_assert!(
                    c == ' ' || !(c.is_control() || c.is_whitespace()),
                    "non-printable {:?} in {:?}",
                    c,
                    segment
                );
            }
            prop_assert_eq!(segment.trim(), segment.as_str());
        }
    }

    /// Names decoded from records sanitize to printable ASCII or U+FFFD only.
    #[test]
    fn prop_decoded_names_sanitize_to_ascii(
        name in prop::collection::vec(1u8..=255, 1..128)
    ) {
        let bytes = record(1, &name);
        let archive = Archive::parse(&bytes);
        prop_assert_eq!(archive.len(), 1);

        for segment in sanitize(archive.entries()[0].name()).segments() {
            for c in segment.chars() {
                prop_assert!(
                    c == ' ' || c.is_ascii_graphic() || c == char::REPLACEMENT_CHARACTER,
                    "unexpected {:?} in {:?}",
                    c,
                    segment
                );
                prop_assert!(!RESERVED_CHARS.contains(&c));
            }
        }
    }

    /// Plain alphanumeric paths survive sanitization unchanged.
    #[test]
    fn prop_plain_names_preserved(
        components in prop::collection::vec("[a-zA-Z0-9_-]{1,20}", 1..6)
    ) {
        let raw = components.join("\\");
        let sanitized = sanitize(&raw);
        prop_assert!(!sanitized.is_unrecoverable());
        prop_assert_eq!(sanitized.segments(), components.as_slice());
    }
}
