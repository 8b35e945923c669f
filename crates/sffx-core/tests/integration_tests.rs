//! Integration tests for sffx-core.
//!
//! These tests drive the public API end to end against real files in a
//! temporary directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::fs::File;
use std::io::Cursor;
use std::sync::Arc;

use sffx_core::Archive;
use sffx_core::CancelFlag;
use sffx_core::ExtractionConfig;
use sffx_core::ExtractionEngine;
use sffx_core::ExtractionError;
use sffx_core::ExtractionEvent;
use sffx_core::ExtractionJob;
use sffx_core::NoopProgress;
use sffx_core::VerificationStatus;
use sffx_core::extract;
use sffx_core::extract_archive;
use sffx_core::list_archive;
use sffx_core::list_entries;
use sffx_core::load_archive;
use sffx_core::test_utils::SffTestBuilder;
use sffx_core::verify_archive;
use tempfile::TempDir;

fn hello_archive() -> SffTestBuilder {
    SffTestBuilder::new()
        .add_file("a.txt", b"HELLO")
        .add_file("b/c.bin", b"xyz")
}

#[test]
fn test_load_list_extract_workflow() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("assets.sff");
    hello_archive().write_to(&path);

    let archive = load_archive(&path).unwrap();
    assert_eq!(list_entries(&archive), vec![("a.txt", 5), ("b/c.bin", 3)]);
    assert_eq!(archive.payload_offset(), 272);

    let out = temp.path().join("out");
    let mut source = File::open(&path).unwrap();
    let mut progress = Vec::new();
    let skipped = extract(
        &archive,
        &mut source,
        &out,
        &mut |done: usize, total: usize| progress.push((done, total)),
    )
    .unwrap();

    assert_eq!(skipped, 0);
    assert_eq!(progress, vec![(1, 2), (2, 2)]);
    assert_eq!(fs::read(out.join("a.txt")).unwrap(), b"HELLO");
    assert_eq!(fs::read(out.join("b").join("c.bin")).unwrap(), b"xyz");
}

#[test]
fn test_sentinel_ends_table() {
    let bytes = SffTestBuilder::new()
        .add_file("one", b"1")
        .add_file("two", b"2")
        .add_sentinel()
        .add_file("hidden", b"3")
        .build();

    let archive = Archive::parse(&bytes);
    assert_eq!(archive.len(), 2);
    assert_eq!(archive.payload_offset(), 272);
}

#[test]
fn test_unrecoverable_entry_is_skipped_and_counted() {
    let temp = TempDir::new().unwrap();
    let bytes = SffTestBuilder::new()
        .add_file("first.txt", b"1")
        .add_raw(b"\x07\x08/<>", b"22")
        .add_file("last.txt", b"333")
        .build();
    let archive = Archive::parse(&bytes);

    let report = ExtractionEngine::default()
        .extract(&archive, &mut Cursor::new(bytes), temp.path(), &mut NoopProgress)
        .unwrap();

    assert_eq!(report.files_extracted, 2);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(fs::read(temp.path().join("last.txt")).unwrap(), b"333");
    let written: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(written.len(), 2);
}

#[test]
fn test_truncation_keeps_earlier_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cut.sff");
    SffTestBuilder::new()
        .add_file("early.txt", b"abc")
        .add_declared("big.bin", 100)
        .add_trailing(&[9u8; 40])
        .write_to(&path);

    let out = temp.path().join("out");
    let err = extract_archive(&path, &out, &ExtractionConfig::default()).unwrap_err();

    assert!(err.is_truncation());
    assert_eq!(err.entry_index(), Some(1));
    assert_eq!(fs::read(out.join("early.txt")).unwrap(), b"abc");
    assert!(!out.join("big.bin").exists());

    let verification = verify_archive(&path).unwrap();
    assert_eq!(verification.status, VerificationStatus::Fail);
    assert_eq!(verification.first_truncated, Some(1));
}

#[test]
fn test_progress_called_once_per_entry() {
    let temp = TempDir::new().unwrap();
    let mut builder = SffTestBuilder::new();
    for i in 0..20 {
        builder = builder.add_file(&format!("dir{}/f{i}.dat", i % 3), format!("{i:04}").as_bytes());
    }
    let bytes = builder.build();
    let archive = Archive::parse(&bytes);
    assert_eq!(archive.len(), 20);

    let mut seen = Vec::new();
    ExtractionEngine::default()
        .extract(
            &archive,
            &mut Cursor::new(bytes),
            temp.path(),
            &mut |done: usize, total: usize| seen.push((done, total)),
        )
        .unwrap();

    let expected: Vec<_> = (1..=20).map(|n| (n, 20)).collect();
    assert_eq!(seen, expected);
    assert_eq!(fs::read(temp.path().join("dir1/f19.dat")).unwrap(), b"0019");
}

#[test]
fn test_backslash_names_become_directories() {
    let temp = TempDir::new().unwrap();
    let bytes = SffTestBuilder::new()
        .add_file("textures\\ui\\icon:1.dds", b"DDS")
        .build();
    let archive = Archive::parse(&bytes);

    ExtractionEngine::default()
        .extract(&archive, &mut Cursor::new(bytes), temp.path(), &mut NoopProgress)
        .unwrap();

    let expected = temp.path().join("textures").join("ui").join("icon1.dds");
    assert_eq!(fs::read(expected).unwrap(), b"DDS");
}

#[test]
fn test_dot_segments_stay_inside_destination() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();
    let bytes = SffTestBuilder::new()
        .add_file("../../escape.txt", b"no")
        .build();
    let archive = Archive::parse(&bytes);

    let report = ExtractionEngine::default()
        .extract(&archive, &mut Cursor::new(bytes), &out, &mut NoopProgress)
        .unwrap();

    assert_eq!(report.files_extracted, 1);
    assert!(!temp.path().join("escape.txt").exists());
    assert!(out.join("_unnamed/_unnamed/escape.txt").exists());
}

#[test]
fn test_non_ascii_name_bytes_are_replaced() {
    let temp = TempDir::new().unwrap();
    let bytes = SffTestBuilder::new().add_raw(b"caf\xe9.txt", b"x").build();
    let archive = Archive::parse(&bytes);
    assert_eq!(archive.entries()[0].name(), "caf\u{FFFD}.txt");

    ExtractionEngine::default()
        .extract(&archive, &mut Cursor::new(bytes), temp.path(), &mut NoopProgress)
        .unwrap();
    assert!(temp.path().join("caf\u{FFFD}.txt").exists());
}

#[test]
fn test_utf8_name_decodes_one_replacement_per_byte() {
    let temp = TempDir::new().unwrap();
    let bytes = SffTestBuilder::new().add_file("café.txt", b"x").build();
    let archive = Archive::parse(&bytes);
    assert_eq!(archive.entries()[0].name(), "caf\u{FFFD}\u{FFFD}.txt");

    ExtractionEngine::default()
        .extract(&archive, &mut Cursor::new(bytes), temp.path(), &mut NoopProgress)
        .unwrap();
    assert!(temp.path().join("caf\u{FFFD}\u{FFFD}.txt").exists());
    assert!(!temp.path().join("café.txt").exists());
}

#[test]
fn test_existing_files_are_overwritten() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), b"old contents").unwrap();
    let bytes = hello_archive().build();
    let archive = Archive::parse(&bytes);

    ExtractionEngine::default()
        .extract(&archive, &mut Cursor::new(bytes), temp.path(), &mut NoopProgress)
        .unwrap();
    assert_eq!(fs::read(temp.path().join("a.txt")).unwrap(), b"HELLO");
}

#[test]
fn test_cancelled_run_leaves_written_files() {
    let temp = TempDir::new().unwrap();
    let bytes = hello_archive().build();
    let archive = Archive::parse(&bytes);
    let flag = CancelFlag::new();
    let trigger = flag.clone();

    let err = ExtractionEngine::default()
        .with_cancel_flag(flag)
        .extract(
            &archive,
            &mut Cursor::new(bytes),
            temp.path(),
            &mut |_: usize, _: usize| trigger.cancel(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        ExtractionError::Cancelled {
            completed: 1,
            total: 2
        }
    ));
    assert!(temp.path().join("a.txt").exists());
    assert!(!temp.path().join("b").exists());
}

#[test]
fn test_background_job_matches_synchronous_run() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("job.sff");
    hello_archive().write_to(&path);
    let archive = Arc::new(load_archive(&path).unwrap());

    let job = ExtractionJob::spawn(
        Arc::clone(&archive),
        &path,
        temp.path().join("out"),
        ExtractionConfig::default(),
    )
    .unwrap();

    let mut last_progress = None;
    let mut report = None;
    for event in job.events() {
        match event {
            ExtractionEvent::Progress { completed, total } => last_progress = Some((completed, total)),
            ExtractionEvent::Finished(result) => report = Some(result.unwrap()),
        }
    }

    assert_eq!(last_progress, Some((2, 2)));
    assert_eq!(report.unwrap().files_extracted, 2);
    assert_eq!(
        fs::read(temp.path().join("out/b/c.bin")).unwrap(),
        b"xyz"
    );
}

#[test]
fn test_missing_destination_without_create() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a.sff");
    hello_archive().write_to(&path);

    let config = ExtractionConfig::default().with_create_destination(false);
    let result = extract_archive(&path, temp.path().join("missing"), &config);
    assert!(result.is_err());
    assert!(!temp.path().join("missing").exists());
}

#[test]
fn test_manifest_reflects_table() {
    let bytes = hello_archive().add_raw(b"::", b"").build();
    let archive = Archive::parse(&bytes);
    let manifest = list_archive(&archive);

    // A zero-size record terminates the table, so "::" is not listed.
    assert_eq!(manifest.total_entries, 2);
    assert_eq!(manifest.total_size, 8);
    assert_eq!(manifest.entries[0].extension.as_deref(), Some("TXT"));
}
