//! Reader and extractor for SFF game-asset archives.
//!
//! An SFF archive is a flat table of fixed 136-byte records (a little-endian
//! `u32` payload size and a 128-byte null-padded name) followed by the
//! payloads, stored back to back in table order. `sffx-core` parses the
//! table, turns stored names into safe relative paths and streams payloads
//! to disk in a single sequential pass.
//!
//! # Examples
//!
//! ```no_run
//! use sffx_core::ExtractionConfig;
//! use sffx_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_archive("data.sff", "/output/dir", &ExtractionConfig::default())?;
//! println!(
//!     "Extracted {} files ({} skipped)",
//!     report.files_extracted,
//!     report.skipped_count()
//! );
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod report;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use api::extract;
pub use api::extract_archive;
pub use api::extract_archive_with_progress;
pub use api::list_entries;
pub use api::load_archive;
pub use archive::Archive;
pub use archive::Entry;
pub use config::ExtractionConfig;
pub use error::ExtractionError;
pub use error::Result;
pub use extraction::CancelFlag;
pub use extraction::ExtractionEngine;
pub use extraction::ExtractionEvent;
pub use extraction::ExtractionJob;
pub use inspection::ArchiveManifest;
pub use inspection::IssueCategory;
pub use inspection::IssueSeverity;
pub use inspection::ManifestEntry;
pub use inspection::VerificationIssue;
pub use inspection::VerificationReport;
pub use inspection::VerificationStatus;
pub use inspection::list_archive;
pub use inspection::verify_archive;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;

// Re-export types module for easier access
pub use types::DestDir;
pub use types::SanitizedName;
pub use types::sanitize;
