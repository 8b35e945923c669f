//! Archive inspection without extraction.
//!
//! Listing works on an already loaded [`Archive`](crate::Archive) and never
//! touches payload bytes. Verification opens the source file and checks the
//! declared payload layout against its length, without writing anything.
//!
//! # Examples
//!
//! ```no_run
//! use sffx_core::Archive;
//! use sffx_core::list_archive;
//! use sffx_core::verify_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = Archive::open("data.sff")?;
//! let manifest = list_archive(&archive);
//! println!("Archive contains {} files", manifest.total_entries);
//!
//! let report = verify_archive("data.sff")?;
//! if report.is_extractable() {
//!     println!("All payloads are present");
//! }
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod manifest;
pub mod report;
pub mod verify;

pub use list::list_archive;
pub use manifest::ArchiveManifest;
pub use manifest::ManifestEntry;
pub use report::IssueCategory;
pub use report::IssueSeverity;
pub use report::VerificationIssue;
pub use report::VerificationReport;
pub use report::VerificationStatus;
pub use verify::verify_archive;
