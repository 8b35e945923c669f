//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use sffx_core::ArchiveManifest;
use sffx_core::ExtractionReport;
use sffx_core::VerificationReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()>;

    /// Format archive listing (names only)
    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()>;

    /// Format detailed archive listing
    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool)
    -> Result<()>;

    /// Format verification report
    fn format_verification_report(&self, report: &VerificationReport) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data,
        }
    }
}
