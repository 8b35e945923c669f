//! Archive verification implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::Archive;
use crate::ExtractionError;
use crate::Result;
use crate::inspection::report::IssueCategory;
use crate::inspection::report::IssueSeverity;
use crate::inspection::report::VerificationIssue;
use crate::inspection::report::VerificationReport;
use crate::inspection::report::VerificationStatus;
use crate::types::sanitize;

/// Checks an archive's payload layout without extracting.
///
/// Walks the directory table and compares each declared payload against the
/// bytes the source actually holds. Nothing is written to disk. Extraction
/// itself does not run this check; it fails lazily on the first short read.
///
/// Findings:
/// - the first entry whose payload runs past the end of the file (`Fail`)
/// - entries whose name is unrecoverable and will be skipped (`Warning`)
/// - bytes left over after the last payload (`Warning`)
///
/// # Errors
///
/// Returns `ExtractionError::Parse` if the file cannot be opened or read.
///
/// # Examples
///
/// ```no_run
/// use sffx_core::VerificationStatus;
/// use sffx_core::verify_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = verify_archive("data.sff")?;
/// if report.status != VerificationStatus::Pass {
///     for issue in &report.issues {
///         eprintln!("[{}] {}", issue.severity, issue.message);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn verify_archive<P: AsRef<Path>>(archive_path: P) -> Result<VerificationReport> {
    let path = archive_path.as_ref();
    let file = File::open(path).map_err(|e| ExtractionError::parse(path, e))?;
    let source_size = file
        .metadata()
        .map_err(|e| ExtractionError::parse(path, e))?
        .len();
    let archive = Archive::read_from(&mut BufReader::new(file))
        .map_err(|e| match e {
            ExtractionError::Io(io) => ExtractionError::parse(path, io),
            other => other,
        })?;

    let report = verify_layout(&archive, source_size);
    debug!(
        path = %path.display(),
        status = %report.status,
        issues = report.issues.len(),
        "verified archive"
    );
    Ok(report)
}

/// Builds the report for `archive` read from a source of `source_size` bytes.
fn verify_layout(archive: &Archive, source_size: u64) -> VerificationReport {
    let mut issues = Vec::new();
    let mut first_truncated = None;
    let mut unrecoverable_entries = 0;
    let mut cursor = archive.payload_offset();

    if archive.is_empty() {
        issues.push(VerificationIssue {
            severity: IssueSeverity::Info,
            category: IssueCategory::EmptyArchive,
            entry_index: None,
            message: "Directory table holds no entries".to_string(),
            context: None,
        });
    }

    for (index, entry) in archive.entries().iter().enumerate() {
        if sanitize(entry.name()).is_unrecoverable() {
            unrecoverable_entries += 1;
            issues.push(VerificationIssue {
                severity: IssueSeverity::Medium,
                category: IssueCategory::UnrecoverableName,
                entry_index: Some(index),
                message: format!("Entry #{index} has an unrecoverable name and will be skipped"),
                context: Some(format!("{:?}", entry.name())),
            });
        }

        let end = cursor + u64::from(entry.size());
        if first_truncated.is_none() && end > source_size {
            first_truncated = Some(index);
            issues.push(VerificationIssue {
                severity: IssueSeverity::High,
                category: IssueCategory::Truncation,
                entry_index: Some(index),
                message: format!(
                    "Entry #{index} declares {} bytes but only {} remain",
                    entry.size(),
                    source_size.saturating_sub(cursor)
                ),
                context: Some(entry.name().to_string()),
            });
        }
        cursor = end;
    }

    let trailing_bytes = source_size.saturating_sub(cursor);
    if trailing_bytes > 0 && !archive.is_empty() {
        issues.push(VerificationIssue {
            severity: IssueSeverity::Low,
            category: IssueCategory::TrailingData,
            entry_index: None,
            message: format!("{trailing_bytes} bytes follow the last payload"),
            context: None,
        });
    }

    issues.sort_by(|a, b| b.severity.cmp(&a.severity));

    VerificationReport {
        status: determine_status(&issues),
        issues,
        total_entries: archive.len(),
        total_size: archive.total_payload_size(),
        source_size,
        payload_offset: archive.payload_offset(),
        first_truncated,
        unrecoverable_entries,
        trailing_bytes,
    }
}

fn determine_status(issues: &[VerificationIssue]) -> VerificationStatus {
    match issues.iter().map(|i| i.severity).max() {
        Some(IssueSeverity::High) => VerificationStatus::Fail,
        Some(IssueSeverity::Medium | IssueSeverity::Low) => VerificationStatus::Warning,
        Some(IssueSeverity::Info) | None => VerificationStatus::Pass,
    }
}
