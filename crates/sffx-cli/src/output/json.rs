//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use sffx_core::ArchiveManifest;
use sffx_core::ExtractionReport;
use sffx_core::VerificationReport;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ExtractionOutput {
    files_extracted: usize,
    skipped_count: usize,
    directories_created: usize,
    bytes_written: u64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&ExtractionReport> for ExtractionOutput {
    fn from(report: &ExtractionReport) -> Self {
        Self {
            files_extracted: report.files_extracted,
            skipped_count: report.skipped_count(),
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    index: usize,
    name: &'a str,
    size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<&'a str>,
    output_path: Option<&'a str>,
}

#[derive(Serialize)]
struct ManifestOutput<'a> {
    total_entries: usize,
    total_size: u64,
    payload_offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<Vec<EntryOutput<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    names: Option<Vec<&'a str>>,
}

#[derive(Serialize)]
struct IssueOutput<'a> {
    severity: String,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_index: Option<usize>,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
}

#[derive(Serialize)]
struct VerificationOutput<'a> {
    status: String,
    total_entries: usize,
    total_size: u64,
    source_size: u64,
    payload_offset: u64,
    first_truncated: Option<usize>,
    unrecoverable_entries: usize,
    trailing_bytes: u64,
    issues: Vec<IssueOutput<'a>>,
}

impl<'a> From<&'a VerificationReport> for VerificationOutput<'a> {
    fn from(report: &'a VerificationReport) -> Self {
        Self {
            status: report.status.to_string(),
            total_entries: report.total_entries,
            total_size: report.total_size,
            source_size: report.source_size,
            payload_offset: report.payload_offset,
            first_truncated: report.first_truncated,
            unrecoverable_entries: report.unrecoverable_entries,
            trailing_bytes: report.trailing_bytes,
            issues: report
                .issues
                .iter()
                .map(|issue| IssueOutput {
                    severity: issue.severity.to_string(),
                    category: issue.category.to_string(),
                    entry_index: issue.entry_index,
                    message: &issue.message,
                    context: issue.context.as_deref(),
                })
                .collect(),
        }
    }
}

fn manifest_output(manifest: &ArchiveManifest, long: bool) -> ManifestOutput<'_> {
    let (entries, names) = if long {
        let entries = manifest
            .entries
            .iter()
            .map(|entry| EntryOutput {
                index: entry.index,
                name: &entry.name,
                size: entry.size,
                extension: entry.extension.as_deref(),
                output_path: entry.output_path.as_deref(),
            })
            .collect();
        (Some(entries), None)
    } else {
        let names = manifest.entries.iter().map(|e| e.name.as_str()).collect();
        (None, Some(names))
    };

    ManifestOutput {
        total_entries: manifest.total_entries,
        total_size: manifest.total_size,
        payload_offset: manifest.payload_offset,
        entries,
        names,
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        Self::output(&JsonOutput::success(
            "extract",
            ExtractionOutput::from(report),
        ))
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        Self::output(&JsonOutput::success("list", manifest_output(manifest, false)))
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, _human_readable: bool) -> Result<()> {
        Self::output(&JsonOutput::success("list", manifest_output(manifest, true)))
    }

    fn format_verification_report(&self, report: &VerificationReport) -> Result<()> {
        Self::output(&JsonOutput::success(
            "verify",
            VerificationOutput::from(report),
        ))
    }
}
