//! Verification report types.

use std::fmt;

/// Overall verdict of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Every payload is present and the layout is clean.
    Pass,
    /// Extraction will succeed, but some entries are skipped or the source
    /// carries unexpected bytes.
    Warning,
    /// Extraction will stop with a truncation error.
    Fail,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warning => write!(f, "WARNING"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Severity of a single issue, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueSeverity {
    /// Informational only.
    Info,
    /// Unusual but harmless.
    Low,
    /// Data will be lost for this entry.
    Medium,
    /// Extraction will fail.
    High,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// What kind of problem an issue describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// A payload extends past the end of the source.
    Truncation,
    /// An entry name sanitizes to nothing and will be skipped.
    UnrecoverableName,
    /// Bytes follow the last payload.
    TrailingData,
    /// The directory table holds no entries.
    EmptyArchive,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncation => write!(f, "truncation"),
            Self::UnrecoverableName => write!(f, "unrecoverable_name"),
            Self::TrailingData => write!(f, "trailing_data"),
            Self::EmptyArchive => write!(f, "empty_archive"),
        }
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationIssue {
    /// Severity level.
    pub severity: IssueSeverity,
    /// Issue kind.
    pub category: IssueCategory,
    /// Entry the issue refers to, if any.
    pub entry_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
    /// Extra detail, such as the raw entry name.
    pub context: Option<String>,
}

/// Result of [`verify_archive`](crate::verify_archive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// Overall verdict.
    pub status: VerificationStatus,
    /// Findings, most severe first.
    pub issues: Vec<VerificationIssue>,
    /// Number of entries in the directory table.
    pub total_entries: usize,
    /// Sum of declared payload sizes.
    pub total_size: u64,
    /// Length of the source file in bytes.
    pub source_size: u64,
    /// Byte offset of the payload region.
    pub payload_offset: u64,
    /// Index of the first entry whose payload is cut short.
    pub first_truncated: Option<usize>,
    /// Number of entries that would be skipped.
    pub unrecoverable_entries: usize,
    /// Bytes after the last payload.
    pub trailing_bytes: u64,
}

impl VerificationReport {
    /// Returns `true` if extraction is expected to run to completion.
    #[must_use]
    pub fn is_extractable(&self) -> bool {
        self.status != VerificationStatus::Fail
    }

    /// Returns the number of issues at `severity` or above.
    #[must_use]
    pub fn count_at_least(&self, severity: IssueSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity >= severity).count()
    }
}
