//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use sffx_core::ArchiveManifest;
use sffx_core::ExtractionReport;
use sffx_core::IssueSeverity;
use sffx_core::VerificationReport;
use sffx_core::VerificationStatus;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    /// Listing footer, e.g. `3 files · 1.2 KB total`.
    fn format_summary(manifest: &ArchiveManifest) -> String {
        format!(
            "{} files · {:.1} KB total",
            Self::format_number(manifest.total_entries),
            manifest.total_size as f64 / 1024.0
        )
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn severity_label(&self, severity: IssueSeverity) -> String {
        if !self.use_colors {
            return format!("[{severity}]");
        }
        match severity {
            IssueSeverity::High => style("HIGH").red().bold().to_string(),
            IssueSeverity::Medium => style("MEDIUM").yellow().to_string(),
            IssueSeverity::Low => style("LOW").blue().to_string(),
            IssueSeverity::Info => style("INFO").cyan().to_string(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            self.line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ));
        } else {
            self.line("Extraction complete");
        }

        self.line(&format!(
            "  Files extracted: {}",
            Self::format_number(report.files_extracted)
        ));
        self.line(&format!(
            "  Skipped (unrecoverable names): {}",
            Self::format_number(report.skipped_count())
        ));
        self.line(&format!("  Directories: {}", report.directories_created));
        self.line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            self.line(&format!("  Duration: {:?}", report.duration));
        }

        if report.has_warnings() {
            self.line("");
            if self.use_colors {
                self.line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.line("Warnings:");
            }
            for warning in &report.warnings {
                self.line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            self.line(&entry.name);
        }

        Ok(())
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            let size_str = if human_readable {
                Self::format_size(u64::from(entry.size))
            } else {
                entry.size.to_string()
            };
            let ext = entry.extension.as_deref().unwrap_or("-");

            let mut row = format!(
                "{:>5}  {:>10}  {:<5}  {}",
                entry.index, size_str, ext, entry.name
            );
            match &entry.output_path {
                None => row.push_str("  [skipped: unrecoverable name]"),
                Some(out) if self.verbose && *out != entry.name => {
                    row.push_str(&format!("  -> {out}"));
                }
                Some(_) => {}
            }
            self.line(&row);
        }

        self.line("");
        self.line(&Self::format_summary(manifest));
        if self.verbose {
            self.line(&format!("Payload offset: {}", manifest.payload_offset));
        }

        Ok(())
    }

    fn format_verification_report(&self, report: &VerificationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let status_str = match report.status {
                VerificationStatus::Pass => style("PASSED").green().bold(),
                VerificationStatus::Warning => style("WARNING").yellow().bold(),
                VerificationStatus::Fail => style("FAILED").red().bold(),
            };
            self.line(&format!("Archive verification: {status_str}"));
        } else {
            self.line(&format!("Archive verification: {}", report.status));
        }

        self.line(&format!(
            "  Total entries: {}",
            Self::format_number(report.total_entries)
        ));
        self.line(&format!(
            "  Declared size: {}",
            Self::format_size(report.total_size)
        ));
        self.line(&format!(
            "  Source size: {}",
            Self::format_size(report.source_size)
        ));
        if self.verbose {
            self.line(&format!("  Payload offset: {}", report.payload_offset));
        }
        if report.unrecoverable_entries > 0 {
            self.line(&format!(
                "  Unrecoverable entries: {}",
                report.unrecoverable_entries
            ));
        }
        if report.trailing_bytes > 0 {
            self.line(&format!("  Trailing bytes: {}", report.trailing_bytes));
        }

        if !report.issues.is_empty() {
            self.line("");
            self.line("Issues:");

            for issue in &report.issues {
                let label = self.severity_label(issue.severity);
                match (issue.entry_index, &issue.context) {
                    (Some(_), Some(context)) if self.verbose => {
                        self.line(&format!("  {label} {} ({context})", issue.message));
                    }
                    _ => self.line(&format!("  {label} {}", issue.message)),
                }
            }
        }

        Ok(())
    }
}
