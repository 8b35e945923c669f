//! Verify command implementation

use crate::cli::VerifyArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use sffx_core::VerificationStatus;
use sffx_core::verify_archive;

pub fn execute(args: &VerifyArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let report = add_archive_context(verify_archive(&args.archive), &args.archive)?;

    formatter.format_verification_report(&report)?;

    // Skipped names and trailing bytes still extract; only truncation fails.
    match report.status {
        VerificationStatus::Pass | VerificationStatus::Warning => Ok(()),
        VerificationStatus::Fail => match report.first_truncated {
            Some(index) => bail!("Archive verification failed: entry #{index} is truncated"),
            None => bail!("Archive verification failed"),
        },
    }
}
