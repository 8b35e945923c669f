//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use sffx_core::ExtractionConfig;
use sffx_core::ExtractionEvent;
use sffx_core::ExtractionJob;
use sffx_core::ProgressCallback;
use sffx_core::load_archive;
use std::env;
use std::sync::Arc;
use tracing::debug;

/// Runs the extraction on a worker thread and drives the progress bar from
/// its event channel.
///
/// `silent` suppresses the progress bar for quiet and JSON output.
pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter, silent: bool) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let mut config = ExtractionConfig::default().with_create_destination(!args.no_create);
    if let Some(size) = args.buffer_size {
        config = config.with_read_buffer_size(usize::try_from(size).unwrap_or(usize::MAX));
    }

    let archive = Arc::new(add_archive_context(
        load_archive(&args.archive),
        &args.archive,
    )?);
    debug!(
        entries = archive.len(),
        payload_offset = archive.payload_offset(),
        output = %output_dir.display(),
        "starting extraction"
    );

    let mut progress = (!silent && !args.no_progress && CliProgress::should_show())
        .then(|| CliProgress::new(archive.len(), "Extracting"));

    let job = add_archive_context(
        ExtractionJob::spawn(Arc::clone(&archive), &args.archive, &output_dir, config),
        &args.archive,
    )?;

    let mut outcome = None;
    for event in job.events() {
        match event {
            ExtractionEvent::Progress { completed, total } => {
                if let Some(bar) = progress.as_mut() {
                    bar.on_progress(completed, total);
                }
            }
            ExtractionEvent::Finished(result) => {
                outcome = Some(result);
                break;
            }
        }
    }

    let result = match outcome {
        Some(result) => result,
        None => job.wait(),
    };
    let report = add_archive_context(result, &args.archive)?;

    if let Some(mut bar) = progress {
        bar.on_complete();
    }

    formatter.format_extraction_result(&report)?;

    Ok(())
}
