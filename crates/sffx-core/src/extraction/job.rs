//! Background extraction with a push-style event channel.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::TryRecvError;
use std::thread;
use std::thread::JoinHandle;

use tracing::debug;

use super::CancelFlag;
use super::ExtractionEngine;
use crate::Archive;
use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;

/// Event emitted by a running [`ExtractionJob`].
#[derive(Debug)]
pub enum ExtractionEvent {
    /// One more entry has been written or skipped.
    Progress {
        /// Entries processed so far (1-indexed).
        completed: usize,
        /// Total number of entries.
        total: usize,
    },
    /// The run ended. Always the last event of a job.
    Finished(Result<ExtractionReport>),
}

/// An extraction running on its own thread.
///
/// Progress is pushed over a channel so an interactive frontend can poll it
/// from its own loop without blocking. The engine itself stays synchronous;
/// cancellation is observed at the next entry boundary. Dropping the job
/// requests cancellation.
///
/// # Examples
///
/// ```no_run
/// use sffx_core::Archive;
/// use sffx_core::ExtractionConfig;
/// use sffx_core::extraction::ExtractionEvent;
/// use sffx_core::extraction::ExtractionJob;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = Arc::new(Archive::open("data.sff")?);
/// let job = ExtractionJob::spawn(archive, "data.sff", "out", ExtractionConfig::default())?;
///
/// for event in job.events() {
///     match event {
///         ExtractionEvent::Progress { completed, total } => println!("{completed}/{total}"),
///         ExtractionEvent::Finished(result) => {
///             println!("skipped {}", result?.skipped_count());
///             break;
///         }
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractionJob {
    events: Receiver<ExtractionEvent>,
    cancel: CancelFlag,
    handle: Option<JoinHandle<()>>,
}

impl ExtractionJob {
    /// Starts extracting `archive` from the file at `source` into
    /// `destination` on a new thread.
    ///
    /// The source file is opened on the worker thread; failing to open it is
    /// reported as `ExtractionError::Parse` in the `Finished` event.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if the thread cannot be spawned.
    pub fn spawn(
        archive: Arc<Archive>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        config: ExtractionConfig,
    ) -> Result<Self> {
        let source = source.into();
        let destination = destination.into();
        let cancel = CancelFlag::new();
        let engine = ExtractionEngine::new(config).with_cancel_flag(cancel.clone());
        let (tx, rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("sffx-extract".to_string())
            .spawn(move || {
                let progress_tx = tx.clone();
                let mut on_progress = move |completed: usize, total: usize| {
                    // The receiver may already be gone; the run still completes.
                    let _ = progress_tx.send(ExtractionEvent::Progress { completed, total });
                };

                let result = File::open(&source)
                    .map_err(|e| ExtractionError::parse(&source, e))
                    .and_then(|mut file| {
                        engine.extract(&archive, &mut file, &destination, &mut on_progress)
                    });

                debug!(ok = result.is_ok(), "extraction job finished");
                let _ = tx.send(ExtractionEvent::Finished(result));
            })?;

        Ok(Self {
            events: rx,
            cancel,
            handle: Some(handle),
        })
    }

    /// Requests cancellation at the next entry boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns a handle to this job's cancellation flag.
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Returns the event receiver for blocking iteration.
    #[must_use]
    pub fn events(&self) -> &Receiver<ExtractionEvent> {
        &self.events
    }

    /// Returns the next pending event without blocking.
    #[must_use]
    pub fn try_next(&self) -> Option<ExtractionEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Drains remaining events, joins the worker and returns its result.
    ///
    /// # Errors
    ///
    /// Returns the extraction error, or `ExtractionError::Io` if the worker
    /// panicked or the `Finished` event was already consumed.
    pub fn wait(mut self) -> Result<ExtractionReport> {
        let mut outcome = None;
        for event in self.events.iter() {
            if let ExtractionEvent::Finished(result) = event {
                outcome = Some(result);
            }
        }

        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| {
                ExtractionError::Io(std::io::Error::other("extraction thread panicked"))
            })?;
        }

        outcome.unwrap_or_else(|| {
            Err(ExtractionError::Io(std::io::Error::other(
                "extraction result was already received",
            )))
        })
    }
}

impl Drop for ExtractionJob {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel.cancel();
        }
    }
}
