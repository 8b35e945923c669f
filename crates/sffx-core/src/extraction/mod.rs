//! Payload extraction.
//!
//! [`ExtractionEngine`] is the synchronous core: one seek to the payload
//! region, then strictly sequential reads. [`ExtractionJob`] runs the same
//! engine on a background thread and pushes [`ExtractionEvent`]s.

pub mod cancel;
pub mod engine;
pub mod job;
pub mod stream;

pub use cancel::CancelFlag;
pub use engine::ExtractionEngine;
pub use job::ExtractionEvent;
pub use job::ExtractionJob;
