//! Live session recording for ShotLog camera feeds.
//!
//! - [`SessionRecorder`] collects events into a [`shotlog_core::SessionLog`]
//!   with timestamps relative to the session start
//! - [`RecorderHandle`] runs a recorder on its own thread and accepts
//!   events from capture threads over a channel
//!
//! Recording and playback are mutually exclusive phases over a session:
//! the log leaves this crate only once recording has finished, so no
//! reader ever observes a stream mid-append.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod handle;
pub mod recorder;

pub use handle::{RecorderClosed, RecorderHandle};
pub use recorder::SessionRecorder;
