//! Background-thread recording with channel handoff.
//!
//! Capture pipelines run on their own threads. The recorder thread owns
//! its [`SessionRecorder`] exclusively (moved in via `thread::spawn`);
//! events arrive over an unbounded channel, so the handoff is the only
//! synchronization point and no stream is ever shared mid-append.

use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{unbounded, Sender};

use shotlog_core::{EventKind, SessionLog};

use crate::recorder::SessionRecorder;

/// A timestamped recording request sent to the recorder thread.
struct Submission {
    camera: String,
    timestamp: u64,
    kind: EventKind,
}

/// The recording side of a live session running on its own thread.
///
/// Submissions are stamped on the capture thread (the caller knows when
/// the event happened) and applied in channel order on the recorder
/// thread. [`shutdown`](Self::shutdown) closes the channel, drains what
/// is in flight, and returns the finished log.
pub struct RecorderHandle {
    started: Instant,
    tx: Sender<Submission>,
    thread: JoinHandle<SessionLog>,
}

/// The recorder thread is no longer accepting events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecorderClosed;

impl fmt::Display for RecorderClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recorder thread is no longer accepting events")
    }
}

impl std::error::Error for RecorderClosed {}

impl RecorderHandle {
    /// Start a recorder thread for a new session; the session clock
    /// starts now.
    pub fn spawn() -> Self {
        let (tx, rx) = unbounded::<Submission>();
        let thread = thread::spawn(move || {
            let mut recorder = SessionRecorder::new();
            for submission in rx {
                recorder.record_at(&submission.camera, submission.timestamp, submission.kind);
            }
            recorder.finish()
        });
        Self {
            started: Instant::now(),
            tx,
            thread,
        }
    }

    /// Submit an event, stamped with the elapsed session time at the
    /// call site.
    pub fn submit(&self, camera: &str, kind: EventKind) -> Result<(), RecorderClosed> {
        self.submit_at(camera, self.elapsed_ms(), kind)
    }

    /// Submit an event with an explicit session-relative timestamp.
    pub fn submit_at(
        &self,
        camera: &str,
        timestamp: u64,
        kind: EventKind,
    ) -> Result<(), RecorderClosed> {
        self.tx
            .send(Submission {
                camera: camera.to_owned(),
                timestamp,
                kind,
            })
            .map_err(|_| RecorderClosed)
    }

    /// Milliseconds elapsed since the session started.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Stop accepting events, drain everything in flight, and return
    /// the finished log.
    pub fn shutdown(self) -> Result<SessionLog, RecorderClosed> {
        drop(self.tx);
        self.thread.join().map_err(|_| RecorderClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_with_no_events_yields_an_empty_log() {
        let handle = RecorderHandle::spawn();
        let log = handle.shutdown().unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn submissions_are_drained_before_shutdown_returns() {
        let handle = RecorderHandle::spawn();
        for i in 0..100 {
            handle
                .submit_at("C", i, EventKind::TargetAdded { name: "a".into() })
                .unwrap();
        }

        let log = handle.shutdown().unwrap();
        assert_eq!(log.camera("C").unwrap().len(), 100);
    }

    #[test]
    fn per_camera_submission_order_is_preserved() {
        let handle = RecorderHandle::spawn();
        for i in 0..20 {
            handle
                .submit_at("A", i * 10, EventKind::TargetRemoved { index: 0 })
                .unwrap();
            handle
                .submit_at("B", i * 7, EventKind::TargetRemoved { index: 1 })
                .unwrap();
        }

        let log = handle.shutdown().unwrap();
        let a: Vec<u64> = log.camera("A").unwrap().iter().map(|e| e.timestamp).collect();
        let b: Vec<u64> = log.camera("B").unwrap().iter().map(|e| e.timestamp).collect();
        assert_eq!(a, (0..20).map(|i| i * 10).collect::<Vec<_>>());
        assert_eq!(b, (0..20).map(|i| i * 7).collect::<Vec<_>>());
    }
}
