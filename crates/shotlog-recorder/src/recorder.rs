//! In-memory recording with session-relative timestamps.

use std::time::Instant;

use shotlog_core::{Event, EventKind, SessionLog};

/// Records events into a [`SessionLog`] as they arrive from capture.
///
/// Timestamps are milliseconds since the recorder was created, so a
/// recording started at any wall-clock time replays from zero. Events
/// are appended in arrival order, which keeps every camera stream
/// monotonically ordered without any sorting.
///
/// # Examples
///
/// ```
/// use shotlog_core::EventKind;
/// use shotlog_recorder::SessionRecorder;
///
/// let mut recorder = SessionRecorder::new();
/// recorder.record_at("Cam1", 0, EventKind::TargetAdded { name: "IPSC".into() });
/// recorder.record_at("Cam1", 1500, EventKind::TargetRemoved { index: 0 });
///
/// let log = recorder.finish();
/// assert_eq!(log.camera("Cam1").unwrap().len(), 2);
/// ```
pub struct SessionRecorder {
    started: Instant,
    log: SessionLog,
}

impl SessionRecorder {
    /// Start a new session; the session clock starts now.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            log: SessionLog::new(),
        }
    }

    /// Register a camera feed before any of its events arrive, so the
    /// camera appears in the log even if it never records an event.
    pub fn open_camera(&mut self, name: &str) {
        self.log.open_camera(name);
    }

    /// Record an event now, stamped with the elapsed session time.
    pub fn record(&mut self, camera: &str, kind: EventKind) {
        let timestamp = self.elapsed_ms();
        self.record_at(camera, timestamp, kind);
    }

    /// Record an event with an explicit session-relative timestamp.
    pub fn record_at(&mut self, camera: &str, timestamp: u64, kind: EventKind) {
        self.log.append(Event {
            camera: camera.to_owned(),
            timestamp,
            kind,
        });
    }

    /// Milliseconds elapsed since the session started.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Events recorded so far, across all cameras.
    pub fn event_count(&self) -> usize {
        self.log.event_count()
    }

    /// Finish recording and hand over the completed log.
    pub fn finish(self) -> SessionLog {
        self.log
    }
}

impl Default for SessionRecorder {
    fn default() -> Self {
        Self::new()
    }
}
