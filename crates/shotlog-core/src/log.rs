//! The per-camera ordered event timeline.

use indexmap::IndexMap;

use crate::event::Event;

/// A recorded session: camera name → ordered event stream.
///
/// Camera insertion order and per-camera event order are both preserved,
/// so re-serializing a log reproduces the document it was parsed from.
/// Ordering is only meaningful *within* one camera's stream; streams from
/// different cameras are recorded concurrently and are independent.
///
/// # Examples
///
/// ```
/// use shotlog_core::{Event, EventKind, SessionLog};
///
/// let mut log = SessionLog::new();
/// log.append(Event {
///     camera: "Cam1".into(),
///     timestamp: 0,
///     kind: EventKind::TargetAdded { name: "IPSC".into() },
/// });
///
/// assert_eq!(log.camera_count(), 1);
/// assert_eq!(log.camera("Cam1").unwrap().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionLog {
    cameras: IndexMap<String, Vec<Event>>,
}

impl SessionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a camera stream exists, creating an empty one if absent.
    ///
    /// Re-opening an existing camera keeps its recorded events; later
    /// appends continue the same stream.
    pub fn open_camera(&mut self, name: &str) {
        if !self.cameras.contains_key(name) {
            self.cameras.insert(name.to_owned(), Vec::new());
        }
    }

    /// Append an event to its camera's stream, in arrival order.
    ///
    /// The destination stream is chosen by the event's own camera name,
    /// creating the stream if needed, so the key always matches the
    /// events stored under it.
    pub fn append(&mut self, event: Event) {
        self.cameras
            .entry(event.camera.clone())
            .or_default()
            .push(event);
    }

    /// The event stream for one camera, if present.
    pub fn camera(&self, name: &str) -> Option<&[Event]> {
        self.cameras.get(name).map(Vec::as_slice)
    }

    /// Iterate camera streams in insertion order.
    pub fn cameras(&self) -> impl Iterator<Item = (&str, &[Event])> {
        self.cameras
            .iter()
            .map(|(name, events)| (name.as_str(), events.as_slice()))
    }

    /// Number of camera streams.
    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    /// Total number of events across all cameras.
    pub fn event_count(&self) -> usize {
        self.cameras.values().map(Vec::len).sum()
    }

    /// True if the log holds no cameras at all.
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn feed(camera: &str, timestamp: u64, message: &str) -> Event {
        Event {
            camera: camera.into(),
            timestamp,
            kind: EventKind::ExerciseFeedMessage {
                message: message.into(),
            },
        }
    }

    #[test]
    fn append_routes_by_camera() {
        let mut log = SessionLog::new();
        log.append(feed("A", 1, "one"));
        log.append(feed("B", 2, "two"));
        log.append(feed("A", 3, "three"));

        assert_eq!(log.camera("A").unwrap().len(), 2);
        assert_eq!(log.camera("B").unwrap().len(), 1);
        assert_eq!(log.camera("C"), None);
    }

    #[test]
    fn camera_insertion_order_preserved() {
        let mut log = SessionLog::new();
        log.open_camera("Z");
        log.open_camera("A");
        log.open_camera("M");

        let names: Vec<_> = log.cameras().map(|(name, _)| name).collect();
        assert_eq!(names, ["Z", "A", "M"]);
    }

    #[test]
    fn reopen_keeps_existing_events() {
        let mut log = SessionLog::new();
        log.append(feed("A", 1, "before"));
        log.open_camera("A");
        log.append(feed("A", 2, "after"));

        let events = log.camera("A").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp, 1);
        assert_eq!(events[1].timestamp, 2);
    }

    #[test]
    fn counts() {
        let mut log = SessionLog::new();
        assert!(log.is_empty());
        assert_eq!(log.event_count(), 0);

        log.open_camera("A");
        assert!(!log.is_empty());
        assert_eq!(log.camera_count(), 1);
        assert_eq!(log.event_count(), 0);

        log.append(feed("A", 1, "x"));
        log.append(feed("B", 1, "y"));
        assert_eq!(log.camera_count(), 2);
        assert_eq!(log.event_count(), 2);
    }
}
