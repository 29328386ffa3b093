//! Post-parse consistency checks over a [`SessionLog`].
//!
//! These checks are advisory: a violation signals a log that may not
//! replay faithfully, but it never fails a load. Violations are reported
//! to the caller as values and never corrected in place.

use std::fmt;

use crate::event::EventKind;
use crate::log::SessionLog;

/// A single consistency violation found in a session log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// A timestamp regressed within one camera's stream.
    NonMonotonicTimestamp {
        /// The camera whose stream is out of order.
        camera: String,
        /// Position of the offending event within the stream.
        position: usize,
        /// Timestamp of the preceding event.
        previous: u64,
        /// The regressed timestamp found.
        found: u64,
    },
    /// An event referenced a target index with no matching prior
    /// target-added event in the same stream.
    UnknownTargetIndex {
        /// The camera whose stream holds the reference.
        camera: String,
        /// Position of the referencing event within the stream.
        position: usize,
        /// The referenced target index.
        index: u32,
        /// How many targets were live at that point in the stream.
        live_targets: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonMonotonicTimestamp {
                camera,
                position,
                previous,
                found,
            } => write!(
                f,
                "camera {camera:?}: timestamp {found} at event {position} \
                 regresses below {previous}"
            ),
            Self::UnknownTargetIndex {
                camera,
                position,
                index,
                live_targets,
            } => write!(
                f,
                "camera {camera:?}: event {position} references target {index} \
                 but only {live_targets} target(s) were live"
            ),
        }
    }
}

/// Check a log for per-camera timestamp monotonicity and dangling
/// target references.
///
/// Returns every violation found, in stream order per camera. An empty
/// result means the log replays deterministically event-by-event.
pub fn validate(log: &SessionLog) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (camera, events) in log.cameras() {
        let mut previous: Option<u64> = None;
        let mut live_targets: usize = 0;

        for (position, event) in events.iter().enumerate() {
            if let Some(prev) = previous {
                if event.timestamp < prev {
                    violations.push(Violation::NonMonotonicTimestamp {
                        camera: camera.to_owned(),
                        position,
                        previous: prev,
                        found: event.timestamp,
                    });
                }
            }
            previous = Some(event.timestamp);

            match &event.kind {
                EventKind::Shot { target_index, .. } => {
                    if let Some(index) = target_index {
                        check_reference(camera, position, *index, live_targets, &mut violations);
                    }
                }
                EventKind::TargetAdded { .. } => live_targets += 1,
                EventKind::TargetRemoved { index } => {
                    check_reference(camera, position, *index, live_targets, &mut violations);
                    live_targets = live_targets.saturating_sub(1);
                }
                EventKind::TargetResized { index, .. } => {
                    check_reference(camera, position, *index, live_targets, &mut violations);
                }
                EventKind::TargetMoved { index, .. } => {
                    check_reference(camera, position, *index, live_targets, &mut violations);
                }
                EventKind::ExerciseFeedMessage { .. } => {}
            }
        }
    }

    violations
}

fn check_reference(
    camera: &str,
    position: usize,
    index: u32,
    live_targets: usize,
    violations: &mut Vec<Violation>,
) {
    if (index as usize) >= live_targets {
        violations.push(Violation::UnknownTargetIndex {
            camera: camera.to_owned(),
            position,
            index,
            live_targets,
        });
    }
}
