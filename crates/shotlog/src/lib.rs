//! ShotLog: recording and replay of camera-based training session logs.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the ShotLog sub-crates. For most users, adding `shotlog` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use shotlog::prelude::*;
//!
//! // Record a short session.
//! let mut recorder = SessionRecorder::new();
//! recorder.record_at("Cam1", 0, EventKind::TargetAdded { name: "IPSC".into() });
//! recorder.record_at(
//!     "Cam1",
//!     2000,
//!     EventKind::ExerciseFeedMessage { message: "Drill Started".into() },
//! );
//! let log = recorder.finish();
//!
//! // Serialize it and parse it back.
//! let mut buf = Vec::new();
//! let mut writer = SessionWriter::new(&mut buf);
//! writer.write_log(&log).unwrap();
//!
//! let parsed = read_session(buf.as_slice()).unwrap();
//! assert_eq!(parsed, log);
//! assert!(validate(&parsed).is_empty());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`model`] | `shotlog-core` | Event types, the session log, consistency checks |
//! | [`xml`] | `shotlog-xml` | Streaming parser and writers, file load/save |
//! | [`recorder`] | `shotlog-recorder` | Live recording, background-thread handoff |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Event model, session log, and consistency checks (`shotlog-core`).
pub use shotlog_core as model;

/// Live recording surfaces (`shotlog-recorder`).
///
/// [`recorder::SessionRecorder`] for same-thread recording,
/// [`recorder::RecorderHandle`] for capture threads feeding a dedicated
/// recorder thread.
pub use shotlog_recorder as recorder;

/// Session document serialization (`shotlog-xml`).
///
/// Parse with [`xml::read_session`] or [`xml::load_session`]; write with
/// [`xml::SessionWriter`], [`xml::EventStreamWriter`], or
/// [`xml::save_session`].
pub use shotlog_xml as xml;

/// Common imports for typical ShotLog usage.
///
/// ```rust
/// use shotlog::prelude::*;
/// ```
pub mod prelude {
    pub use shotlog_core::{validate, Event, EventKind, SessionLog, ShotColor, Violation};
    pub use shotlog_recorder::{RecorderHandle, SessionRecorder};
    pub use shotlog_xml::{
        load_session, parse_session_str, read_session, save_session, EventStreamWriter,
        LoadedSession, SessionError, SessionWriter,
    };
}
