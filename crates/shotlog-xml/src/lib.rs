//! XML serialization for ShotLog session logs.
//!
//! Converts between the on-disk session document and the in-memory
//! [`SessionLog`](shotlog_core::SessionLog) timeline:
//!
//! - [`read_session`] / [`parse_session_str`] parse a document in one
//!   forward pass, fail-fast and all-or-nothing
//! - [`SessionWriter`] serializes a complete log; [`EventStreamWriter`]
//!   streams events live as they occur
//! - [`load_session`] and [`save_session`] are the file-path surface,
//!   with post-parse consistency annotations on load
//!
//! # Format
//!
//! ```text
//! <session>
//!   <camera name="...">
//!     <shot color="..." x="..." y="..." shotTimestamp="..." markerRadius="..."
//!           timestamp="..." isMalfunction="..." isReload="..."
//!           targetIndex="..." hitRegionIndex="..." videos="..."/>
//!     <targetAdded timestamp="..." name="..."/>
//!     <targetRemoved timestamp="..." index="..."/>
//!     <targetResized timestamp="..." index="..." newWidth="..." newHeight="..."/>
//!     <targetMoved timestamp="..." index="..." newX="..." newY="..."/>
//!     <exerciseFeedMessage timestamp="...">message text</exerciseFeedMessage>
//!   </camera>
//! </session>
//! ```
//!
//! Optional shot indexes use `-1` for "absent" on disk and `Option` in
//! memory; the `videos` attribute is simply omitted when absent. Unknown
//! element names are skipped so newer recordings still load.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod reader;
pub mod writer;

mod attrs;
mod tags;

pub use error::SessionError;
pub use reader::{parse_session_str, read_session};
pub use writer::{EventStreamWriter, SessionWriter};

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use shotlog_core::{validate, SessionLog, Violation};

/// A successfully loaded session plus its consistency annotations.
///
/// A structurally valid document always loads; `violations` carries the
/// warning-level findings (timestamp regressions, dangling target
/// references) for the caller to act on.
#[derive(Clone, Debug)]
pub struct LoadedSession {
    /// The parsed per-camera timeline.
    pub log: SessionLog,
    /// Consistency findings; empty for a clean recording.
    pub violations: Vec<Violation>,
}

/// Load a session document from a file.
///
/// Structural or content errors abort the whole load — a partially
/// populated log is never returned. Consistency findings that do not
/// affect structure are returned alongside the log instead of failing it.
///
/// # Examples
///
/// ```no_run
/// let session = shotlog_xml::load_session("session.xml").unwrap();
/// for violation in &session.violations {
///     eprintln!("warning: {violation}");
/// }
/// ```
pub fn load_session<P: AsRef<Path>>(path: P) -> Result<LoadedSession, SessionError> {
    let file = File::open(path)?;
    let log = read_session(BufReader::new(file))?;
    let violations = validate(&log);
    Ok(LoadedSession { log, violations })
}

/// Save a session log to a file, replacing any existing content.
///
/// The sink is flushed before returning so buffered-write failures
/// surface here rather than being lost at drop.
pub fn save_session<P: AsRef<Path>>(path: P, log: &SessionLog) -> Result<(), SessionError> {
    let file = File::create(path)?;
    let mut writer = SessionWriter::new(BufWriter::new(file));
    writer.write_log(log)?;
    let mut sink = writer.into_inner();
    sink.flush()?;
    Ok(())
}
