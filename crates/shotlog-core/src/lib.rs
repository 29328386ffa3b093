//! Core types for the ShotLog session system.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the session event model, the per-camera ordered event log, and the
//! post-parse consistency checks.
//!
//! The on-disk encoding of these types lives in `shotlog-xml`; the only
//! format-aware pieces here are the two boundary conversions the wire
//! format needs (the optional-index sentinel and the shot color literal
//! table), kept next to the types they encode.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod event;
pub mod log;
pub mod validate;

pub use event::{
    decode_index, encode_index, Event, EventKind, InvalidIndexError, ShotColor, ABSENT_INDEX,
    GREEN_LITERAL, RED_LITERAL,
};
pub use log::SessionLog;
pub use validate::{validate, Violation};
