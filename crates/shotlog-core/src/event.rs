//! Session event types and the format-boundary conversions.

use std::fmt;

/// Color of a detected laser shot.
///
/// The capture pipeline distinguishes exactly two colors. The on-disk
/// form is a color literal; the mapping is a closed table, so supporting
/// another color means adding a table entry here rather than touching
/// any shot-handling logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShotColor {
    /// A red laser impact.
    Red,
    /// A green laser impact.
    Green,
}

/// The literal encoding [`ShotColor::Red`] on disk.
pub const RED_LITERAL: &str = "0xff0000ff";

/// The literal emitted for [`ShotColor::Green`] on disk.
///
/// Decoding is deliberately wider: anything that is not [`RED_LITERAL`]
/// decodes as green.
pub const GREEN_LITERAL: &str = "0x008000ff";

impl ShotColor {
    /// Decode a color literal.
    ///
    /// [`RED_LITERAL`] decodes to `Red`; every other accepted literal
    /// decodes to `Green`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shotlog_core::ShotColor;
    ///
    /// assert_eq!(ShotColor::from_literal("0xff0000ff"), ShotColor::Red);
    /// assert_eq!(ShotColor::from_literal("0x008000ff"), ShotColor::Green);
    /// assert_eq!(ShotColor::from_literal("chartreuse"), ShotColor::Green);
    /// ```
    pub fn from_literal(literal: &str) -> Self {
        if literal == RED_LITERAL {
            Self::Red
        } else {
            Self::Green
        }
    }

    /// The literal this color encodes to.
    ///
    /// Re-encoding a red shot always yields [`RED_LITERAL`].
    pub fn literal(self) -> &'static str {
        match self {
            Self::Red => RED_LITERAL,
            Self::Green => GREEN_LITERAL,
        }
    }
}

impl fmt::Display for ShotColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
        }
    }
}

// ── Optional-index sentinel ─────────────────────────────────────

/// Encoded value meaning "no index" for the optional index attributes.
pub const ABSENT_INDEX: i64 = -1;

/// Encode an optional index for the on-disk form (`None` ↔ `-1`).
pub fn encode_index(index: Option<u32>) -> i64 {
    match index {
        Some(i) => i64::from(i),
        None => ABSENT_INDEX,
    }
}

/// Decode an optional index from the on-disk form.
///
/// `-1` decodes to `None`; a non-negative value decodes to `Some`.
/// Any other value is invalid.
///
/// # Examples
///
/// ```
/// use shotlog_core::decode_index;
///
/// assert_eq!(decode_index(-1).unwrap(), None);
/// assert_eq!(decode_index(3).unwrap(), Some(3));
/// assert!(decode_index(-5).is_err());
/// ```
pub fn decode_index(raw: i64) -> Result<Option<u32>, InvalidIndexError> {
    if raw == ABSENT_INDEX {
        return Ok(None);
    }
    u32::try_from(raw)
        .map(Some)
        .map_err(|_| InvalidIndexError { raw })
}

/// An encoded index value outside the representable range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidIndexError {
    /// The offending encoded value.
    pub raw: i64,
}

impl fmt::Display for InvalidIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid encoded index {} (expected -1 or n >= 0)", self.raw)
    }
}

impl std::error::Error for InvalidIndexError {}

// ── Events ──────────────────────────────────────────────────────

/// One recorded occurrence in a session.
///
/// Every event belongs to a named camera stream and carries a timestamp
/// in milliseconds since the session started. The kind-specific fields
/// live in [`EventKind`].
///
/// # Examples
///
/// ```
/// use shotlog_core::{Event, EventKind};
///
/// let event = Event {
///     camera: "Cam1".into(),
///     timestamp: 1500,
///     kind: EventKind::TargetAdded { name: "IPSC".into() },
/// };
///
/// assert_eq!(event.camera, "Cam1");
/// assert_eq!(event.timestamp, 1500);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Name of the camera stream this event belongs to.
    pub camera: String,
    /// Milliseconds since the session started.
    pub timestamp: u64,
    /// The kind-specific payload.
    pub kind: EventKind,
}

/// All session event kinds.
///
/// `Target*` variants track the overlay lifecycle; targets are addressed
/// by index within their camera's stream.
#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    /// A detected laser impact.
    Shot {
        /// Detected shot color.
        color: ShotColor,
        /// Horizontal impact position, in feed pixels.
        x: f64,
        /// Vertical impact position, in feed pixels.
        y: f64,
        /// Detection timestamp, milliseconds since the session started.
        shot_timestamp: u64,
        /// Radius of the on-screen impact marker, in pixels.
        marker_radius: u32,
        /// Whether the exercise classified this shot as a malfunction drill.
        is_malfunction: bool,
        /// Whether the exercise classified this shot as a reload drill.
        is_reload: bool,
        /// Target hit by this shot, if any.
        target_index: Option<u32>,
        /// Region hit within the target, if any.
        hit_region_index: Option<u32>,
        /// Associated video clip names, if recorded.
        videos: Option<String>,
    },
    /// A target overlay was added.
    TargetAdded {
        /// File name of the added target.
        name: String,
    },
    /// A target overlay was removed.
    TargetRemoved {
        /// Index of the removed target.
        index: u32,
    },
    /// A target overlay was resized.
    TargetResized {
        /// Index of the resized target.
        index: u32,
        /// New width, in feed pixels.
        new_width: f64,
        /// New height, in feed pixels.
        new_height: f64,
    },
    /// A target overlay was moved.
    TargetMoved {
        /// Index of the moved target.
        index: u32,
        /// New horizontal position, in feed pixels.
        new_x: i32,
        /// New vertical position, in feed pixels.
        new_y: i32,
    },
    /// A textual status update from a training exercise.
    ExerciseFeedMessage {
        /// The message body.
        message: String,
    },
}
