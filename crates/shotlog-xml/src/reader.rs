//! Streaming session parser.
//!
//! A single forward pass over the document's element events, with the
//! parse position carried in an explicit [`ParseState`] value threaded
//! through the loop — never in ambient parser state. Parsing is
//! fail-fast and all-or-nothing: the log under construction is returned
//! only on full success, so a malformed file can never hand a silently
//! truncated session to a replay engine. Unrecognized element names are
//! skipped, so recordings from newer builds still load.

use std::io::BufRead;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesCData, BytesStart, BytesText, Event as XmlEvent};
use quick_xml::Reader;

use shotlog_core::{Event, EventKind, SessionLog, ShotColor};

use crate::attrs::Attrs;
use crate::error::SessionError;
use crate::tags::{
    ATTR_COLOR, ATTR_HIT_REGION_INDEX, ATTR_INDEX, ATTR_IS_MALFUNCTION, ATTR_IS_RELOAD,
    ATTR_MARKER_RADIUS, ATTR_NAME, ATTR_NEW_HEIGHT, ATTR_NEW_WIDTH, ATTR_NEW_X, ATTR_NEW_Y,
    ATTR_SHOT_TIMESTAMP, ATTR_TARGET_INDEX, ATTR_TIMESTAMP, ATTR_VIDEOS, ATTR_X, ATTR_Y,
    TAG_CAMERA, TAG_FEED_MESSAGE, TAG_SHOT, TAG_TARGET_ADDED, TAG_TARGET_MOVED,
    TAG_TARGET_REMOVED, TAG_TARGET_RESIZED,
};

/// Parser position within the element stream.
#[derive(Debug)]
enum ParseState {
    /// No `camera` element has opened yet.
    Idle,
    /// Events append to the named camera's stream.
    InCamera {
        /// The open camera.
        camera: String,
    },
    /// An `exerciseFeedMessage` element opened; its timestamp attribute
    /// is already captured, and the next text event carries the body.
    AwaitingFeedText {
        /// The open camera.
        camera: String,
        /// Timestamp captured from the feed element.
        timestamp: u64,
    },
}

/// Recognized event element names.
///
/// Element names are mapped onto this closed set before dispatch, so the
/// constructor match below is exhaustive and a new event kind cannot be
/// added without the compiler pointing at every place that must learn
/// about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EventTag {
    Shot,
    TargetAdded,
    TargetRemoved,
    TargetResized,
    TargetMoved,
    FeedMessage,
}

impl EventTag {
    fn from_name(name: &[u8]) -> Option<Self> {
        if name == TAG_SHOT.as_bytes() {
            Some(Self::Shot)
        } else if name == TAG_TARGET_ADDED.as_bytes() {
            Some(Self::TargetAdded)
        } else if name == TAG_TARGET_REMOVED.as_bytes() {
            Some(Self::TargetRemoved)
        } else if name == TAG_TARGET_RESIZED.as_bytes() {
            Some(Self::TargetResized)
        } else if name == TAG_TARGET_MOVED.as_bytes() {
            Some(Self::TargetMoved)
        } else if name == TAG_FEED_MESSAGE.as_bytes() {
            Some(Self::FeedMessage)
        } else {
            None
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Shot => TAG_SHOT,
            Self::TargetAdded => TAG_TARGET_ADDED,
            Self::TargetRemoved => TAG_TARGET_REMOVED,
            Self::TargetResized => TAG_TARGET_RESIZED,
            Self::TargetMoved => TAG_TARGET_MOVED,
            Self::FeedMessage => TAG_FEED_MESSAGE,
        }
    }
}

/// Parse a complete session document from a buffered byte source.
///
/// The result is the whole log or an error — never a partial log.
pub fn read_session<R: BufRead>(source: R) -> Result<SessionLog, SessionError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut log = SessionLog::new();
    let mut state = ParseState::Idle;

    loop {
        match reader.read_event_into(&mut buf)? {
            XmlEvent::Start(e) => {
                state = handle_element(&mut log, state, &e, false)?;
            }
            XmlEvent::Empty(e) => {
                state = handle_element(&mut log, state, &e, true)?;
            }
            XmlEvent::Text(e) => {
                state = handle_text(&mut log, state, text_content(e)?);
            }
            XmlEvent::CData(e) => {
                state = handle_text(&mut log, state, cdata_content(e)?);
            }
            XmlEvent::End(e) => {
                // A feed element may close without any text event; complete
                // it with an empty message so the event is not dropped.
                state = match state {
                    ParseState::AwaitingFeedText { camera, timestamp }
                        if e.name().as_ref() == TAG_FEED_MESSAGE.as_bytes() =>
                    {
                        log.append(Event {
                            camera: camera.clone(),
                            timestamp,
                            kind: EventKind::ExerciseFeedMessage {
                                message: String::new(),
                            },
                        });
                        ParseState::InCamera { camera }
                    }
                    other => other,
                };
            }
            XmlEvent::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(log)
}

/// Parse a session document held in memory.
pub fn parse_session_str(document: &str) -> Result<SessionLog, SessionError> {
    read_session(document.as_bytes())
}

fn handle_element(
    log: &mut SessionLog,
    state: ParseState,
    element: &BytesStart<'_>,
    self_closing: bool,
) -> Result<ParseState, SessionError> {
    let name = element.name();

    if name.as_ref() == TAG_CAMERA.as_bytes() {
        let attrs = Attrs::read(TAG_CAMERA, element)?;
        let camera = attrs
            .get(ATTR_NAME)
            .ok_or(SessionError::OrphanCamera)?
            .to_owned();
        log.open_camera(&camera);
        return Ok(ParseState::InCamera { camera });
    }

    let Some(event_tag) = EventTag::from_name(name.as_ref()) else {
        // Unknown element: skip it, children and all.
        return Ok(state);
    };

    let camera = match &state {
        ParseState::Idle => {
            return Err(SessionError::OrphanEvent {
                tag: event_tag.name().to_owned(),
            })
        }
        ParseState::InCamera { camera } | ParseState::AwaitingFeedText { camera, .. } => {
            camera.clone()
        }
    };

    let attrs = Attrs::read(event_tag.name(), element)?;
    let timestamp: u64 = attrs.parse(ATTR_TIMESTAMP)?;

    let kind = match event_tag {
        EventTag::FeedMessage => {
            if self_closing {
                // No text can follow a self-closing element.
                log.append(Event {
                    camera,
                    timestamp,
                    kind: EventKind::ExerciseFeedMessage {
                        message: String::new(),
                    },
                });
                return Ok(state);
            }
            return Ok(ParseState::AwaitingFeedText { camera, timestamp });
        }
        EventTag::Shot => EventKind::Shot {
            color: ShotColor::from_literal(attrs.require(ATTR_COLOR)?),
            x: attrs.parse(ATTR_X)?,
            y: attrs.parse(ATTR_Y)?,
            shot_timestamp: attrs.parse(ATTR_SHOT_TIMESTAMP)?,
            marker_radius: attrs.parse(ATTR_MARKER_RADIUS)?,
            is_malfunction: attrs.parse(ATTR_IS_MALFUNCTION)?,
            is_reload: attrs.parse(ATTR_IS_RELOAD)?,
            target_index: attrs.optional_index(ATTR_TARGET_INDEX)?,
            hit_region_index: attrs.optional_index(ATTR_HIT_REGION_INDEX)?,
            videos: attrs.optional_string(ATTR_VIDEOS),
        },
        EventTag::TargetAdded => EventKind::TargetAdded {
            name: attrs.require(ATTR_NAME)?.to_owned(),
        },
        EventTag::TargetRemoved => EventKind::TargetRemoved {
            index: attrs.parse(ATTR_INDEX)?,
        },
        EventTag::TargetResized => EventKind::TargetResized {
            index: attrs.parse(ATTR_INDEX)?,
            new_width: attrs.parse(ATTR_NEW_WIDTH)?,
            new_height: attrs.parse(ATTR_NEW_HEIGHT)?,
        },
        EventTag::TargetMoved => EventKind::TargetMoved {
            index: attrs.parse(ATTR_INDEX)?,
            new_x: attrs.parse(ATTR_NEW_X)?,
            new_y: attrs.parse(ATTR_NEW_Y)?,
        },
    };

    log.append(Event {
        camera,
        timestamp,
        kind,
    });
    Ok(state)
}

fn handle_text(log: &mut SessionLog, state: ParseState, content: String) -> ParseState {
    match state {
        ParseState::AwaitingFeedText { camera, timestamp } => {
            log.append(Event {
                camera: camera.clone(),
                timestamp,
                kind: EventKind::ExerciseFeedMessage { message: content },
            });
            ParseState::InCamera { camera }
        }
        // Inter-element whitespace and stray text are not events.
        other => other,
    }
}

fn text_content(text: BytesText<'_>) -> Result<String, SessionError> {
    let bytes = text.into_inner();
    let raw = std::str::from_utf8(&bytes).map_err(|e| SessionError::Malformed {
        detail: format!("text content is not UTF-8: {e}"),
    })?;
    Ok(unescape(raw)
        .map_err(|e| SessionError::Malformed {
            detail: format!("bad character reference in text content: {e}"),
        })?
        .into_owned())
}

fn cdata_content(text: BytesCData<'_>) -> Result<String, SessionError> {
    let bytes = text.into_inner();
    let raw = std::str::from_utf8(&bytes).map_err(|e| SessionError::Malformed {
        detail: format!("CDATA content is not UTF-8: {e}"),
    })?;
    Ok(raw.to_owned())
}
