//! Error types for session serialization.

use std::fmt;
use std::io;

use quick_xml::events::attributes::AttrError;

/// Errors that can occur while reading or writing a session document.
///
/// Every variant aborts the operation that raised it: a load never
/// returns a partially-populated log, and a write never leaves an
/// element half-emitted without reporting it.
#[derive(Debug)]
pub enum SessionError {
    /// An I/O error occurred on the underlying source or sink.
    Io(io::Error),
    /// The document is not well-formed XML, or carries content the
    /// session grammar cannot represent.
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A required attribute is missing or its value failed conversion.
    MalformedAttribute {
        /// The element the attribute belongs to.
        tag: &'static str,
        /// The attribute name.
        field: &'static str,
        /// The raw attribute value, or `None` if the attribute is absent.
        raw: Option<String>,
    },
    /// An event element appeared before any `camera` element opened.
    OrphanEvent {
        /// The offending element name.
        tag: String,
    },
    /// A `camera` element has no `name` attribute.
    OrphanCamera,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Malformed { detail } => write!(f, "malformed session document: {detail}"),
            Self::MalformedAttribute {
                tag,
                field,
                raw: Some(raw),
            } => write!(f, "invalid value {raw:?} for attribute {field} on <{tag}>"),
            Self::MalformedAttribute {
                tag,
                field,
                raw: None,
            } => write!(f, "missing required attribute {field} on <{tag}>"),
            Self::OrphanEvent { tag } => {
                write!(f, "event element <{tag}> outside of any <camera>")
            }
            Self::OrphanCamera => write!(f, "<camera> element without a name attribute"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<quick_xml::Error> for SessionError {
    fn from(e: quick_xml::Error) -> Self {
        match e {
            quick_xml::Error::Io(inner) => Self::Io(io::Error::new(inner.kind(), inner)),
            other => Self::Malformed {
                detail: other.to_string(),
            },
        }
    }
}

impl From<AttrError> for SessionError {
    fn from(e: AttrError) -> Self {
        Self::Malformed {
            detail: e.to_string(),
        }
    }
}
