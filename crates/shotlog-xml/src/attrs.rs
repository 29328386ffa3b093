//! Typed access to decoded element attributes.
//!
//! Attribute values are unescaped once up front; the typed accessors map
//! every failure (absent attribute, failed conversion, out-of-range
//! sentinel) to [`SessionError::MalformedAttribute`] carrying the field
//! name and the raw value.

use std::str::FromStr;

use quick_xml::escape::unescape;
use quick_xml::events::BytesStart;

use shotlog_core::decode_index;

use crate::error::SessionError;

/// The decoded attributes of one element.
pub(crate) struct Attrs {
    tag: &'static str,
    pairs: Vec<(String, String)>,
}

impl Attrs {
    /// Decode and unescape every attribute of `element`.
    pub(crate) fn read(tag: &'static str, element: &BytesStart<'_>) -> Result<Self, SessionError> {
        let mut pairs = Vec::new();
        for attr in element.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let raw = std::str::from_utf8(&attr.value).map_err(|e| SessionError::Malformed {
                detail: format!("attribute {key} on <{tag}> is not UTF-8: {e}"),
            })?;
            let value = unescape(raw)
                .map_err(|e| SessionError::Malformed {
                    detail: format!("bad character reference in attribute {key} on <{tag}>: {e}"),
                })?
                .into_owned();
            pairs.push((key, value));
        }
        Ok(Self { tag, pairs })
    }

    /// The value of `field`, if the attribute is present.
    pub(crate) fn get(&self, field: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }

    /// The value of `field`, or `MalformedAttribute` with `raw: None`.
    pub(crate) fn require(&self, field: &'static str) -> Result<&str, SessionError> {
        self.get(field).ok_or(SessionError::MalformedAttribute {
            tag: self.tag,
            field,
            raw: None,
        })
    }

    /// Parse a required attribute via `FromStr`.
    pub(crate) fn parse<T: FromStr>(&self, field: &'static str) -> Result<T, SessionError> {
        let raw = self.require(field)?;
        raw.parse().map_err(|_| self.invalid(field, raw))
    }

    /// Parse a required sentinel-encoded optional index (`-1` means absent).
    pub(crate) fn optional_index(&self, field: &'static str) -> Result<Option<u32>, SessionError> {
        let raw = self.require(field)?;
        let encoded: i64 = raw.parse().map_err(|_| self.invalid(field, raw))?;
        decode_index(encoded).map_err(|_| self.invalid(field, raw))
    }

    /// An optional string attribute; absence means `None`.
    pub(crate) fn optional_string(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_owned)
    }

    fn invalid(&self, field: &'static str, raw: &str) -> SessionError {
        SessionError::MalformedAttribute {
            tag: self.tag,
            field,
            raw: Some(raw.to_owned()),
        }
    }
}
