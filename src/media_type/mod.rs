//! Media type values returned by detectors.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::DetectError;

/// A `type/subtype` media type, always lowercase.
///
/// Parameters such as `; charset=utf-8` are not part of the value; parsing
/// strips them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaType {
    kind: Cow<'static, str>,
    subtype: Cow<'static, str>,
}

impl MediaType {
    /// The generic "unknown binary content" type, reported when nothing matched.
    pub const OCTET_STREAM: MediaType = MediaType::from_static("application", "octet-stream");

    /// Plain text.
    pub const TEXT_PLAIN: MediaType = MediaType::from_static("text", "plain");

    /// Creates a media type from static, already-lowercase parts.
    pub const fn from_static(kind: &'static str, subtype: &'static str) -> Self {
        Self {
            kind: Cow::Borrowed(kind),
            subtype: Cow::Borrowed(subtype),
        }
    }

    /// Creates a media type from a top-level type and a subtype.
    ///
    /// Returns an error if either part is empty or contains characters that
    /// are not allowed in a media type token.
    pub fn new(kind: &str, subtype: &str) -> Result<Self, DetectError> {
        let kind = kind.trim();
        let subtype = subtype.trim();
        if !is_token(kind) || !is_token(subtype) {
            return Err(DetectError::InvalidMediaType(format!("{kind}/{subtype}")));
        }
        Ok(Self {
            kind: Cow::Owned(kind.to_ascii_lowercase()),
            subtype: Cow::Owned(subtype.to_ascii_lowercase()),
        })
    }

    /// Top-level type, e.g. `application`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Subtype, e.g. `pdf`.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Whether this is the generic unknown type.
    pub fn is_unknown(&self) -> bool {
        *self == Self::OCTET_STREAM
    }
}

// RFC 2045 token: printable ASCII minus space and tspecials.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?=".contains(&b)
        })
}

impl FromStr for MediaType {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default();
        match essence.split_once('/') {
            Some((kind, subtype)) => {
                Self::new(kind, subtype).map_err(|_| DetectError::InvalidMediaType(s.to_owned()))
            }
            None => Err(DetectError::InvalidMediaType(s.to_owned())),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}

impl Default for MediaType {
    fn default() -> Self {
        Self::OCTET_STREAM
    }
}
