//! Configuration for signature matching.
//!
//! - [`MatchMode`] - Exact masked comparison or anchored regex
//! - [`OffsetRange`] - Inclusive span of candidate window starts
//! - [`SignatureConfig`] - Declarative description of one signature

mod signature;

use std::fmt;
use std::str::FromStr;

use crate::error::DetectError;

pub use signature::{PatternEncoding, SignatureConfig};

/// How the pattern of a signature is compared against the stream window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatchMode {
    /// Byte-for-byte comparison after applying the mask.
    #[default]
    Exact,
    /// The pattern is a regular expression (Latin-1 text) that must match
    /// at the start of the window.
    Regex,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Exact => f.write_str("exact"),
            MatchMode::Regex => f.write_str("regex"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "" => Ok(MatchMode::Exact),
            "regex" => Ok(MatchMode::Regex),
            other => Err(DetectError::invalid_signature(format!(
                "unknown match mode {other:?}"
            ))),
        }
    }
}

/// Inclusive range of stream offsets at which a signature window may start.
///
/// Note that `end` is the start of the last window tried, not the offset of
/// the last byte read: a detector reads up to `end + window_length` bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OffsetRange {
    begin: usize,
    end: usize,
}

impl OffsetRange {
    /// Creates a validated range.
    ///
    /// Returns error if `begin` is negative or `end < begin`.
    pub fn new(begin: i64, end: i64) -> Result<Self, DetectError> {
        if begin < 0 || end < begin {
            return Err(DetectError::InvalidOffsetRange { begin, end });
        }
        let (Ok(b), Ok(e)) = (usize::try_from(begin), usize::try_from(end)) else {
            return Err(DetectError::InvalidOffsetRange { begin, end });
        };
        Ok(Self { begin: b, end: e })
    }

    /// A range holding a single offset.
    pub const fn at(offset: usize) -> Self {
        Self {
            begin: offset,
            end: offset,
        }
    }

    /// First candidate offset.
    pub const fn begin(&self) -> usize {
        self.begin
    }

    /// Last candidate offset.
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of extra candidate offsets after `begin` (`end - begin`).
    pub const fn span(&self) -> usize {
        self.end - self.begin
    }
}

impl fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}:{}", self.begin, self.end)
        }
    }
}

/// Parses `"N"` or `"B:E"`.
impl FromStr for OffsetRange {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim().parse::<i64>().map_err(|_| {
                DetectError::invalid_signature(format!("invalid offset {s:?}"))
            })
        };
        match s.split_once(':') {
            Some((begin, end)) => Self::new(parse(begin)?, parse(end)?),
            None => {
                let offset = parse(s)?;
                Self::new(offset, offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_range_valid() {
        let range = OffsetRange::new(2, 10).unwrap();
        assert_eq!(range.begin(), 2);
        assert_eq!(range.end(), 10);
        assert_eq!(range.span(), 8);
        assert_eq!(OffsetRange::default(), OffsetRange::at(0));
    }

    #[test]
    fn test_offset_range_invalid() {
        assert!(matches!(
            OffsetRange::new(-1, 4),
            Err(DetectError::InvalidOffsetRange { begin: -1, end: 4 })
        ));
        assert!(matches!(
            OffsetRange::new(5, 4),
            Err(DetectError::InvalidOffsetRange { begin: 5, end: 4 })
        ));
        assert!(OffsetRange::new(-3, -1).is_err());
    }

    #[test]
    fn test_offset_range_parse() {
        assert_eq!("4".parse::<OffsetRange>().unwrap(), OffsetRange::at(4));
        assert_eq!(
            "0:10".parse::<OffsetRange>().unwrap(),
            OffsetRange::new(0, 10).unwrap()
        );
        assert!("10:0".parse::<OffsetRange>().is_err());
        assert!("-2".parse::<OffsetRange>().is_err());
        assert!("x:1".parse::<OffsetRange>().is_err());
    }

    #[test]
    fn test_offset_range_display() {
        assert_eq!(OffsetRange::at(3).to_string(), "3");
        assert_eq!(OffsetRange::new(0, 8).unwrap().to_string(), "0:8");
    }

    #[test]
    fn test_match_mode_parse() {
        assert_eq!("exact".parse::<MatchMode>().unwrap(), MatchMode::Exact);
        assert_eq!("REGEX".parse::<MatchMode>().unwrap(), MatchMode::Regex);
        assert!("glob".parse::<MatchMode>().is_err());
        assert_eq!(MatchMode::default(), MatchMode::Exact);
    }
}
