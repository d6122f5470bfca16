//! Declarative signature descriptions.

use crate::config::{MatchMode, OffsetRange};
use crate::error::DetectError;
use crate::magic::MagicDetector;
use crate::media_type::MediaType;
use crate::util;

/// How the `pattern` string of a [`SignatureConfig`] is turned into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PatternEncoding {
    /// Each character is one byte; only Latin-1 characters are allowed.
    #[default]
    Text,
    /// Hexadecimal digits, optionally prefixed with `0x`.
    Hex,
}

impl PatternEncoding {
    /// Decodes a pattern string into bytes.
    pub fn decode(self, pattern: &str) -> Result<Vec<u8>, DetectError> {
        match self {
            PatternEncoding::Text => util::latin1_encode(pattern),
            PatternEncoding::Hex => util::decode_hex(pattern),
        }
    }
}

/// Description of one magic signature, as found in a signature catalog.
///
/// With the `serde` feature this deserializes from kebab-case keys:
///
/// ```
/// # #[cfg(feature = "serde")]
/// # {
/// use sniffrs::SignatureConfig;
///
/// let config: SignatureConfig = serde_json::from_str(r#"{
///     "media-type": "image/bmp",
///     "pattern": "BM",
///     "offset": "0:10"
/// }"#).unwrap();
/// let detector = config.build().unwrap();
/// assert_eq!(detector.media_type().subtype(), "bmp");
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case", deny_unknown_fields))]
pub struct SignatureConfig {
    /// Media type reported on a match, e.g. `application/pdf`.
    pub media_type: String,
    /// Signature bytes (or regex text), encoded per [`Self::encoding`].
    pub pattern: String,
    /// Encoding of [`Self::pattern`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub encoding: PatternEncoding,
    /// Hex-encoded bit mask. Missing bytes are fully significant.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub mask: Option<String>,
    /// Offset range as `"N"` or `"B:E"`. Defaults to `"0"`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub offset: Option<String>,
    /// Comparison mode.
    #[cfg_attr(feature = "serde", serde(default))]
    pub match_mode: MatchMode,
}

impl SignatureConfig {
    /// Creates a text signature at offset 0.
    pub fn new(media_type: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            pattern: pattern.into(),
            encoding: PatternEncoding::default(),
            mask: None,
            offset: None,
            match_mode: MatchMode::default(),
        }
    }

    /// Validates the description and compiles it into a detector.
    pub fn build(&self) -> Result<MagicDetector, DetectError> {
        let media_type: MediaType = self.media_type.parse()?;
        let pattern = self.encoding.decode(&self.pattern)?;
        let offsets = match self.offset.as_deref() {
            Some(offset) => offset.parse::<OffsetRange>()?,
            None => OffsetRange::default(),
        };

        let mut builder = MagicDetector::builder()
            .media_type(media_type)
            .pattern(pattern)
            .offsets(offsets)
            .match_mode(self.match_mode);
        if let Some(mask) = self.mask.as_deref() {
            builder = builder.mask(util::decode_hex(mask)?);
        }
        builder.build()
    }
}

impl TryFrom<&SignatureConfig> for MagicDetector {
    type Error = DetectError;

    fn try_from(config: &SignatureConfig) -> Result<Self, Self::Error> {
        config.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_text_signature() {
        let detector = SignatureConfig::new("application/pdf", "%PDF").build().unwrap();
        assert_eq!(detector.window_length(), 4);
        assert_eq!(detector.pattern(), b"%PDF");
        assert_eq!(detector.offsets(), OffsetRange::at(0));
    }

    #[test]
    fn test_build_hex_with_mask() {
        let config = SignatureConfig {
            encoding: PatternEncoding::Hex,
            mask: Some("0xFFFF00".into()),
            offset: Some("2:6".into()),
            ..SignatureConfig::new("image/x-test", "0x424d")
        };
        let detector = config.build().unwrap();
        assert_eq!(detector.window_length(), 3);
        assert_eq!(detector.mask(), &[0xFF, 0xFF, 0x00]);
        assert_eq!(detector.offsets(), OffsetRange::new(2, 6).unwrap());
    }

    #[test]
    fn test_build_rejects_bad_input() {
        assert!(SignatureConfig::new("pdf", "%PDF").build().is_err());

        let bad_hex = SignatureConfig {
            encoding: PatternEncoding::Hex,
            ..SignatureConfig::new("image/png", "89PNG")
        };
        assert!(matches!(
            bad_hex.build(),
            Err(DetectError::InvalidSignature { .. })
        ));

        let bad_offset = SignatureConfig {
            offset: Some("9:1".into()),
            ..SignatureConfig::new("image/bmp", "BM")
        };
        assert!(matches!(
            bad_offset.build(),
            Err(DetectError::InvalidOffsetRange { begin: 9, end: 1 })
        ));

        let wide_text = SignatureConfig::new("text/x-test", "\u{263A}");
        assert!(wide_text.build().is_err());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_deserialize_regex_signature() {
        let config: SignatureConfig = serde_json::from_str(
            r#"{
                "media-type": "image/gif",
                "pattern": "GIF8[79]a",
                "match-mode": "regex"
            }"#,
        )
        .unwrap();
        assert_eq!(config.match_mode, MatchMode::Regex);
        assert_eq!(config.encoding, PatternEncoding::Text);

        let detector = MagicDetector::try_from(&config).unwrap();
        assert_eq!(detector.match_mode(), MatchMode::Regex);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_deserialize_rejects_unknown_keys() {
        let result: Result<SignatureConfig, _> = serde_json::from_str(
            r#"{ "media-type": "image/gif", "pattern": "GIF", "priority": 50 }"#,
        );
        assert!(result.is_err());
    }
}
