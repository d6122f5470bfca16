//! Builder for fully configured magic detectors.

use crate::config::{MatchMode, OffsetRange};
use crate::error::DetectError;
use crate::magic::MagicDetector;
use crate::media_type::MediaType;

/// Configures a [`MagicDetector`] with a mask, an offset range or regex mode.
///
/// # Example
///
/// ```
/// use sniffrs::{MagicDetector, MatchMode, MediaType};
///
/// let detector = MagicDetector::builder()
///     .media_type(MediaType::from_static("image", "bmp"))
///     .pattern(*b"BM")
///     .offset_range(0, 10)
///     .build()?;
/// assert_eq!(detector.match_mode(), MatchMode::Exact);
/// # Ok::<(), sniffrs::DetectError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MagicBuilder {
    media_type: Option<MediaType>,
    pattern: Option<Vec<u8>>,
    mask: Option<Vec<u8>>,
    offsets: (i64, i64),
    mode: MatchMode,
}

impl MagicBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the media type reported on a match.
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    /// Sets the signature bytes (regex text in [`MatchMode::Regex`]).
    pub fn pattern(mut self, pattern: impl Into<Vec<u8>>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the per-byte bit mask.
    pub fn mask(mut self, mask: impl Into<Vec<u8>>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// Sets an already validated offset range.
    pub fn offsets(mut self, offsets: OffsetRange) -> Self {
        self.offsets = (offsets.begin() as i64, offsets.end() as i64);
        self
    }

    /// Sets the offset range from raw bounds; validated by [`build`](Self::build).
    pub fn offset_range(mut self, begin: i64, end: i64) -> Self {
        self.offsets = (begin, end);
        self
    }

    /// Sets the comparison mode.
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `match_mode(MatchMode::Regex)`.
    pub fn regex(self) -> Self {
        self.match_mode(MatchMode::Regex)
    }

    /// Validates the configuration and builds the detector.
    ///
    /// Returns error if the media type or pattern is missing or the offset
    /// range is negative or inverted.
    pub fn build(self) -> Result<MagicDetector, DetectError> {
        let media_type = self
            .media_type
            .ok_or_else(|| DetectError::invalid_signature("matching media type is missing"))?;
        let pattern = self
            .pattern
            .ok_or_else(|| DetectError::invalid_signature("magic match pattern is missing"))?;
        let offsets = OffsetRange::new(self.offsets.0, self.offsets.1)?;

        let detector =
            MagicDetector::from_parts(media_type, &pattern, self.mask.as_deref(), offsets, self.mode);
        tracing::debug!(
            media_type = %detector.media_type(),
            window = detector.window_length(),
            offsets = %offsets,
            mode = %self.mode,
            "built magic detector"
        );
        Ok(detector)
    }
}
