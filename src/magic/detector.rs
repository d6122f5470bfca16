//! Magic-byte content type detection.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::buffer::ScratchBuffer;
use crate::config::{MatchMode, OffsetRange};
use crate::detector::{Detector, Metadata};
use crate::error::DetectError;
use crate::magic::MagicBuilder;
use crate::magic::signature::Signature;
use crate::media_type::MediaType;
use crate::stream::{MarkableRead, ScopedPeek, read_byte};

/// Detects one media type by looking for a byte signature near the start of
/// a stream.
///
/// The signature is a pattern, an optional bit mask and an inclusive range of
/// offsets where the pattern may start. In [`MatchMode::Regex`] the pattern
/// is a regular expression that must match at the start of a window.
///
/// A detector is immutable and can be shared between threads; each call
/// borrows the stream exclusively and leaves its read position where it
/// found it.
///
/// # Example
///
/// ```
/// use sniffrs::{MagicDetector, MediaType, RewindReader};
///
/// let pdf = MediaType::from_static("application", "pdf");
/// let detector = MagicDetector::new(pdf.clone(), b"%PDF");
///
/// let mut stream = RewindReader::new(&b"%PDF-1.4\n..."[..]);
/// assert_eq!(detector.match_stream(&mut stream)?, pdf);
///
/// let mut stream = RewindReader::new(&b"PDF-1.4"[..]);
/// assert!(detector.match_stream(&mut stream)?.is_unknown());
/// # Ok::<(), sniffrs::DetectError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MagicDetector {
    media_type: MediaType,
    signature: Signature,
    identity: String,
}

impl MagicDetector {
    /// Creates a detector for content that starts with exactly `pattern`.
    pub fn new(media_type: MediaType, pattern: impl AsRef<[u8]>) -> Self {
        Self::with_offset(media_type, pattern, 0)
    }

    /// Creates a detector for content that has exactly `pattern` at `offset`.
    pub fn with_offset(media_type: MediaType, pattern: impl AsRef<[u8]>, offset: usize) -> Self {
        Self::from_parts(
            media_type,
            pattern.as_ref(),
            None,
            OffsetRange::at(offset),
            MatchMode::Exact,
        )
    }

    /// Returns a builder for masks, offset ranges and regex signatures.
    pub fn builder() -> MagicBuilder {
        MagicBuilder::new()
    }

    pub(crate) fn from_parts(
        media_type: MediaType,
        pattern: &[u8],
        mask: Option<&[u8]>,
        offsets: OffsetRange,
        mode: MatchMode,
    ) -> Self {
        let signature = Signature::new(pattern, mask, offsets, mode);
        let identity = format!(
            "magic {} looking for {} bytes = {} mask = {}",
            media_type,
            signature.supplied_len(),
            hex::encode(signature.pattern()),
            hex::encode(signature.mask()),
        );
        Self {
            media_type,
            signature,
            identity,
        }
    }

    /// The media type reported on a match.
    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// The normalized (masked, padded) pattern.
    pub fn pattern(&self) -> &[u8] {
        self.signature.pattern()
    }

    /// The normalized mask; bytes not supplied are `0xFF`.
    pub fn mask(&self) -> &[u8] {
        self.signature.mask()
    }

    /// Length of the comparison window: the longer of pattern and mask.
    pub fn window_length(&self) -> usize {
        self.signature.window_length()
    }

    /// Candidate window start offsets.
    pub fn offsets(&self) -> OffsetRange {
        self.signature.offsets()
    }

    /// How the pattern is compared.
    pub fn match_mode(&self) -> MatchMode {
        self.signature.mode()
    }

    /// Stable description of type, pattern and mask.
    ///
    /// Detectors with equal identities are interchangeable; equality,
    /// hashing and ordering all follow it.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Number of bytes past the current position a stream must be able to
    /// rewind over for one detection.
    pub fn read_limit(&self) -> usize {
        self.signature.read_limit()
    }

    /// Tests `input` against the signature.
    ///
    /// Returns the configured media type on a match and
    /// [`MediaType::OCTET_STREAM`] otherwise, including when the stream is
    /// too short. The stream is rewound to its starting position on every
    /// path; I/O errors are returned after the rewind was attempted, and a
    /// failed rewind takes precedence.
    pub fn match_stream<S: MarkableRead + ?Sized>(
        &self,
        input: &mut S,
    ) -> Result<MediaType, DetectError> {
        let mut peek = ScopedPeek::new(input, self.read_limit())?;
        let outcome = self.scan(&mut peek);
        peek.restore()?;
        outcome
    }

    /// Tests an in-memory prefix of the content (starting at stream offset 0).
    pub fn match_bytes(&self, prefix: &[u8]) -> Result<MediaType, DetectError> {
        let begin = self.offsets().begin();
        if prefix.len() < begin {
            return Ok(MediaType::OCTET_STREAM);
        }
        let end = begin
            .saturating_add(self.signature.scan_length())
            .min(prefix.len());
        self.resolve(&prefix[begin..end])
    }

    fn scan<S: MarkableRead + ?Sized>(
        &self,
        peek: &mut ScopedPeek<'_, S>,
    ) -> Result<MediaType, DetectError> {
        let begin = self.offsets().begin();

        // skip() may legitimately stall; fall back to single-byte reads
        let mut offset = 0usize;
        while offset < begin {
            let remaining = begin - offset;
            let skipped = peek.skip(remaining as u64)?;
            if skipped > 0 {
                offset += usize::try_from(skipped).map_or(remaining, |n| n.min(remaining));
            } else if read_byte(peek)?.is_some() {
                offset += 1;
            } else {
                tracing::trace!(
                    media_type = %self.media_type,
                    offset,
                    "stream ended before signature offset"
                );
                return Ok(MediaType::OCTET_STREAM);
            }
        }

        let mut window = ScratchBuffer::take();
        window.fill_from(peek, fill_limit(self.signature.scan_length()))?;
        self.resolve(&window)
    }

    /// Decides on the bytes read from the first candidate offset onwards.
    pub(crate) fn resolve(&self, window: &[u8]) -> Result<MediaType, DetectError> {
        match self.signature.find(window)? {
            Some(offset) => {
                tracing::trace!(media_type = %self.media_type, offset, "magic matched");
                Ok(self.media_type.clone())
            }
            None => {
                tracing::trace!(
                    media_type = %self.media_type,
                    available = window.len(),
                    "magic did not match"
                );
                Ok(MediaType::OCTET_STREAM)
            }
        }
    }
}

/// Byte budget for a fill; the buffer only grows with what the stream
/// supplies, so an enormous range costs nothing on a short stream.
pub(crate) fn fill_limit(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// The metadata is not consulted.
impl Detector for MagicDetector {
    fn detect(
        &self,
        input: Option<&mut dyn MarkableRead>,
        _metadata: &Metadata,
    ) -> Result<MediaType, DetectError> {
        match input {
            Some(input) => self.match_stream(input),
            None => Ok(MediaType::OCTET_STREAM),
        }
    }
}

impl PartialEq for MagicDetector {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for MagicDetector {}

impl Hash for MagicDetector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl PartialOrd for MagicDetector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MagicDetector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity.cmp(&other.identity)
    }
}

impl fmt::Display for MagicDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity)
    }
}
