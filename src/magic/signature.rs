//! Compiled byte signatures and window comparison.

use std::sync::OnceLock;

use bytes::Bytes;
use regex::Regex;

use crate::config::{MatchMode, OffsetRange};
use crate::error::DetectError;
use crate::util::latin1_decode;

/// An immutable, normalized signature.
///
/// `pattern` and `mask` always have the window length. The pattern is stored
/// pre-masked so comparisons only need `byte & mask == pattern`.
#[derive(Debug, Clone)]
pub(crate) struct Signature {
    pattern: Bytes,
    mask: Bytes,
    supplied_len: usize,
    offsets: OffsetRange,
    mode: MatchMode,
    regex: OnceLock<Result<Regex, regex::Error>>,
}

impl Signature {
    pub(crate) fn new(
        pattern: &[u8],
        mask: Option<&[u8]>,
        offsets: OffsetRange,
        mode: MatchMode,
    ) -> Self {
        let len = pattern.len().max(mask.map_or(0, <[u8]>::len));

        let mut full_mask = vec![0xFFu8; len];
        if let Some(mask) = mask {
            full_mask[..mask.len()].copy_from_slice(mask);
        }
        let masked_pattern: Vec<u8> = full_mask
            .iter()
            .enumerate()
            .map(|(j, &m)| pattern.get(j).map_or(0, |&p| p & m))
            .collect();

        Self {
            pattern: Bytes::from(masked_pattern),
            mask: Bytes::from(full_mask),
            supplied_len: pattern.len(),
            offsets,
            mode,
            regex: OnceLock::new(),
        }
    }

    pub(crate) fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub(crate) fn mask(&self) -> &[u8] {
        &self.mask
    }

    pub(crate) fn window_length(&self) -> usize {
        self.pattern.len()
    }

    /// Length of the pattern as supplied, before padding to the mask length.
    pub(crate) fn supplied_len(&self) -> usize {
        self.supplied_len
    }

    pub(crate) fn offsets(&self) -> OffsetRange {
        self.offsets
    }

    pub(crate) fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Bytes a stream must be able to rewind over: the last window's end.
    pub(crate) fn read_limit(&self) -> usize {
        self.offsets.end().saturating_add(self.window_length())
    }

    /// Bytes read after skipping to the first candidate offset.
    pub(crate) fn scan_length(&self) -> usize {
        self.window_length().saturating_add(self.offsets.span())
    }

    /// Tests the bytes starting at the first candidate offset.
    ///
    /// Returns the absolute stream offset of the matching window. At least
    /// one full window must have been read; past the end of `window` every
    /// candidate compares against zero bytes.
    pub(crate) fn find(&self, window: &[u8]) -> Result<Option<usize>, DetectError> {
        let len = self.window_length();
        if window.len() < len {
            return Ok(None);
        }
        let span = self.offsets.span();

        let found = match self.mode {
            // Candidates starting past the data are all-zero and identical,
            // so the first of them stands for the rest
            MatchMode::Exact => {
                (0..=span.min(window.len())).find(|&i| self.matches_at(window, i))
            }
            MatchMode::Regex => {
                let regex = self.regex()?;
                // Every candidate overwrites the outcome of the one before, so
                // only the window at the end of the range can decide a match
                let text = latin1_decode(&zero_padded(window, span, len));
                regex
                    .find(&text)
                    .is_some_and(|m| m.start() == 0)
                    .then_some(span)
            }
        };

        Ok(found.map(|i| self.offsets.begin() + i))
    }

    fn matches_at(&self, window: &[u8], start: usize) -> bool {
        self.mask
            .iter()
            .zip(self.pattern.iter())
            .enumerate()
            .all(|(j, (&mask, &pattern))| byte_at(window, start + j) & mask == pattern)
    }

    fn regex(&self) -> Result<&Regex, DetectError> {
        self.regex
            .get_or_init(|| {
                let text = latin1_decode(&self.pattern);
                let compiled = Regex::new(&text);
                tracing::debug!(pattern = %text, ok = compiled.is_ok(), "compiled magic regex");
                compiled
            })
            .as_ref()
            .map_err(|e| DetectError::Pattern(e.clone()))
    }
}

/// Byte `index` of the window, reading zero past the bytes supplied.
fn byte_at(window: &[u8], index: usize) -> u8 {
    window.get(index).copied().unwrap_or(0)
}

/// The `len` bytes starting at `start`, zero-filled past the bytes supplied.
fn zero_padded(window: &[u8], start: usize, len: usize) -> Vec<u8> {
    (0..len).map(|j| byte_at(window, start.saturating_add(j))).collect()
}
