//! Ordered chains of detectors.

use std::fmt;

use crate::detector::{Detector, Metadata};
use crate::error::DetectError;
use crate::media_type::MediaType;
use crate::stream::MarkableRead;

/// Runs detectors in priority order and reports the first known type.
///
/// Every member sees the stream at the same position, since each one rewinds
/// it. Errors from a member stop the chain.
///
/// # Example
///
/// ```
/// use sniffrs::{CompositeDetector, Detector, MagicDetector, MediaType, Metadata, RewindReader};
///
/// let detector = CompositeDetector::new()
///     .with(MagicDetector::new(MediaType::from_static("application", "pdf"), b"%PDF"))
///     .with(MagicDetector::new(MediaType::from_static("image", "png"), b"\x89PNG"));
///
/// let mut stream = RewindReader::new(&b"\x89PNG\r\n\x1a\n"[..]);
/// let found = detector.detect(Some(&mut stream), &Metadata::new())?;
/// assert_eq!(found.to_string(), "image/png");
/// # Ok::<(), sniffrs::DetectError>(())
/// ```
#[derive(Default)]
pub struct CompositeDetector {
    detectors: Vec<Box<dyn Detector>>,
}

impl CompositeDetector {
    /// Creates an empty chain, which always reports unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a detector with the lowest priority so far.
    pub fn with(mut self, detector: impl Detector + 'static) -> Self {
        self.push(detector);
        self
    }

    /// Appends a detector with the lowest priority so far.
    pub fn push(&mut self, detector: impl Detector + 'static) {
        self.detectors.push(Box::new(detector));
    }

    /// Number of member detectors.
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Whether the chain has no members.
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl<D: Detector + 'static> FromIterator<D> for CompositeDetector {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        let mut composite = Self::new();
        for detector in iter {
            composite.push(detector);
        }
        composite
    }
}

impl Detector for CompositeDetector {
    fn detect(
        &self,
        mut input: Option<&mut dyn MarkableRead>,
        metadata: &Metadata,
    ) -> Result<MediaType, DetectError> {
        for (index, detector) in self.detectors.iter().enumerate() {
            let media_type = match input.as_mut() {
                Some(stream) => detector.detect(Some(&mut **stream), metadata)?,
                None => detector.detect(None, metadata)?,
            };
            if !media_type.is_unknown() {
                tracing::debug!(index, media_type = %media_type, "detector chain resolved");
                return Ok(media_type);
            }
        }
        Ok(MediaType::OCTET_STREAM)
    }
}

impl fmt::Debug for CompositeDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeDetector")
            .field("detectors", &self.detectors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::MagicDetector;
    use crate::stream::RewindReader;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting(Arc<AtomicUsize>);

    impl Detector for Counting {
        fn detect(
            &self,
            _input: Option<&mut dyn MarkableRead>,
            _metadata: &Metadata,
        ) -> Result<MediaType, DetectError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(MediaType::OCTET_STREAM)
        }
    }

    fn magic(subtype: &'static str, pattern: &[u8]) -> MagicDetector {
        MagicDetector::new(MediaType::from_static("image", subtype), pattern)
    }

    #[test]
    fn test_empty_chain_is_unknown() {
        let mut stream = RewindReader::new(&b"BM"[..]);
        let found = CompositeDetector::new()
            .detect(Some(&mut stream), &Metadata::new())
            .unwrap();
        assert!(found.is_unknown());
    }

    #[test]
    fn test_first_known_wins_and_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = CompositeDetector::new()
            .with(magic("gif", b"GIF8"))
            .with(magic("bmp", b"BM"))
            .with(Counting(calls.clone()));

        let mut stream = RewindReader::new(&b"BM\x36\x00"[..]);
        let found = chain.detect(Some(&mut stream), &Metadata::new()).unwrap();
        assert_eq!(found.subtype(), "bmp");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let mut stream = RewindReader::new(&b"\x00\x00"[..]);
        let found = chain.detect(Some(&mut stream), &Metadata::new()).unwrap();
        assert!(found.is_unknown());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_iter_keeps_order() {
        let chain: CompositeDetector = vec![magic("a", b"AB"), magic("b", b"A")]
            .into_iter()
            .collect();
        assert_eq!(chain.len(), 2);
        let mut stream = RewindReader::new(&b"AB"[..]);
        let found = chain.detect(Some(&mut stream), &Metadata::new()).unwrap();
        assert_eq!(found.subtype(), "a");
    }
}
