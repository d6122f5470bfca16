//! Detection from declared metadata.

use crate::detector::{Detector, Metadata};
use crate::error::DetectError;
use crate::media_type::MediaType;
use crate::stream::MarkableRead;

/// Reports the media type declared under [`Metadata::CONTENT_TYPE`].
///
/// The stream is never read. A missing or malformed declaration yields
/// [`MediaType::OCTET_STREAM`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredTypeDetector;

impl Detector for DeclaredTypeDetector {
    fn detect(
        &self,
        _input: Option<&mut dyn MarkableRead>,
        metadata: &Metadata,
    ) -> Result<MediaType, DetectError> {
        let Some(declared) = metadata.get(Metadata::CONTENT_TYPE) else {
            return Ok(MediaType::OCTET_STREAM);
        };
        match declared.parse::<MediaType>() {
            Ok(media_type) => Ok(media_type),
            Err(e) => {
                tracing::trace!(error = %e, "ignoring malformed declared content type");
                Ok(MediaType::OCTET_STREAM)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type() {
        let metadata: Metadata = [(Metadata::CONTENT_TYPE, "Text/HTML; charset=utf-8")]
            .into_iter()
            .collect();
        let found = DeclaredTypeDetector.detect(None, &metadata).unwrap();
        assert_eq!(found.to_string(), "text/html");
    }

    #[test]
    fn test_missing_or_malformed() {
        assert!(DeclaredTypeDetector
            .detect(None, &Metadata::new())
            .unwrap()
            .is_unknown());

        let metadata: Metadata = [(Metadata::CONTENT_TYPE, "garbage")].into_iter().collect();
        assert!(DeclaredTypeDetector.detect(None, &metadata).unwrap().is_unknown());
    }
}
