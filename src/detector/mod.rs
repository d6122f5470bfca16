//! Detection strategies.
//!
//! - [`Detector`] - One way of guessing a media type
//! - [`CompositeDetector`] - Ordered list of detectors, first answer wins
//! - [`DeclaredTypeDetector`] - Trusts the declared `Content-Type`
//! - [`Metadata`] - Properties known about the input

mod composite;
mod declared;
mod metadata;

use std::sync::Arc;

use crate::error::DetectError;
use crate::media_type::MediaType;
use crate::stream::MarkableRead;

pub use composite::CompositeDetector;
pub use declared::DeclaredTypeDetector;
pub use metadata::Metadata;

/// Guesses the media type of a document.
///
/// Implementations return [`MediaType::OCTET_STREAM`] when they cannot tell,
/// must leave the stream positioned where they found it, and must accept a
/// missing stream.
pub trait Detector: Send + Sync {
    /// Detects the media type of `input`, optionally using `metadata`.
    fn detect(
        &self,
        input: Option<&mut dyn MarkableRead>,
        metadata: &Metadata,
    ) -> Result<MediaType, DetectError>;
}

impl<D: Detector + ?Sized> Detector for Box<D> {
    fn detect(
        &self,
        input: Option<&mut dyn MarkableRead>,
        metadata: &Metadata,
    ) -> Result<MediaType, DetectError> {
        (**self).detect(input, metadata)
    }
}

impl<D: Detector + ?Sized> Detector for Arc<D> {
    fn detect(
        &self,
        input: Option<&mut dyn MarkableRead>,
        metadata: &Metadata,
    ) -> Result<MediaType, DetectError> {
        (**self).detect(input, metadata)
    }
}
