//! Error types for sniffrs.
//!
//! An unrecognized stream is not an error: detection reports
//! [`MediaType::OCTET_STREAM`](crate::MediaType::OCTET_STREAM) instead.

use thiserror::Error;

/// Errors that can occur while building signatures or detecting content.
#[derive(Debug, Error)]
pub enum DetectError {
    /// A signature was described incompletely or inconsistently.
    #[error("invalid signature: {message}")]
    InvalidSignature {
        /// Description of what was invalid.
        message: String,
    },

    /// The offset range was negative or inverted.
    #[error("invalid offset range: [{begin},{end}]")]
    InvalidOffsetRange {
        /// First offset (inclusive) as supplied.
        begin: i64,
        /// Last offset (inclusive) as supplied.
        end: i64,
    },

    /// A media type string was not of the form `type/subtype`.
    #[error("invalid media type: {0:?}")]
    InvalidMediaType(String),

    /// The regular expression of a regex signature failed to compile.
    #[error("invalid magic pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// An I/O error occurred while reading, skipping or rewinding the input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DetectError {
    pub(crate) fn invalid_signature(message: impl Into<String>) -> Self {
        DetectError::InvalidSignature {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = DetectError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "test");
        let err: DetectError = io_err.into();
        assert!(matches!(err, DetectError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display() {
        let err = DetectError::InvalidOffsetRange { begin: 5, end: 2 };
        assert_eq!(err.to_string(), "invalid offset range: [5,2]");

        let err = DetectError::invalid_signature("magic match pattern is missing");
        assert!(err.to_string().contains("pattern is missing"));
    }
}
