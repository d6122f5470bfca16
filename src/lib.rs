//! sniffrs
//!
//! Content-type sniffing from magic bytes for Rust.
//!
//! `sniffrs` decides what a byte stream contains by comparing configurable
//! signatures against a small window near its start. A signature is a byte
//! pattern with an optional per-byte bit mask, tried at every offset of an
//! inclusive range, or a regular expression anchored at the window start.
//!
//! Detection borrows the stream, peeks at most `offset_end + window_length`
//! bytes and always rewinds it, so the same stream can then be handed to
//! other detectors or to a parser.
//!
//! The crate intentionally:
//! - does NOT ship a signature catalog
//! - does NOT parse file contents
//! - does NOT open files or manage temp storage
//!
//! Unknown content is not an error: it is reported as
//! [`MediaType::OCTET_STREAM`].
//!
//! # Sync
//!
//! ```
//! use sniffrs::{CompositeDetector, Detector, MagicDetector, MediaType, Metadata, RewindReader};
//!
//! let detector = CompositeDetector::new()
//!     .with(MagicDetector::new(MediaType::from_static("application", "pdf"), b"%PDF"))
//!     .with(
//!         MagicDetector::builder()
//!             .media_type(MediaType::from_static("image", "gif"))
//!             .pattern(*b"GIF8[79]a")
//!             .regex()
//!             .build()?,
//!     );
//!
//! let mut stream = RewindReader::new(&b"GIF89a\x01\x00\x01\x00"[..]);
//! let found = detector.detect(Some(&mut stream), &Metadata::new())?;
//! assert_eq!(found.to_string(), "image/gif");
//! # Ok::<(), sniffrs::DetectError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::io::Cursor;
//! use sniffrs::{detect_async, MagicDetector, MediaType};
//!
//! async fn demo(detector: &MagicDetector) -> Result<(), sniffrs::DetectError> {
//!     let mut reader = Cursor::new(std::fs::read("report.pdf")?);
//!     let found = detect_async(detector, Some(&mut reader)).await?;
//!     println!("{found}");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod detector;
mod error;
mod magic;
mod media_type;
mod stream;

mod buffer; // internal (thread-local scratch reuse)
mod util; // internal (latin-1, hex)

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface
//

pub use config::{MatchMode, OffsetRange, PatternEncoding, SignatureConfig};
pub use detector::{CompositeDetector, DeclaredTypeDetector, Detector, Metadata};
pub use error::{DetectError, Result};
pub use magic::{MagicBuilder, MagicDetector};
pub use media_type::MediaType;
pub use stream::{MarkableRead, RewindReader, SKIP_CHUNK_SIZE, ScopedPeek, SeekRewind};

#[cfg(feature = "async-io")]
pub use async_io::detect_async;
