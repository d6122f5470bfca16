//! Signature ("magic number") matching.
//!
//! - [`MagicDetector`] - Tests a stream against one signature
//! - [`MagicBuilder`] - Masks, offset ranges and regex signatures

mod builder;
mod detector;
mod signature;

pub use builder::MagicBuilder;
pub use detector::MagicDetector;
