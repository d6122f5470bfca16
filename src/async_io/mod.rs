//! Async detection support.
//!
//! This module provides signature detection over `futures-io::AsyncRead` +
//! `AsyncSeek` readers, making it runtime-agnostic and compatible with tokio,
//! async-std, smol, and other async runtimes.
//!
//! - [`detect_async`] - Tests an async reader and seeks it back
//!
//! This module requires the `async-io` feature to be enabled.

mod detect;

pub use detect::detect_async;
