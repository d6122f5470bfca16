//! Stream access for detectors.
//!
//! - [`MarkableRead`] - The mark/reset contract detectors consume
//! - [`RewindReader`] - Mark/reset for any reader, by retaining bytes
//! - [`SeekRewind`] - Mark/reset for seekable readers, by seeking
//! - [`ScopedPeek`] - Lookahead guard that always rewinds

mod mark;
mod peek;
mod rewind;
mod seek;

pub use mark::{MarkableRead, SKIP_CHUNK_SIZE};
pub use peek::ScopedPeek;
pub use rewind::RewindReader;
pub use seek::SeekRewind;

pub(crate) use mark::read_byte;
