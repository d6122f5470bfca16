//! The mark/reset stream contract.

use std::io::{self, Read};

/// Largest number of bytes a default [`MarkableRead::skip`] discards per call.
pub const SKIP_CHUNK_SIZE: usize = 2048;

/// A readable stream that can remember a position and rewind to it.
///
/// This is the only capability detectors need from their input. `mark`
/// establishes a restore point valid for at least `read_limit` further
/// bytes; `reset` rewinds to it. Implementations may invalidate the mark once
/// more than `read_limit` bytes have been read past it.
///
/// See [`RewindReader`](crate::RewindReader) for any [`Read`] and
/// [`SeekRewind`](crate::SeekRewind) for seekable sources.
pub trait MarkableRead: Read {
    /// Sets the restore point at the current position.
    fn mark(&mut self, read_limit: usize) -> io::Result<()>;

    /// Rewinds to the last restore point.
    ///
    /// Fails if no mark was set or the mark has been invalidated.
    fn reset(&mut self) -> io::Result<()>;

    /// Discards up to `n` bytes and returns how many were discarded.
    ///
    /// May return fewer than requested, including 0 before the end of the
    /// stream. The default reads into a small stack buffer.
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let mut scratch = [0u8; SKIP_CHUNK_SIZE];
        let want = usize::try_from(n).map_or(SKIP_CHUNK_SIZE, |n| n.min(SKIP_CHUNK_SIZE));
        loop {
            match self.read(&mut scratch[..want]) {
                Ok(read) => return Ok(read as u64),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<S: MarkableRead + ?Sized> MarkableRead for &mut S {
    fn mark(&mut self, read_limit: usize) -> io::Result<()> {
        (**self).mark(read_limit)
    }

    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }

    fn skip(&mut self, n: u64) -> io::Result<u64> {
        (**self).skip(n)
    }
}

impl<S: MarkableRead + ?Sized> MarkableRead for Box<S> {
    fn mark(&mut self, read_limit: usize) -> io::Result<()> {
        (**self).mark(read_limit)
    }

    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }

    fn skip(&mut self, n: u64) -> io::Result<u64> {
        (**self).skip(n)
    }
}

/// Reads a single byte, retrying on interruption. `None` at end of stream.
pub(crate) fn read_byte<R: Read + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
