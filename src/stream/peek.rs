//! Scoped lookahead with guaranteed rewind.

use std::io::{self, Read};

use crate::stream::MarkableRead;

/// Borrows a stream for a bounded lookahead and rewinds it afterwards.
///
/// Creating the guard marks the stream. Call [`restore`](Self::restore) to
/// rewind and observe any rewind failure; if the guard is dropped instead
/// (early return, panic) the rewind is still attempted and a failure is only
/// logged.
///
/// ```
/// use std::io::Read;
/// use sniffrs::{RewindReader, ScopedPeek};
///
/// let mut stream = RewindReader::new(&b"BMP data"[..]);
/// let mut peek = ScopedPeek::new(&mut stream, 2)?;
/// let mut magic = [0u8; 2];
/// peek.read_exact(&mut magic)?;
/// peek.restore()?;
///
/// let mut all = String::new();
/// stream.read_to_string(&mut all)?;
/// assert_eq!(all, "BMP data");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ScopedPeek<'a, S: MarkableRead + ?Sized> {
    stream: &'a mut S,
    armed: bool,
}

impl<'a, S: MarkableRead + ?Sized> ScopedPeek<'a, S> {
    /// Marks `stream` with a restore point valid for `read_limit` bytes.
    pub fn new(stream: &'a mut S, read_limit: usize) -> io::Result<Self> {
        stream.mark(read_limit)?;
        Ok(Self {
            stream,
            armed: true,
        })
    }

    /// Discards up to `n` bytes of the peeked stream.
    pub fn skip(&mut self, n: u64) -> io::Result<u64> {
        self.stream.skip(n)
    }

    /// Rewinds the stream to where the peek started.
    pub fn restore(mut self) -> io::Result<()> {
        self.armed = false;
        self.stream.reset()
    }
}

impl<S: MarkableRead + ?Sized> Read for ScopedPeek<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl<S: MarkableRead + ?Sized> Drop for ScopedPeek<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.stream.reset() {
                tracing::warn!(error = %e, "failed to rewind stream after abandoned peek");
            }
        }
    }
}
