//! Mark/reset over any reader by retaining the bytes read since the mark.

use std::io::{self, Read};

use crate::stream::MarkableRead;

/// Adds [`MarkableRead`] to any [`Read`], including pipes and sockets.
///
/// While a mark is set, every byte handed out is also retained (up to the
/// mark's read limit) so that [`reset`](MarkableRead::reset) can replay it.
/// Reading past the limit drops the mark and the retained bytes.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use sniffrs::{MarkableRead, RewindReader};
///
/// let mut reader = RewindReader::new(&b"%PDF-1.4"[..]);
/// reader.mark(4)?;
/// let mut magic = [0u8; 4];
/// reader.read_exact(&mut magic)?;
/// reader.reset()?;
///
/// let mut all = Vec::new();
/// reader.read_to_end(&mut all)?;
/// assert_eq!(all, b"%PDF-1.4");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct RewindReader<R> {
    inner: R,
    // Bytes read from `inner` since the mark; `pos` is the replay cursor.
    buf: Vec<u8>,
    pos: usize,
    limit: Option<usize>,
}

impl<R: Read> RewindReader<R> {
    /// Wraps a reader. No mark is set initially.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
            limit: None,
        }
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Bytes that will be replayed before the underlying reader is read again.
    pub fn buffered(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Unwraps the reader. Bytes still waiting to be replayed are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for RewindReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }

        if self.pos < self.buf.len() {
            let n = out.len().min(self.buf.len() - self.pos);
            out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
            self.pos += n;
            return Ok(n);
        }

        match self.limit {
            Some(limit) if self.buf.len() < limit => {
                let want = out.len().min(limit - self.buf.len());
                let n = self.inner.read(&mut out[..want])?;
                self.buf.extend_from_slice(&out[..n]);
                self.pos = self.buf.len();
                Ok(n)
            }
            _ => {
                // Past the limit (or never marked): stop retaining
                self.limit = None;
                self.buf.clear();
                self.pos = 0;
                self.inner.read(out)
            }
        }
    }
}

impl<R: Read> MarkableRead for RewindReader<R> {
    fn mark(&mut self, read_limit: usize) -> io::Result<()> {
        // Keep only what has not been replayed yet; the mark sits at its start
        self.buf.drain(..self.pos);
        self.pos = 0;
        self.limit = Some(read_limit.max(self.buf.len()));
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        match self.limit {
            Some(_) => {
                self.pos = 0;
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "reset without a valid mark",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_n<R: Read>(reader: &mut R, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        reader.read_exact(&mut out).unwrap();
        out
    }

    #[test]
    fn test_reset_replays_marked_bytes() {
        let mut reader = RewindReader::new(&b"GIF89a-rest"[..]);
        reader.mark(16).unwrap();
        assert_eq!(read_n(&mut reader, 6), b"GIF89a");
        reader.reset().unwrap();
        assert_eq!(read_n(&mut reader, 8), b"GIF89a-r");
    }

    #[test]
    fn test_reset_without_mark_fails() {
        let mut reader = RewindReader::new(&b"abc"[..]);
        let err = reader.reset().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_reading_past_limit_invalidates_mark() {
        let mut reader = RewindReader::new(&b"0123456789"[..]);
        reader.mark(3).unwrap();
        assert_eq!(read_n(&mut reader, 5), b"01234");
        assert!(reader.reset().is_err());
        assert_eq!(read_n(&mut reader, 5), b"56789");
    }

    #[test]
    fn test_mark_during_replay_keeps_pending_bytes() {
        let mut reader = RewindReader::new(&b"abcdef"[..]);
        reader.mark(6).unwrap();
        assert_eq!(read_n(&mut reader, 4), b"abcd");
        reader.reset().unwrap();
        assert_eq!(read_n(&mut reader, 1), b"a");

        // Re-mark in the middle of the replayed bytes
        reader.mark(4).unwrap();
        assert_eq!(reader.buffered(), b"bcd");
        assert_eq!(read_n(&mut reader, 4), b"bcde");
        reader.reset().unwrap();
        assert_eq!(read_n(&mut reader, 5), b"bcdef");
    }

    #[test]
    fn test_repeated_mark_reset_is_stable() {
        let mut reader = RewindReader::new(&b"BM\x00\x00"[..]);
        for _ in 0..3 {
            reader.mark(2).unwrap();
            assert_eq!(read_n(&mut reader, 2), b"BM");
            reader.reset().unwrap();
        }
        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"BM\x00\x00");
    }
}
