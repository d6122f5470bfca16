//! Mark/reset over seekable readers.

use std::io::{self, Read, Seek, SeekFrom};

use crate::stream::MarkableRead;

/// Adds [`MarkableRead`] to a [`Read`] + [`Seek`] source such as a file or a
/// [`Cursor`](std::io::Cursor).
///
/// The mark records the stream position and `reset` seeks back to it, so the
/// read limit is not enforced and nothing is buffered.
#[derive(Debug)]
pub struct SeekRewind<R> {
    inner: R,
    mark: Option<u64>,
}

impl<R: Read + Seek> SeekRewind<R> {
    /// Wraps a seekable reader. No mark is set initially.
    pub fn new(inner: R) -> Self {
        Self { inner, mark: None }
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for SeekRewind<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Seek> MarkableRead for SeekRewind<R> {
    fn mark(&mut self, _read_limit: usize) -> io::Result<()> {
        self.mark = Some(self.inner.stream_position()?);
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        let Some(position) = self.mark else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "reset without a valid mark",
            ));
        };
        self.inner.seek(SeekFrom::Start(position))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_mark_reset_restores_position() {
        let mut reader = SeekRewind::new(Cursor::new(b"\x89PNG\r\n\x1a\n".to_vec()));
        let mut first = [0u8; 1];
        reader.read_exact(&mut first).unwrap();

        reader.mark(0).unwrap();
        let mut rest = [0u8; 3];
        reader.read_exact(&mut rest).unwrap();
        assert_eq!(&rest, b"PNG");

        reader.reset().unwrap();
        assert_eq!(reader.get_ref().position(), 1);
    }

    #[test]
    fn test_reset_without_mark_fails() {
        let mut reader = SeekRewind::new(Cursor::new(Vec::<u8>::new()));
        assert!(reader.reset().is_err());
    }

    #[test]
    fn test_skip_does_not_pass_end() {
        let mut reader = SeekRewind::new(Cursor::new(b"abc".to_vec()));
        assert_eq!(reader.skip(10).unwrap(), 3);
        assert_eq!(reader.skip(10).unwrap(), 0);
    }
}
