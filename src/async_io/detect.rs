//! Async signature detection.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::io::Cursor;
//! use sniffrs::{detect_async, MagicDetector, MediaType};
//!
//! async fn demo() -> Result<(), sniffrs::DetectError> {
//!     let detector = MagicDetector::new(MediaType::from_static("application", "pdf"), b"%PDF");
//!     let mut reader = Cursor::new(b"%PDF-1.7".to_vec());
//!     let found = detect_async(&detector, Some(&mut reader)).await?;
//!     assert_eq!(found.subtype(), "pdf");
//!     Ok(())
//! }
//! ```

use std::future::poll_fn;
use std::io::{self, SeekFrom};
use std::pin::Pin;

use futures_io::{AsyncRead, AsyncSeek};

use crate::buffer::ScratchBuffer;
use crate::error::DetectError;
use crate::magic::MagicDetector;
use crate::media_type::MediaType;

/// Tests an async reader against `detector` and seeks it back.
///
/// Uses `futures_io` traits, so it works with any runtime; tokio users can
/// adapt their readers with `tokio_util::compat`.
///
/// The reader's position is recorded first and restored after the prefix
/// (at most `read_limit()` bytes) has been read, whether or not the read failed. A
/// missing reader yields [`MediaType::OCTET_STREAM`].
///
/// # Arguments
///
/// * `detector` - The signature to test
/// * `input` - A seekable async reader, or `None`
pub async fn detect_async<R>(
    detector: &MagicDetector,
    input: Option<&mut R>,
) -> Result<MediaType, DetectError>
where
    R: AsyncRead + AsyncSeek + Unpin + ?Sized,
{
    let Some(reader) = input else {
        return Ok(MediaType::OCTET_STREAM);
    };

    let start = poll_fn(|cx| Pin::new(&mut *reader).poll_seek(cx, SeekFrom::Current(0))).await?;

    let mut prefix = ScratchBuffer::take();
    let outcome = read_prefix(reader, &mut prefix, detector.read_limit()).await;

    poll_fn(|cx| Pin::new(&mut *reader).poll_seek(cx, SeekFrom::Start(start))).await?;

    outcome?;
    detector.match_bytes(&prefix)
}

/// Largest single read while collecting the prefix.
const READ_CHUNK: usize = 8 * 1024;

/// Appends up to `limit` bytes to `buf`, stopping early when the reader is
/// exhausted. `buf` grows only with the bytes actually read.
async fn read_prefix<R>(reader: &mut R, buf: &mut Vec<u8>, limit: usize) -> io::Result<()>
where
    R: AsyncRead + Unpin + ?Sized,
{
    while buf.len() < limit {
        let filled = buf.len();
        buf.resize(filled + READ_CHUNK.min(limit - filled), 0);
        let read = poll_fn(|cx| Pin::new(&mut *reader).poll_read(cx, &mut buf[filled..])).await;
        match read {
            Ok(n) => {
                buf.truncate(filled + n);
                if n == 0 {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => buf.truncate(filled),
            Err(e) => {
                buf.truncate(filled);
                return Err(e);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::task::{Context, Poll};

    use futures_util::io::{AsyncReadExt, Cursor};

    fn bmp_in_range() -> MagicDetector {
        MagicDetector::builder()
            .media_type(MediaType::from_static("image", "bmp"))
            .pattern(*b"BM")
            .offset_range(0, 10)
            .build()
            .unwrap()
    }

    /// Seekable reader whose reads always fail.
    struct Broken {
        position: u64,
    }

    impl AsyncRead for Broken {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut [u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::other("device gone")))
        }
    }

    impl AsyncSeek for Broken {
        fn poll_seek(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            pos: SeekFrom,
        ) -> Poll<io::Result<u64>> {
            if let SeekFrom::Start(p) = pos {
                self.position = p;
            }
            Poll::Ready(Ok(self.position))
        }
    }

    #[tokio::test]
    async fn test_detect_async_match_and_rewind() {
        let mut reader = Cursor::new(b"\x00\x00\x00\x00\x00BM....".to_vec());
        let found = detect_async(&bmp_in_range(), Some(&mut reader)).await.unwrap();
        assert_eq!(found.subtype(), "bmp");
        assert_eq!(reader.position(), 0);
    }

    #[tokio::test]
    async fn test_detect_async_from_middle_of_stream() {
        let mut reader = Cursor::new(b"headerBM".to_vec());
        let mut skip = [0u8; 6];
        reader.read_exact(&mut skip).await.unwrap();

        let detector = MagicDetector::new(MediaType::from_static("image", "bmp"), b"BM");
        let found = detect_async(&detector, Some(&mut reader)).await.unwrap();
        assert_eq!(found.subtype(), "bmp");
        assert_eq!(reader.position(), 6);
    }

    #[tokio::test]
    async fn test_detect_async_out_of_range() {
        let mut data = vec![0u8; 11];
        data.extend_from_slice(b"BM");
        let mut reader = Cursor::new(data);
        let found = detect_async(&bmp_in_range(), Some(&mut reader)).await.unwrap();
        assert!(found.is_unknown());
        assert_eq!(reader.position(), 0);
    }

    #[tokio::test]
    async fn test_detect_async_unbounded_range_on_short_reader() {
        let detector = MagicDetector::builder()
            .media_type(MediaType::from_static("image", "bmp"))
            .pattern(*b"BM")
            .offset_range(0, i64::MAX)
            .build()
            .unwrap();

        let mut reader = Cursor::new(b"..BM".to_vec());
        let found = detect_async(&detector, Some(&mut reader)).await.unwrap();
        assert_eq!(found.subtype(), "bmp");
        assert_eq!(reader.position(), 0);

        let mut reader = Cursor::new(b"..B".to_vec());
        let found = detect_async(&detector, Some(&mut reader)).await.unwrap();
        assert!(found.is_unknown());
    }

    #[tokio::test]
    async fn test_detect_async_none() {
        let found = detect_async::<Cursor<Vec<u8>>>(&bmp_in_range(), None).await.unwrap();
        assert!(found.is_unknown());
    }

    #[tokio::test]
    async fn test_detect_async_propagates_read_error() {
        let mut reader = Broken { position: 3 };
        let err = detect_async(&bmp_in_range(), Some(&mut reader)).await.unwrap_err();
        assert!(matches!(err, DetectError::Io(_)));
        assert_eq!(reader.position, 3);
    }
}
