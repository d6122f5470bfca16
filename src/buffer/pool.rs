//! Thread-local pool of scratch buffers for detection windows.

use std::cell::RefCell;
use std::io::{self, Read};
use std::ops::{Deref, DerefMut};

/// Largest capacity a buffer may have and still be returned to the pool.
pub const MAX_POOLED_CAPACITY: usize = 64 * 1024; // 64 KiB

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A growable scratch buffer for the bytes of one detection window.
///
/// Borrowed from the calling thread's pool and handed back on drop, so
/// repeated detections on one thread do not allocate. It starts empty and
/// only grows with the bytes a stream actually supplies.
pub struct ScratchBuffer {
    data: Vec<u8>,
}

impl ScratchBuffer {
    /// Takes an empty buffer from the thread-local pool (or allocates one).
    pub fn take() -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_default();
        data.clear();
        Self { data }
    }

    /// Appends at most `limit` bytes from `reader`, stopping early at end of
    /// stream. Returns the number of bytes appended.
    pub fn fill_from<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        limit: u64,
    ) -> io::Result<usize> {
        // read_to_end retries on Interrupted
        reader.take(limit).read_to_end(&mut self.data)
    }
}

impl Deref for ScratchBuffer {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.data
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        // Oversized windows are freed rather than pinned in the pool
        if self.data.capacity() <= MAX_POOLED_CAPACITY {
            self.data.clear();
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
