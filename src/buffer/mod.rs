//! Internal scratch buffer management.
//!
//! Detection reads its comparison window into a short-lived buffer. This
//! module keeps a small thread-local pool of them so that a detector stays
//! free of shared mutable state while avoiding per-call allocations. It is an
//! implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::ScratchBuffer;
