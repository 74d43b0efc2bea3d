//! Views into the storage of a [`RingBuffer`](crate::RingBuffer).
//!
//! The held bytes (or the free space) of a ring may be split in two by the
//! physical end of its allocation. A [`Segment`] describes one contiguous
//! piece; every query hands out at most two of them, in logical order.

use std::ops;

#[cfg(unix)]
mod io_vec_buf;
#[cfg(unix)]
pub use io_vec_buf::{IoVecBuf, IoVecBufMut, IoVecs};

/// Which side of the ring a query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Held bytes, starting at the read cursor.
    Read,
    /// Free space, starting at the write cursor.
    Write,
}

/// A physically contiguous range of ring storage.
///
/// A segment is a plain offset and length, it does not borrow the ring. It is
/// only meaningful until the next mutating call on the buffer it came from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Offset from the start of the storage.
    pub offset: usize,
    /// Number of bytes covered.
    pub len: usize,
}

impl Segment {
    #[inline]
    pub(crate) const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Returns `true` if the segment covers no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The storage range covered by this segment.
    #[inline]
    pub const fn range(&self) -> ops::Range<usize> {
        self.offset..self.offset + self.len
    }
}
