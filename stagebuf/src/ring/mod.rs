//! The ring buffer itself.
//!
//! Cursors are offsets into `storage`, never pointers, and always sit in
//! `[0, size)` (both are `0` for a zero sized ring). `nbytes` is kept up to
//! date by every mutating call; it is the only way to tell a full ring from an
//! empty one since the cursors coincide in both cases.

use std::{
    alloc::{self, Layout},
    fmt,
    io::{IoSlice, IoSliceMut},
    ptr,
};

use memchr::memchr;

#[cfg(unix)]
use crate::buf::IoVecs;
use crate::{
    buf::{Direction, Segment},
    error::{Error, Result},
};

#[cfg(feature = "bytes")]
mod bytes_buf;
mod copy;
mod grow;
mod update;

/// Capacity used by [`RingBuffer::new`].
pub const DEFAULT_CAPACITY: usize = 8 * 1024;

/// A growable circular byte buffer.
///
/// Bytes are appended with [`write`](Self::write) (or placed directly into
/// [`write_slices`](Self::write_slices) and then [`commit`](Self::commit)ed)
/// and taken out with [`read`](Self::read), [`peek`](Self::peek) or
/// [`consume`](Self::consume). Requests larger than what is held, or than the
/// free space, are clamped; the returned count tells how much was done.
///
/// The ring is not synchronized. Share it behind a lock if needed.
#[derive(Clone)]
pub struct RingBuffer {
    storage: Box<[u8]>,
    read_offset: usize,
    write_offset: usize,
    nbytes: usize,
}

// Zeroed storage straight from the allocator, so pages are only backed once
// they are touched and a failed allocation is reported instead of aborting.
pub(crate) fn alloc_storage(capacity: usize) -> Result<Box<[u8]>> {
    let failed = || {
        tracing!("failed to allocate {} bytes", capacity);
        Error::Alloc {
            requested: capacity,
        }
    };
    if capacity == 0 {
        return Ok(Box::default());
    }
    let layout = Layout::array::<u8>(capacity).map_err(|_| failed())?;
    // Safety: the layout has a non-zero size.
    let raw = unsafe { alloc::alloc_zeroed(layout) };
    if raw.is_null() {
        return Err(failed());
    }
    // Safety: `raw` is a fresh, zeroed allocation of `capacity` bytes from the
    // global allocator with the layout `Box<[u8]>` deallocates with.
    Ok(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(raw, capacity)) })
}

impl RingBuffer {
    /// Create an empty ring of [`DEFAULT_CAPACITY`] bytes.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY).expect("unable to allocate ring buffer")
    }

    /// Create an empty ring of exactly `capacity` bytes.
    ///
    /// A zero capacity is allowed; such a ring is both empty and full until it
    /// is grown.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            storage: alloc_storage(capacity)?,
            read_offset: 0,
            write_offset: 0,
            nbytes: 0,
        })
    }

    /// Physical capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of held, unconsumed bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nbytes
    }

    /// Returns `true` if nothing is held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nbytes == 0
    }

    /// Returns `true` if there is no free space left.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.nbytes == self.capacity()
    }

    /// Number of bytes that can be written without growing.
    #[inline]
    pub fn free_space(&self) -> usize {
        self.capacity() - self.nbytes
    }

    /// Offset of the read cursor in the storage.
    #[inline]
    pub fn read_offset(&self) -> usize {
        self.read_offset
    }

    /// Offset of the write cursor in the storage.
    #[inline]
    pub fn write_offset(&self) -> usize {
        self.write_offset
    }

    /// Drop everything held and move both cursors back to the start.
    ///
    /// The capacity is kept.
    pub fn clear(&mut self) {
        self.read_offset = 0;
        self.write_offset = 0;
        self.nbytes = 0;
    }

    /// Whether `n` bytes starting at the cursor of `direction` fit before the
    /// physical end of the storage.
    ///
    /// This only looks at the cursor position. Whether `n` bytes are held (or
    /// free) has to be checked separately.
    #[inline]
    pub fn is_contiguous(&self, direction: Direction, n: usize) -> bool {
        match direction {
            Direction::Read => self.fits(self.read_offset, n),
            Direction::Write => self.fits(self.write_offset, n),
        }
    }

    /// Describe up to `n` bytes of one side of the ring.
    ///
    /// For [`Direction::Read`] the range starts at the read cursor and is
    /// limited to the held bytes; for [`Direction::Write`] it starts at the
    /// write cursor and is limited to the free space. If the range crosses the
    /// end of the storage the second segment holds the part that wrapped to the
    /// start, otherwise it is empty.
    pub fn segments(&self, direction: Direction, n: usize) -> [Segment; 2] {
        match direction {
            Direction::Read => self.span(self.read_offset, n.min(self.nbytes)),
            Direction::Write => self.span(self.write_offset, n.min(self.free_space())),
        }
    }

    /// Borrow up to `n` held bytes as two slices, in logical order.
    pub fn read_slices(&self, n: usize) -> (&[u8], &[u8]) {
        let [first, second] = self.segments(Direction::Read, n);
        (&self.storage[first.range()], &self.storage[second.range()])
    }

    /// Borrow up to `n` bytes of free space as two slices, in logical order.
    ///
    /// Bytes placed there become part of the ring only after
    /// [`commit`](Self::commit).
    pub fn write_slices(&mut self, n: usize) -> (&mut [u8], &mut [u8]) {
        let [first, second] = self.segments(Direction::Write, n);
        // The wrapped part always ends before the write cursor.
        let (head, tail) = self.storage.split_at_mut(first.offset);
        (&mut tail[..first.len], &mut head[second.range()])
    }

    /// Held bytes as [`IoSlice`]s for [`std::io::Write::write_vectored`].
    pub fn io_slices(&self, n: usize) -> [IoSlice<'_>; 2] {
        let (first, second) = self.read_slices(n);
        [IoSlice::new(first), IoSlice::new(second)]
    }

    /// Free space as [`IoSliceMut`]s for [`std::io::Read::read_vectored`].
    pub fn io_slices_mut(&mut self, n: usize) -> [IoSliceMut<'_>; 2] {
        let (first, second) = self.write_slices(n);
        [IoSliceMut::new(first), IoSliceMut::new(second)]
    }

    /// One side of the ring as `iovec`s, ready for `readv`/`writev`.
    #[cfg(unix)]
    pub fn iovecs(&mut self, direction: Direction, n: usize) -> IoVecs<'_> {
        let [first, second] = self.segments(direction, n);
        if second.is_empty() {
            return IoVecs::new(&mut self.storage[first.range()], &mut []);
        }
        let (head, tail) = self.storage.split_at_mut(first.offset);
        IoVecs::new(tail, &mut head[second.range()])
    }

    /// Append as much of `data` as fits. Returns the number of bytes taken.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let (first, second) = self.write_slices(data.len());
        let n = first.len() + second.len();
        first.copy_from_slice(&data[..first.len()]);
        second.copy_from_slice(&data[first.len()..n]);
        self.advance_write(n);
        n
    }

    /// Move up to `dest.len()` held bytes into `dest`. Returns the count,
    /// `0` if the ring is empty.
    pub fn read(&mut self, dest: &mut [u8]) -> usize {
        let n = self.copy_out(0, dest);
        self.advance_read(n);
        n
    }

    /// Like [`read`](Self::read) but leaves the bytes in the ring.
    pub fn peek(&self, dest: &mut [u8]) -> usize {
        self.copy_out(0, dest)
    }

    /// Like [`peek`](Self::peek), starting `offset` bytes past the read
    /// cursor. Returns `0` if fewer than `offset` bytes are held.
    pub fn peek_at(&self, offset: usize, dest: &mut [u8]) -> usize {
        self.copy_out(offset, dest)
    }

    /// Discard up to `n` held bytes. Returns how many were discarded.
    pub fn consume(&mut self, n: usize) -> usize {
        let n = n.min(self.nbytes);
        self.advance_read(n);
        n
    }

    /// Mark up to `n` bytes of free space, filled in through
    /// [`write_slices`](Self::write_slices) or a vectored read, as held.
    /// Returns how many were committed.
    pub fn commit(&mut self, n: usize) -> usize {
        let n = n.min(self.free_space());
        self.advance_write(n);
        n
    }

    /// Logical position of the first held `byte`, if any.
    pub fn find(&self, byte: u8) -> Option<usize> {
        let (first, second) = self.read_slices(self.nbytes);
        memchr(byte, first).or_else(|| memchr(byte, second).map(|i| first.len() + i))
    }

    // Copy held bytes, starting `skip` bytes past the read cursor, without
    // moving anything. Read, peek and growth all go through here so they
    // agree on wrap handling.
    fn copy_out(&self, skip: usize, dest: &mut [u8]) -> usize {
        if skip >= self.nbytes {
            return 0;
        }
        let n = dest.len().min(self.nbytes - skip);
        let [first, second] = self.span(self.wrap(self.read_offset + skip), n);
        dest[..first.len].copy_from_slice(&self.storage[first.range()]);
        dest[first.len..n].copy_from_slice(&self.storage[second.range()]);
        n
    }

    // Split `n` bytes starting at `start` at the physical end. `n` must not
    // exceed the capacity.
    fn span(&self, start: usize, n: usize) -> [Segment; 2] {
        if self.fits(start, n) {
            [Segment::new(start, n), Segment::default()]
        } else {
            let first = self.capacity() - start;
            [Segment::new(start, first), Segment::new(0, n - first)]
        }
    }

    #[inline]
    fn fits(&self, start: usize, n: usize) -> bool {
        n <= self.capacity() - start
    }

    // `pos` is below twice the capacity.
    #[inline]
    fn wrap(&self, pos: usize) -> usize {
        if pos >= self.capacity() {
            pos - self.capacity()
        } else {
            pos
        }
    }

    fn advance_read(&mut self, n: usize) {
        debug_assert!(n <= self.nbytes);
        self.read_offset = self.wrap(self.read_offset + n);
        self.nbytes -= n;
    }

    fn advance_write(&mut self, n: usize) {
        debug_assert!(n <= self.free_space());
        self.write_offset = self.wrap(self.write_offset + n);
        self.nbytes += n;
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("read_offset", &self.read_offset)
            .field("write_offset", &self.write_offset)
            .field("nbytes", &self.nbytes)
            .finish()
    }
}
