use std::marker::PhantomData;

/// A buffer that can be described as an array of `iovec` for `writev` and
/// friends.
///
/// # Safety
/// See the safety note of the methods.
#[allow(clippy::unnecessary_safety_doc)]
pub unsafe trait IoVecBuf {
    /// Pointer to the first of [`read_iovec_len`](Self::read_iovec_len)
    /// consecutive `iovec`, in the order the bytes should be gathered. For a
    /// ring this is the part up to the end of the storage, then the part
    /// that wrapped to its start.
    ///
    /// # Safety
    /// The implementation must ensure the pointed iovecs stay valid, and the
    /// memory they describe stays readable, for as long as the value lives.
    fn read_iovec_ptr(&self) -> *const libc::iovec;

    /// Returns the count of iovec struct behind the pointer.
    ///
    /// # Safety
    /// There must be really that number of iovec here.
    fn read_iovec_len(&self) -> usize;
}

/// A buffer whose memory can be filled through an array of `iovec`, for
/// `readv` and friends.
///
/// # Safety
/// See the safety note of the methods.
#[allow(clippy::unnecessary_safety_doc)]
pub unsafe trait IoVecBufMut {
    /// Returns a raw mutable pointer to iovec struct.
    ///
    /// # Safety
    /// The implementation must ensure the pointed iovecs stay valid, and the
    /// memory they describe stays writable, for as long as the value lives.
    fn write_iovec_ptr(&mut self) -> *mut libc::iovec;

    /// Returns the count of iovec struct behind the pointer.
    fn write_iovec_len(&mut self) -> usize;
}

/// Up to two `iovec` describing one side of a ring buffer.
///
/// Produced by [`RingBuffer::iovecs`](crate::RingBuffer::iovecs). The value
/// mutably borrows the ring, so the described memory cannot move or be
/// touched until it is dropped. After the I/O call completes, reconcile the
/// ring with [`consume`](crate::RingBuffer::consume) (after a write to the
/// transport) or [`commit`](crate::RingBuffer::commit) (after a read from it).
pub struct IoVecs<'a> {
    iovecs: [libc::iovec; 2],
    len: usize,
    _marker: PhantomData<&'a mut [u8]>,
}

impl<'a> IoVecs<'a> {
    /// Build from two disjoint slices; an empty second slice is left out.
    pub(crate) fn new(first: &'a mut [u8], second: &'a mut [u8]) -> Self {
        let len = match (first.is_empty(), second.is_empty()) {
            (true, _) => 0,
            (false, true) => 1,
            (false, false) => 2,
        };
        Self {
            iovecs: [
                libc::iovec {
                    iov_base: first.as_mut_ptr() as _,
                    iov_len: first.len(),
                },
                libc::iovec {
                    iov_base: second.as_mut_ptr() as _,
                    iov_len: second.len(),
                },
            ],
            len,
            _marker: PhantomData,
        }
    }

    /// The populated iovecs.
    #[inline]
    pub fn as_slice(&self) -> &[libc::iovec] {
        &self.iovecs[..self.len]
    }

    /// Total number of bytes described.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.as_slice().iter().map(|iov| iov.iov_len).sum()
    }
}

unsafe impl IoVecBuf for IoVecs<'_> {
    #[inline]
    fn read_iovec_ptr(&self) -> *const libc::iovec {
        self.iovecs.as_ptr()
    }

    #[inline]
    fn read_iovec_len(&self) -> usize {
        self.len
    }
}

unsafe impl IoVecBufMut for IoVecs<'_> {
    #[inline]
    fn write_iovec_ptr(&mut self) -> *mut libc::iovec {
        self.iovecs.as_mut_ptr()
    }

    #[inline]
    fn write_iovec_len(&mut self) -> usize {
        self.len
    }
}

impl std::fmt::Debug for IoVecs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.as_slice().iter().map(|iov| (iov.iov_base, iov.iov_len)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iovecs_skip_empty_tail() {
        let mut a = vec![0u8; 10];
        let mut b = vec![0u8; 0];
        let base = a.as_ptr();
        let iovecs = IoVecs::new(&mut a, &mut b);
        assert_eq!(iovecs.read_iovec_len(), 1);
        assert_eq!(iovecs.total_len(), 10);
        assert_eq!(iovecs.as_slice()[0].iov_base as *const u8, base);
    }

    #[test]
    fn iovecs_two_parts() {
        let mut storage = vec![0u8; 30];
        let (head, tail) = storage.split_at_mut(20);
        let mut iovecs = IoVecs::new(&mut tail[..5], &mut head[..20]);
        assert_eq!(iovecs.write_iovec_len(), 2);
        assert_eq!(iovecs.total_len(), 25);
        let ptr = iovecs.read_iovec_ptr();
        let second = unsafe { *ptr.add(1) };
        assert_eq!(second.iov_len, 20);
    }

    #[test]
    fn iovecs_empty() {
        let (mut a, mut b) = ([0u8; 0], [0u8; 0]);
        let iovecs = IoVecs::new(&mut a, &mut b);
        assert_eq!(iovecs.read_iovec_len(), 0);
        assert!(iovecs.as_slice().is_empty());
    }
}
