use super::{alloc_storage, RingBuffer};
use crate::error::{Error, Result};

impl RingBuffer {
    /// Make sure at least `additional` bytes can be written.
    ///
    /// When the free space is short, the capacity is doubled (a zero capacity
    /// becomes `1` first) until it is enough. Held bytes are moved to a new
    /// allocation in logical order, so afterwards the read cursor is at offset
    /// `0` and the data is contiguous.
    ///
    /// On failure the ring is left exactly as it was.
    pub fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        if self.free_space() >= additional {
            return Ok(());
        }

        let mut new_size = match self.capacity() {
            0 => 1,
            size => double(size)?,
        };
        while new_size - self.nbytes < additional {
            new_size = double(new_size)?;
        }

        let mut storage = alloc_storage(new_size)?;
        let held = self.copy_out(0, &mut storage);
        debug_assert_eq!(held, self.nbytes);
        tracing!(
            "grow {} -> {} bytes, {} held",
            self.capacity(),
            new_size,
            held
        );

        self.storage = storage;
        self.read_offset = 0;
        self.write_offset = held;
        Ok(())
    }
}

// A capacity that no longer fits in a `usize` is reported as a request for
// `usize::MAX` bytes.
fn double(size: usize) -> Result<usize> {
    size.checked_mul(2).ok_or(Error::Alloc {
        requested: usize::MAX,
    })
}

#[cfg(test)]
mod tests {
    use crate::{Error, RingBuffer};

    #[test]
    fn no_growth_when_room() {
        let mut ring = RingBuffer::with_capacity(16).unwrap();
        ring.write(b"0123");
        ring.consume(2);
        ring.ensure_capacity(14).unwrap();
        assert_eq!(ring.capacity(), 16);
        assert_eq!(ring.read_offset(), 2);
    }

    #[test]
    fn doubles_until_enough() {
        let mut ring = RingBuffer::with_capacity(4).unwrap();
        ring.write(b"abc");
        ring.ensure_capacity(20).unwrap();
        assert_eq!(ring.capacity(), 32);
        assert_eq!(ring.len(), 3);
        assert!(ring.free_space() >= 20);
    }

    #[test]
    fn grow_from_zero() {
        let mut ring = RingBuffer::with_capacity(0).unwrap();
        ring.ensure_capacity(1).unwrap();
        assert_eq!(ring.capacity(), 1);

        let mut ring = RingBuffer::with_capacity(0).unwrap();
        ring.ensure_capacity(5).unwrap();
        assert_eq!(ring.capacity(), 8);
        assert_eq!(ring.write(b"hello"), 5);
    }

    #[test]
    fn grow_linearizes_wrapped_data() {
        let mut ring = RingBuffer::with_capacity(8).unwrap();
        ring.write(b"......");
        ring.consume(6);
        ring.write(b"abcdefgh");
        assert!(ring.is_full());

        let mut before = [0; 8];
        ring.peek(&mut before);

        ring.ensure_capacity(1).unwrap();
        assert_eq!(ring.capacity(), 16);
        assert_eq!((ring.read_offset(), ring.write_offset()), (0, 8));
        let (first, second) = ring.read_slices(usize::MAX);
        assert_eq!(first, &before);
        assert!(second.is_empty());
    }

    #[test]
    fn overflow_leaves_ring_untouched() {
        let mut ring = RingBuffer::with_capacity(16).unwrap();
        ring.write(b"0123");
        let err = ring.ensure_capacity(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            Error::Alloc {
                requested: usize::MAX
            }
        );
        assert_eq!(ring.capacity(), 16);
        assert_eq!(ring.len(), 4);
        let mut out = [0; 4];
        ring.read(&mut out);
        assert_eq!(&out, b"0123");
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn failed_allocation_leaves_ring_untouched() {
        let mut ring = RingBuffer::with_capacity(16).unwrap();
        ring.write(b"0123");
        ring.consume(2);
        ring.write(b"45");

        // 1 << 63 is computed fine but exceeds what the allocator accepts.
        let err = ring.ensure_capacity(1 << 62).unwrap_err();
        assert_eq!(err, Error::Alloc { requested: 1 << 63 });
        assert_eq!(ring.capacity(), 16);
        assert_eq!(ring.len(), 4);
        assert_eq!((ring.read_offset(), ring.write_offset()), (2, 6));
        let mut out = [0; 4];
        assert_eq!(ring.read(&mut out), 4);
        assert_eq!(&out, b"2345");
    }
}
