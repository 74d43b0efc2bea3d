use super::RingBuffer;
use crate::buf::Direction;

impl RingBuffer {
    /// Overwrite bytes that are already held, in place.
    ///
    /// With [`Direction::Read`] the first held bytes are replaced, with
    /// [`Direction::Write`] the last ones (those just before the write
    /// cursor). At most [`len`](Self::len) bytes are patched; the count is
    /// returned. Cursors and length are left as they are.
    ///
    /// This is how a length prefix written as a placeholder gets filled in
    /// once the payload behind it is known.
    pub fn update(&mut self, direction: Direction, data: &[u8]) -> usize {
        let n = data.len().min(self.nbytes);
        if n == 0 {
            return 0;
        }
        let start = match direction {
            Direction::Read => self.read_offset,
            Direction::Write => self.wrap(self.write_offset + self.capacity() - n),
        };
        let [first, second] = self.span(start, n);
        self.storage[first.range()].copy_from_slice(&data[..first.len]);
        self.storage[second.range()].copy_from_slice(&data[first.len..n]);
        n
    }
}
