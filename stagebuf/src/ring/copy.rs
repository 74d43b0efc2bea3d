use super::RingBuffer;
use crate::error::{Error, Result};

impl RingBuffer {
    /// Move up to `n` held bytes into the free space of `dst`, without a
    /// staging copy.
    ///
    /// The amount is limited by what this ring holds and by the free space of
    /// `dst`; it is returned, and consumed from this ring. Fails with
    /// [`Error::DestinationFull`] if `n > 0` but `dst` has no room at all.
    pub fn copy_into(&mut self, dst: &mut RingBuffer, n: usize) -> Result<usize> {
        if n == 0 {
            return Ok(0);
        }
        if dst.is_full() {
            return Err(Error::DestinationFull);
        }

        let (first, second) = self.read_slices(n.min(dst.free_space()));
        let copied = dst.write(first) + dst.write(second);
        self.advance_read(copied);
        tracing!("copied {} bytes into another ring", copied);
        Ok(copied)
    }
}
