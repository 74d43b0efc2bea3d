use bytes::{buf::UninitSlice, Buf, BufMut};

use super::RingBuffer;

impl Buf for RingBuffer {
    #[inline]
    fn remaining(&self) -> usize {
        self.len()
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        self.read_slices(self.len()).0
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.len(),
            "cannot advance past `remaining`: {:?} <= {:?}",
            cnt,
            self.len()
        );
        self.consume(cnt);
    }
}

unsafe impl BufMut for RingBuffer {
    #[inline]
    fn remaining_mut(&self) -> usize {
        self.free_space()
    }

    unsafe fn advance_mut(&mut self, cnt: usize) {
        assert!(
            cnt <= self.free_space(),
            "cannot advance past `remaining_mut`: {:?} <= {:?}",
            cnt,
            self.free_space()
        );
        self.commit(cnt);
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut UninitSlice {
        let free = self.free_space();
        UninitSlice::new(self.write_slices(free).0)
    }
}
