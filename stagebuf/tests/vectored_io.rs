use std::io::{Read, Seek, SeekFrom, Write};

use stagebuf::{Direction, RingBuffer};

// Leave the ring with its held bytes split across the end of the storage.
fn wrapped_ring(capacity: usize, skip: usize, data: &[u8]) -> RingBuffer {
    let mut ring = RingBuffer::with_capacity(capacity).unwrap();
    ring.write(&vec![0; skip]);
    ring.consume(skip);
    assert_eq!(ring.write(data), data.len());
    ring
}

#[test]
fn write_vectored_from_wrapped_ring() {
    let mut ring = wrapped_ring(16, 12, b"hello, vectored!");
    assert!(!ring.is_contiguous(Direction::Read, ring.len()));

    let mut file = tempfile::tempfile().unwrap();
    let mut written = 0;
    while !ring.is_empty() {
        let n = file.write_vectored(&ring.io_slices(ring.len())).unwrap();
        assert_eq!(ring.consume(n), n);
        written += n;
    }
    assert_eq!(written, 16);

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    assert_eq!(content, "hello, vectored!");
}

#[test]
fn read_vectored_into_wrapped_free_space() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"0123456789").unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let mut ring = wrapped_ring(12, 8, b"ab");
    assert_eq!(ring.write_offset(), 10);

    let mut filled = 0;
    while filled < 10 {
        let n = file
            .read_vectored(&mut ring.io_slices_mut(10 - filled))
            .unwrap();
        assert!(n > 0);
        assert_eq!(ring.commit(n), n);
        filled += n;
    }
    assert!(ring.is_full());

    let mut out = [0; 12];
    assert_eq!(ring.read(&mut out), 12);
    assert_eq!(&out, b"ab0123456789");
}

#[cfg(unix)]
#[test]
fn readv_writev_through_pipe() {
    use stagebuf::{IoVecBuf, IoVecBufMut};

    let mut fds = [0; 2];
    assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
    let (rx, tx) = (fds[0], fds[1]);

    let mut src = wrapped_ring(8, 5, b"pipeline");
    let iovecs = src.iovecs(Direction::Read, usize::MAX);
    assert_eq!(iovecs.read_iovec_len(), 2);
    assert_eq!(iovecs.total_len(), 8);
    let n = unsafe {
        libc::writev(tx, iovecs.read_iovec_ptr(), iovecs.read_iovec_len() as _)
    };
    assert_eq!(n, 8);
    assert_eq!(src.consume(n as usize), 8);

    let mut dst = wrapped_ring(8, 6, b"");
    let mut iovecs = dst.iovecs(Direction::Write, 8);
    assert_eq!(iovecs.write_iovec_len(), 2);
    let n = unsafe {
        libc::readv(rx, iovecs.write_iovec_ptr(), iovecs.write_iovec_len() as _)
    };
    assert_eq!(n, 8);
    assert_eq!(dst.commit(n as usize), 8);

    let mut out = [0; 8];
    assert_eq!(dst.read(&mut out), 8);
    assert_eq!(&out, b"pipeline");

    unsafe {
        libc::close(rx);
        libc::close(tx);
    }
}
