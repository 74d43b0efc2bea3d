//! Stagebuf is a growable circular byte buffer for staging bytes between a
//! network transport and the code reading or writing frames on top of it.
//! Bytes are appended at the write cursor and consumed from the read cursor;
//! both cursors wrap around a single owned allocation.
//!
//! Besides plain copies in and out, the buffer can be peeked without
//! consuming, patched in place (to backfill a length prefix once the payload
//! size is known), and described as at most two segments so the physically
//! split halves can be handed straight to `readv`/`writev`.
//!
//! # Examples
//!
//! ```
//! use stagebuf::RingBuffer;
//!
//! fn main() -> Result<(), stagebuf::Error> {
//!     let mut ring = RingBuffer::with_capacity(16)?;
//!
//!     // Reserve a length prefix, write the payload, then fix up the prefix.
//!     ring.write(&[0, 0]);
//!     let n = ring.write(b"hello");
//!     ring.update(stagebuf::Direction::Read, &(n as u16).to_be_bytes());
//!
//!     let mut frame = [0; 7];
//!     assert_eq!(ring.read(&mut frame), 7);
//!     assert_eq!(&frame, b"\x00\x05hello");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, unreachable_pub)]

#[macro_use]
mod macros;

pub mod buf;
mod error;
mod ring;

pub use buf::{Direction, Segment};
#[cfg(unix)]
pub use buf::{IoVecBuf, IoVecBufMut, IoVecs};
pub use error::{Error, Result};
pub use ring::{RingBuffer, DEFAULT_CAPACITY};
