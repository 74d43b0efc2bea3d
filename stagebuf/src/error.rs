use std::{fmt, io};

/// A specialized `Result` for ring buffer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`RingBuffer`](crate::RingBuffer).
///
/// Short reads, short writes and partial updates are not errors; they are
/// reported through the returned byte count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The backing storage of `requested` bytes could not be allocated.
    ///
    /// The buffer the operation was called on is left unchanged.
    Alloc {
        /// Capacity that was asked of the allocator, `usize::MAX` when the
        /// capacity needed by a growth does not fit in a `usize`.
        requested: usize,
    },
    /// The destination of a cross-buffer copy has no free space.
    DestinationFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Alloc { requested } => {
                write!(f, "failed to allocate {requested} bytes of ring storage")
            }
            Error::DestinationFull => write!(f, "destination ring buffer is full"),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        let kind = match e {
            Error::Alloc { .. } => io::ErrorKind::OutOfMemory,
            Error::DestinationFull => io::ErrorKind::WriteZero,
        };
        io::Error::new(kind, e)
    }
}
