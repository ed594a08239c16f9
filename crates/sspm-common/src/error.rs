//! Error types for sspm-common.

use thiserror::Error;

/// Error returned by [`BinaryReader`](crate::BinaryReader) reads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A read would extend past the end of the buffer.
    #[error(
        "attempt to read beyond buffer length: offset={offset}, length={length}, buffer length={buffer_len}"
    )]
    OutOfBounds {
        offset: usize,
        length: usize,
        buffer_len: usize,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
