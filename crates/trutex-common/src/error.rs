//! Error types for trutex-common.

use thiserror::Error;

/// Common error type for trutex operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of input: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// Invalid magic bytes encountered.
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic {
        expected: Vec<u8>,
        actual: Vec<u8>,
    },

    /// Pixel format code missing from the format table.
    #[error("unsupported pixel format {0:?}")]
    UnsupportedFormat(String),

    /// UTF-8 decoding error in a fixed-length text field.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Integer does not fit the width of the field it is written to.
    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: u64, bits: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
