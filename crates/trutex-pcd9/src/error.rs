//! Error types for PCD9 handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with PCD9 files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] trutex_common::Error),

    /// The output file name carries no `<digits>_<hex>` identifier.
    #[error("no resource identifier in file name: {}", .0.display())]
    MissingIdentifier(PathBuf),

    /// The identifier token does not fit in 32 bits.
    #[error("resource identifier {token:?} does not fit in 32 bits")]
    InvalidIdentifier { token: String },
}

/// Result type for PCD9 operations.
pub type Result<T> = std::result::Result<T, Error>;
