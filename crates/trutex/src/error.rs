//! Error types for conversions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a file.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// DDS error.
    #[error("DDS: {0}")]
    Dds(#[from] trutex_dds::Error),

    /// PCD9 error.
    #[error("PCD9: {0}")]
    Pcd9(#[from] trutex_pcd9::Error),

    /// The input is neither `.dds` nor `.tr8pcd9`.
    #[error("unknown file extension: {}", .0.display())]
    UnknownExtension(PathBuf),
}

/// Broad classification of a conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input ended before a header field or the payload.
    Truncated,
    /// A magic number or tag did not match.
    FormatMismatch,
    /// The pixel format is not in the format table.
    UnsupportedFormat,
    /// A text field is not valid UTF-8.
    Decode,
    /// The output name carries no usable resource identifier.
    MissingIdentifier,
    /// The conversion direction could not be determined.
    UnknownExtension,
    /// A value does not fit its header field.
    Range,
    /// Filesystem failure.
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::UnknownExtension(_) => ErrorKind::UnknownExtension,
            Self::Dds(trutex_dds::Error::Io(_)) => ErrorKind::Io,
            Self::Dds(trutex_dds::Error::Common(e)) => common_kind(e),
            Self::Pcd9(trutex_pcd9::Error::Io(_)) => ErrorKind::Io,
            Self::Pcd9(trutex_pcd9::Error::Common(e)) => common_kind(e),
            Self::Pcd9(
                trutex_pcd9::Error::MissingIdentifier(_)
                | trutex_pcd9::Error::InvalidIdentifier { .. },
            ) => ErrorKind::MissingIdentifier,
        }
    }
}

fn common_kind(error: &trutex_common::Error) -> ErrorKind {
    use trutex_common::Error as E;

    match error {
        E::UnexpectedEof { .. } => ErrorKind::Truncated,
        E::InvalidMagic { .. } => ErrorKind::FormatMismatch,
        E::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
        E::Utf8(_) => ErrorKind::Decode,
        E::ValueOutOfRange { .. } => ErrorKind::Range,
        E::Io(_) => ErrorKind::Io,
    }
}

/// Result type for conversions.
pub type Result<T> = std::result::Result<T, Error>;
