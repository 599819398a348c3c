//! Error types for reading and writing bitmap matrices

use std::io;

use hrform_core::HrError;
use thiserror::Error;

/// Failure while decoding a matrix from a bitmap stream
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Format(#[from] HrError),

    #[error("Unexpected end of file while reading the {context}")]
    UnexpectedEof { context: &'static str },

    #[error("Bitmap truncated: read {row} of {expected_rows} rows")]
    Truncated { row: usize, expected_rows: usize },

    #[error("Header is not valid UTF-8")]
    NonUtf8Header,
}

/// Failure while writing a matrix or a report
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
