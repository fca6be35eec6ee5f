//! Error types for txtpub operations.

use thiserror::Error;

/// Errors that can occur while converting a text document into an EPUB.
#[derive(Error, Debug)]
pub enum Error {
    /// Segmentation produced no chapters (e.g. whitespace-only input).
    #[error("no chapters detected")]
    NoChapters,

    #[error("invalid chapter delimiter {delimiter:?}: {reason}")]
    InvalidDelimiter { delimiter: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
