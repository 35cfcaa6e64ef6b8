//! Error types for vote-extract.
//!
//! A model whose output file is missing is not an error: it contributes no
//! votes. Everything else that can go wrong surfaces through [`Error`].

use std::path::PathBuf;

/// Error type for ensemble extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid voting parameters (model/weight mismatch, empty model list, out-of-range n-gram size).
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A model output record could not be decoded.
    #[error("Malformed record in {} at line {line}: {message}", .path.display())]
    Parse {
        /// File containing the bad record.
        path: PathBuf,
        /// 1-based line number of the record.
        line: usize,
        /// Decoder message.
        message: String,
    },

    /// An existing file or directory could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The HTML-to-plaintext extractor failed.
    #[error("Plaintext extraction failed: {0}")]
    Extraction(String),

    /// A document source could not download a URL.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Document source parameters were rejected.
    #[error("Invalid source query: {0}")]
    InvalidQuery(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for ensemble extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
