//! Error types for wheel packaging operations.
//!
//! Covers I/O failures and zip encoding problems that can occur while
//! writing a wheel archive.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from wheel packaging operations.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// An I/O operation failed (creating or writing the archive).
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),

    /// A package file could not be read.
    #[error("failed to read package file {path}: {source}")]
    ReadFile {
        /// The file that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The zip encoder rejected an entry.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Two package files map to the same archive path.
    #[error("duplicate archive entry: {0}")]
    DuplicateEntry(String),
}
