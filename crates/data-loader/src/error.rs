//! Error types for the data-loader crate.
//!
//! Only resource failures are errors here. A malformed record is not an
//! error: the parser drops it and the loaders report how many rows were
//! accepted.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading a movies or ratings file.
///
/// Opening and reading the file is the only fallible step of a load. A file
/// that exists but yields no valid rows is an `Ok(0)` load, never one of
/// these variants.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// File exists but could not be read (permissions, invalid UTF-8, ...)
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataLoadError {
    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => DataLoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
