use std::path::PathBuf;

use thiserror::Error;

/// Error type for tree scanning and file rewriting operations.
#[derive(Debug, Error)]
pub enum TidyError {
    /// A file or directory could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A glob or regular expression supplied through configuration is invalid.
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

impl TidyError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TidyError::Io { path: path.into(), source }
    }
}

/// Convenience result type for library operations.
pub type TidyResult<T> = Result<T, TidyError>;
