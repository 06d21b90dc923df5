use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for fallible explorer operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Error type returned by loading and export functions.
///
/// Parsing and transforming never fail: malformed input degrades to fewer (or no) rows. Only the
/// surfaces that touch the filesystem or serialize output can return this error.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file does not carry a `.csv` extension.
    #[error("unsupported file '{}': expected a .csv file", path.display())]
    UnsupportedFile { path: PathBuf },

    /// The file exceeds the configured size limit.
    #[error("file '{}' is {size} bytes, limit is {limit} bytes", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The file contents are not valid UTF-8 text.
    #[error("file '{}' is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },
}
