//! Error types for validation runs.
//!
//! [`CheckError`] covers the file-level failure taxonomy: a target file that
//! is absent, unreadable, or not shaped the way its checker expects. Anything
//! else travels as `anyhow::Error` and is translated into result entries by
//! the [`ErrorHandler`](crate::error_handler::ErrorHandler).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// Target file absent.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Target file exists but could not be read.
    #[error("failed to read {path}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Target file read fine but does not parse as the expected structure.
    #[error("failed to parse {path}: {reason}")]
    FileMalformed { path: PathBuf, reason: String },
}

impl CheckError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
