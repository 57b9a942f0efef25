//! Error types for thumbnail generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a thumbnail batch before any file is processed.
///
/// Failures on individual files are not errors; they are collected as
/// [`ThumbnailWarning`]s and the batch continues.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceDirectoryNotFound(PathBuf),

    /// Filename pattern is not a valid glob.
    #[error("Invalid filename pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Thumbnail size must be at least one pixel.
    #[error("Invalid thumbnail size {0}")]
    InvalidSize(u32),

    /// Failed to create the destination directory.
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to list the source directory.
    #[error("Failed to list {}: {source}", .path.display())]
    ListFiles {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file skipped during a thumbnail batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailWarning {
    /// File that could not be thumbnailed.
    pub path: PathBuf,

    /// Why it was skipped.
    pub message: String,
}

impl ThumbnailWarning {
    /// Create a new thumbnail warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
