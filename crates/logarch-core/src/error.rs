//! Error types for archive operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that abort an archive run.
///
/// Failures confined to a single directory entry are not represented here;
/// they are absorbed as warnings on the
/// [`ArchiveReport`](crate::ArchiveReport) and the run continues.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source directory cannot be accessed.
    #[error("cannot access source directory {path}: {source}")]
    SourceInaccessible {
        /// The source directory path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Source path exists but is not a directory.
    #[error("{path} is not a directory")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Destination directory cannot be created.
    #[error("cannot create destination directory {path}: {source}")]
    DestinationUnwritable {
        /// The destination directory path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing or flushing the archive stream failed.
    ///
    /// Covers temporary-file creation and the ordered close of the tar,
    /// gzip, and file layers. A close failure can mean truncated output,
    /// so it is never swallowed.
    #[error("failed to write archive {path}: {source}")]
    ArchiveWrite {
        /// The temporary archive path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Renaming the temporary file to its final path failed.
    #[error("failed to publish archive {path}: {source}")]
    Publish {
        /// The final archive path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Appending to the history log failed.
    ///
    /// Callers treat this as advisory: a published archive stays a
    /// successful run even when its history record cannot be written.
    #[error("failed to append history record {path}: {source}")]
    History {
        /// The history file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl ArchiveError {
    /// Returns `true` if this error leaves the run successful overall.
    ///
    /// Only the advisory history record qualifies; every other variant
    /// means the archive itself is incomplete or unpublished.
    #[must_use]
    pub const fn is_advisory(&self) -> bool {
        matches!(self, Self::History { .. })
    }
}
