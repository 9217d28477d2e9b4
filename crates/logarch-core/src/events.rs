//! Diagnostic sink for per-entry decisions.
//!
//! The archiver never writes to process streams itself; callers inject an
//! [`ArchiveEvents`] implementation to observe skip/include decisions and
//! per-entry warnings. This keeps the core logic testable without
//! capturing stdout or stderr.

use std::fmt;
use std::path::Path;

/// Why a directory entry was excluded from the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry is the destination directory nested inside the source.
    DestinationDir,
    /// The file name ends in `.gz`, `.tgz`, or `.tar.gz` (case-insensitive).
    AlreadyCompressed,
    /// The file name matches the history log's file name.
    HistoryFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DestinationDir => write!(f, "destination archive directory"),
            Self::AlreadyCompressed => write!(f, "already compressed"),
            Self::HistoryFile => write!(f, "history file"),
        }
    }
}

/// Observer for the decisions an archive run makes.
///
/// All methods have no-op defaults; implement only what you need.
pub trait ArchiveEvents {
    /// Called when an entry is deliberately excluded.
    fn on_skip(&mut self, path: &Path, reason: SkipReason) {
        let _ = (path, reason);
    }

    /// Called after a file has been fully copied into the archive.
    fn on_file_archived(&mut self, path: &Path, bytes: u64) {
        let _ = (path, bytes);
    }

    /// Called for each per-entry recoverable error.
    fn on_warning(&mut self, message: &str) {
        let _ = message;
    }
}

/// An [`ArchiveEvents`] implementation that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEvents;

impl ArchiveEvents for NullEvents {}
