//! Archive run reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a completed archive run.
///
/// The counters refer only to files that were fully copied into the
/// archive before it was closed; entries skipped by filters or lost to
/// per-file errors never contribute to them.
///
/// # Examples
///
/// ```
/// use logarch_core::ArchiveReport;
///
/// let mut report = ArchiveReport::default();
/// report.files_archived = 2;
/// report.total_bytes = 150;
/// assert!(!report.has_warnings());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Absolute path of the final published archive.
    pub archive_path: PathBuf,

    /// Number of files fully copied into the archive.
    pub files_archived: usize,

    /// Sum of the byte counts of the archived files.
    pub total_bytes: u64,

    /// Number of candidate files dropped by per-entry errors.
    pub files_skipped: usize,

    /// Duration of the run.
    pub duration: Duration,

    /// Warnings generated by per-entry recoverable errors.
    pub warnings: Vec<String>,
}

impl ArchiveReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
