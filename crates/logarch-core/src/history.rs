//! Append-only audit log of past archive runs.

use crate::error::ArchiveError;
use crate::error::Result;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// File name of the shared history log inside the destination directory.
pub const HISTORY_FILE_NAME: &str = "archive_history.log";

/// Timestamp format of history lines.
///
/// `%Z` renders the local UTC offset with chrono's `Local`.
const HUMAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Returns the history log path for a destination directory.
#[must_use]
pub fn history_path(dest_dir: &Path) -> PathBuf {
    dest_dir.join(HISTORY_FILE_NAME)
}

/// Appends one tab-separated record for a published archive.
///
/// The file is opened in create-or-append mode; concurrent runs rely on
/// append-mode open semantics for interleaving safety. Lines are never
/// rewritten or deleted.
///
/// Callers treat a failure here as advisory: the archive run already
/// succeeded by the time this is called.
pub fn append_history(
    dest_dir: &Path,
    archive_path: &Path,
    files_archived: usize,
    total_bytes: u64,
) -> Result<()> {
    let path = history_path(dest_dir);
    let wrap = |source| ArchiveError::History {
        path: path.clone(),
        source,
    };

    let archive_name = archive_path
        .file_name()
        .map_or_else(|| archive_path.to_string_lossy(), |n| n.to_string_lossy());

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(wrap)?;
    writeln!(
        file,
        "{}\tarchive={archive_name}\tfiles={files_archived}\ttotal_bytes={total_bytes}",
        Local::now().format(HUMAN_TIME_FORMAT)
    )
    .map_err(wrap)?;
    file.flush().map_err(wrap)?;
    Ok(())
}

/// One parsed line of the history log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Human-readable timestamp of the run.
    pub timestamp: String,
    /// Base file name of the published archive.
    pub archive_name: String,
    /// Number of files in the archive.
    pub files_archived: usize,
    /// Total byte count of the archived files.
    pub total_bytes: u64,
}

impl HistoryEntry {
    /// Parses one history line, returning `None` for malformed input.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.trim_end_matches('\n').split('\t');
        let timestamp = fields.next()?.to_string();
        let archive_name = fields.next()?.strip_prefix("archive=")?.to_string();
        let files_archived = fields.next()?.strip_prefix("files=")?.parse().ok()?;
        let total_bytes = fields.next()?.strip_prefix("total_bytes=")?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            timestamp,
            archive_name,
            files_archived,
            total_bytes,
        })
    }
}
