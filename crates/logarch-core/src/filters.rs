//! Name-based exclusion rules for directory entries.

use crate::history::HISTORY_FILE_NAME;

/// Checks whether a file name marks already-compressed content.
///
/// Matches `.gz`, `.tgz`, and `.tar.gz` suffixes case-insensitively.
///
/// # Examples
///
/// ```
/// use logarch_core::filters::has_compressed_suffix;
///
/// assert!(has_compressed_suffix("old.tar.gz"));
/// assert!(has_compressed_suffix("bundle.TGZ"));
/// assert!(!has_compressed_suffix("app.log"));
/// ```
#[must_use]
pub fn has_compressed_suffix(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".gz") || lower.ends_with(".tgz") || lower.ends_with(".tar.gz")
}

/// Checks whether a file name is the shared history log.
///
/// The history log normally lives in the destination directory, but a copy
/// sitting in the source is skipped defensively so an audit record is
/// never folded into an archive.
#[must_use]
pub fn is_history_file(name: &str) -> bool {
    name == HISTORY_FILE_NAME
}
