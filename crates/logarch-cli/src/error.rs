//! Error conversion utilities for CLI.
//!
//! Converts logarch-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use logarch_core::ArchiveError;

/// Converts `ArchiveError` to a user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError) -> anyhow::Error {
    match err {
        ArchiveError::SourceInaccessible { path, source } => {
            anyhow!(
                "cannot access directory '{}': {source}\n\
                 HINT: Check that the path exists and is readable.",
                path.display()
            )
        }
        ArchiveError::NotADirectory { path } => {
            anyhow!(
                "'{}' is not a directory\n\
                 HINT: Pass the log directory itself, not a file inside it.",
                path.display()
            )
        }
        ArchiveError::DestinationUnwritable { path, source } => {
            anyhow!(
                "cannot create destination directory '{}': {source}\n\
                 HINT: Use --dest to pick a writable destination.",
                path.display()
            )
        }
        ArchiveError::ArchiveWrite { path, source } => {
            anyhow!(
                "failed while writing archive '{}': {source}\n\
                 The partial archive has been removed.",
                path.display()
            )
        }
        ArchiveError::Publish { path, source } => {
            anyhow!(
                "failed to publish archive '{}': {source}",
                path.display()
            )
        }
        _ => anyhow::Error::from(err),
    }
}
