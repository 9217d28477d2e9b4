//! Configuration for one archive run.

use std::path::PathBuf;

/// Directory created under the source when no destination is given.
pub const DEFAULT_ARCHIVE_DIR_NAME: &str = "archives";

/// Configuration for a single archive run.
///
/// Immutable for the duration of the run. The destination defaults to an
/// `archives` directory inside the source when unset.
///
/// # Examples
///
/// ```
/// use logarch_core::ArchiveRequest;
///
/// let request = ArchiveRequest::new("/var/log/myapp")
///     .with_dest_dir("/srv/backups")
///     .with_remove_originals(true);
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    /// Directory whose immediate regular files are archived.
    pub source_dir: PathBuf,

    /// Destination directory for the archive and history log.
    ///
    /// `None` means `<source_dir>/archives`.
    pub dest_dir: Option<PathBuf>,

    /// Delete each original file immediately after it is successfully
    /// written into the archive.
    ///
    /// Default: `false`.
    pub remove_originals: bool,
}

impl ArchiveRequest {
    /// Creates a request for the given source directory with defaults.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: None,
            remove_originals: false,
        }
    }

    /// Sets an explicit destination directory.
    #[must_use]
    pub fn with_dest_dir<P: Into<PathBuf>>(mut self, dest_dir: P) -> Self {
        self.dest_dir = Some(dest_dir.into());
        self
    }

    /// Sets whether originals are deleted after a successful copy.
    #[must_use]
    pub fn with_remove_originals(mut self, remove: bool) -> Self {
        self.remove_originals = remove;
        self
    }

    /// Returns the destination directory, resolved against the source.
    #[must_use]
    pub fn resolved_dest_dir(&self) -> PathBuf {
        self.dest_dir
            .clone()
            .unwrap_or_else(|| self.source_dir.join(DEFAULT_ARCHIVE_DIR_NAME))
    }
}
