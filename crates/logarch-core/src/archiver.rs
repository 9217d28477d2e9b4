//! The archiving operation: scan, filter, stream, publish.

use crate::error::ArchiveError;
use crate::error::Result;
use crate::events::ArchiveEvents;
use crate::events::SkipReason;
use crate::filters;
use crate::report::ArchiveReport;
use crate::request::ArchiveRequest;
use chrono::Local;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tar::Builder;
use tar::Header;

/// Sortable timestamp embedded in archive file names.
const FILENAME_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Archives the regular files of one directory into a tar.gz bundle.
///
/// Scans the source directory non-recursively, applies the exclusion
/// rules (subdirectories, already-compressed names, the history file,
/// non-regular entries), streams each surviving file into a
/// gzip-compressed tar written to `<final>.tmp`, and publishes it with an
/// atomic rename. Per-entry failures are downgraded to warnings on the
/// report; a fatal failure removes the temporary file before returning.
///
/// Entries are processed in whatever order the platform's directory
/// listing returns them; no ordering is guaranteed. Two runs started
/// within the same second produce the same archive name and race
/// last-writer-wins.
///
/// # Examples
///
/// ```no_run
/// use logarch_core::ArchiveRequest;
/// use logarch_core::NullEvents;
/// use logarch_core::create_archive;
///
/// let request = ArchiveRequest::new("/var/log/myapp");
/// let report = create_archive(&request, &mut NullEvents)?;
/// println!("{}", report.archive_path.display());
/// # Ok::<(), logarch_core::ArchiveError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The source is inaccessible or not a directory
/// - The destination directory cannot be created
/// - The archive file cannot be created, flushed, or renamed
/// - The directory listing fails
pub fn create_archive(
    request: &ArchiveRequest,
    events: &mut dyn ArchiveEvents,
) -> Result<ArchiveReport> {
    let start = Instant::now();

    let source_dir = absolutize(&request.source_dir)?;
    let metadata = fs::metadata(&source_dir).map_err(|source| ArchiveError::SourceInaccessible {
        path: source_dir.clone(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ArchiveError::NotADirectory { path: source_dir });
    }

    let dest_dir = absolutize(&request.resolved_dest_dir())?;
    fs::create_dir_all(&dest_dir).map_err(|source| ArchiveError::DestinationUnwritable {
        path: dest_dir.clone(),
        source,
    })?;

    let archive_name = format!(
        "logs_archive_{}.tar.gz",
        Local::now().format(FILENAME_TIME_FORMAT)
    );
    let archive_path = dest_dir.join(archive_name);
    let tmp_path = tmp_path_for(&archive_path);

    let mut report = ArchiveReport {
        archive_path: archive_path.clone(),
        ..ArchiveReport::default()
    };

    if let Err(err) = write_and_publish(
        &source_dir,
        &dest_dir,
        &tmp_path,
        &archive_path,
        request.remove_originals,
        &mut report,
        events,
    ) {
        // No temporary artifacts may survive a failed run.
        match fs::remove_file(&tmp_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => events.on_warning(&format!(
                "failed to remove temporary archive {}: {e}",
                tmp_path.display()
            )),
        }
        return Err(err);
    }

    report.duration = start.elapsed();
    Ok(report)
}

/// Writes the temporary archive and renames it to its final path.
///
/// Leaves the temporary file behind on error; the caller removes it.
fn write_and_publish(
    source_dir: &Path,
    dest_dir: &Path,
    tmp_path: &Path,
    archive_path: &Path,
    remove_originals: bool,
    report: &mut ArchiveReport,
    events: &mut dyn ArchiveEvents,
) -> Result<()> {
    let write_err = |source| ArchiveError::ArchiveWrite {
        path: tmp_path.to_path_buf(),
        source,
    };

    let file = File::create(tmp_path).map_err(write_err)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = Builder::new(encoder);

    // When the destination is nested inside the source, its base name
    // shows up as a directory entry and must never be self-included.
    let dest_base = dest_dir.file_name().map(OsStr::to_os_string);

    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();

        let metadata = match fs::symlink_metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                warn(
                    report,
                    events,
                    format!("unable to stat {}: {e}", path.display()),
                );
                continue;
            }
        };

        if metadata.is_dir() {
            if dest_base.as_deref() == Some(name.as_os_str()) {
                events.on_skip(&path, SkipReason::DestinationDir);
            }
            // No recursion into subdirectories.
            continue;
        }

        let display_name = name.to_string_lossy();
        if filters::has_compressed_suffix(&display_name) {
            events.on_skip(&path, SkipReason::AlreadyCompressed);
            continue;
        }
        if filters::is_history_file(&display_name) {
            events.on_skip(&path, SkipReason::HistoryFile);
            continue;
        }
        if !metadata.file_type().is_file() {
            warn(
                report,
                events,
                format!("skipping non-regular file {}", path.display()),
            );
            continue;
        }

        match append_file(&mut builder, &path, &name) {
            Ok(bytes) => {
                report.files_archived += 1;
                report.total_bytes += bytes;
                events.on_file_archived(&path, bytes);
                if remove_originals
                    && let Err(e) = fs::remove_file(&path)
                {
                    warn(
                        report,
                        events,
                        format!("failed to remove original {}: {e}", path.display()),
                    );
                }
            }
            Err(e) => {
                report.files_skipped += 1;
                warn(
                    report,
                    events,
                    format!("unable to archive {}: {e}", path.display()),
                );
            }
        }
    }

    // Close order: tar, then gzip, then the file. A failure while
    // flushing compressed data can mean truncated output, so each close
    // error is fatal.
    let encoder = builder.into_inner().map_err(write_err)?;
    let mut file = encoder.finish().map_err(write_err)?;
    file.flush().map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    drop(file);

    fs::rename(tmp_path, archive_path).map_err(|source| ArchiveError::Publish {
        path: archive_path.to_path_buf(),
        source,
    })
}

/// Streams one regular file into the archive under its bare file name.
///
/// The tar header is derived from the file's metadata, so mode, mtime,
/// and size are preserved. Returns the number of bytes copied.
fn append_file<W: Write>(builder: &mut Builder<W>, path: &Path, name: &OsStr) -> std::io::Result<u64> {
    let mut file = File::open(path)?;
    let metadata = file.metadata()?;

    let mut header = Header::new_gnu();
    header.set_metadata(&metadata);
    header.set_cksum();

    builder.append_data(&mut header, Path::new(name), &mut file)?;
    Ok(metadata.len())
}

/// Resolves a path against the current working directory if relative.
fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// Derives the run-private temporary path from the final archive path.
fn tmp_path_for(archive_path: &Path) -> PathBuf {
    let mut os = archive_path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

fn warn(report: &mut ArchiveReport, events: &mut dyn ArchiveEvents, message: String) {
    events.on_warning(&message);
    report.add_warning(message);
}
