//! Integration tests for logarch-core.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use flate2::read::GzDecoder;
use logarch_core::ArchiveEvents;
use logarch_core::ArchiveRequest;
use logarch_core::HistoryEntry;
use logarch_core::NullEvents;
use logarch_core::SkipReason;
use logarch_core::append_history;
use logarch_core::create_archive;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

/// Unpacks an archive into (entry name, content) pairs.
fn read_entries(archive_path: &Path) -> Vec<(String, Vec<u8>)> {
    let file = File::open(archive_path).expect("archive should open");
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            (name, content)
        })
        .collect()
}

#[derive(Debug, Default)]
struct RecordingEvents {
    skips: Vec<(PathBuf, SkipReason)>,
    archived: Vec<(PathBuf, u64)>,
    warnings: Vec<String>,
}

impl ArchiveEvents for RecordingEvents {
    fn on_skip(&mut self, path: &Path, reason: SkipReason) {
        self.skips.push((path.to_path_buf(), reason));
    }

    fn on_file_archived(&mut self, path: &Path, bytes: u64) {
        self.archived.push((path.to_path_buf(), bytes));
    }

    fn on_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

#[test]
fn test_counters_match_qualifying_files() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), vec![b'a'; 100]).unwrap();
    fs::write(source.path().join("debug.log"), vec![b'd'; 50]).unwrap();
    fs::write(source.path().join("old.tar.gz"), b"not a real archive").unwrap();
    fs::create_dir(source.path().join("archives")).unwrap();

    let request = ArchiveRequest::new(source.path());
    let report = create_archive(&request, &mut NullEvents).unwrap();

    assert_eq!(report.files_archived, 2);
    assert_eq!(report.total_bytes, 150);
    assert_eq!(report.files_skipped, 0);
    assert!(!report.has_warnings());
    assert!(report.archive_path.exists());

    let mut names: Vec<String> = read_entries(&report.archive_path)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["app.log", "debug.log"]);
}

#[test]
fn test_entries_are_flat_and_byte_identical() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), b"line one\nline two\n").unwrap();
    fs::write(source.path().join("trace.out"), vec![0u8, 1, 2, 3, 255]).unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    let report = create_archive(&request, &mut NullEvents).unwrap();

    let entries = read_entries(&report.archive_path);
    assert_eq!(entries.len(), 2);
    for (name, content) in entries {
        assert!(
            !name.contains('/'),
            "entry {name} should carry no path component"
        );
        let original = fs::read(source.path().join(&name)).unwrap();
        assert_eq!(content, original, "content mismatch for {name}");
    }
}

#[test]
fn test_compressed_files_never_archived() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("keep.log"), b"keep").unwrap();
    fs::write(source.path().join("a.gz"), b"x").unwrap();
    fs::write(source.path().join("b.TGZ"), b"x").unwrap();
    fs::write(source.path().join("c.Tar.Gz"), b"x").unwrap();

    let request = ArchiveRequest::new(source.path());
    let mut events = RecordingEvents::default();
    let report = create_archive(&request, &mut events).unwrap();

    assert_eq!(report.files_archived, 1);
    let names: Vec<String> = read_entries(&report.archive_path)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["keep.log"]);

    let compressed_skips = events
        .skips
        .iter()
        .filter(|(_, reason)| *reason == SkipReason::AlreadyCompressed)
        .count();
    assert_eq!(compressed_skips, 3);
}

#[test]
fn test_nested_destination_is_never_self_included() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), b"data").unwrap();

    // First run creates <source>/archives and an archive inside it.
    let request = ArchiveRequest::new(source.path());
    create_archive(&request, &mut NullEvents).unwrap();

    // Second run sees the populated destination directory.
    let mut events = RecordingEvents::default();
    let report = create_archive(&request, &mut events).unwrap();

    assert_eq!(report.files_archived, 1);
    let names: Vec<String> = read_entries(&report.archive_path)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["app.log"]);
    assert!(
        events
            .skips
            .iter()
            .any(|(path, reason)| *reason == SkipReason::DestinationDir
                && path.ends_with("archives"))
    );
}

#[test]
fn test_history_file_in_source_is_skipped() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), b"data").unwrap();
    fs::write(source.path().join("archive_history.log"), b"old audit").unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    let mut events = RecordingEvents::default();
    let report = create_archive(&request, &mut events).unwrap();

    assert_eq!(report.files_archived, 1);
    assert!(
        events
            .skips
            .iter()
            .any(|(_, reason)| *reason == SkipReason::HistoryFile)
    );
}

#[test]
fn test_originals_kept_by_default() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), b"keep me").unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    create_archive(&request, &mut NullEvents).unwrap();

    assert_eq!(
        fs::read(source.path().join("app.log")).unwrap(),
        b"keep me"
    );
}

#[test]
fn test_remove_originals_deletes_archived_files_only() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), b"archived").unwrap();
    fs::write(source.path().join("old.gz"), b"filtered").unwrap();

    let request = ArchiveRequest::new(source.path())
        .with_dest_dir(dest.path())
        .with_remove_originals(true);
    let report = create_archive(&request, &mut NullEvents).unwrap();

    assert_eq!(report.files_archived, 1);
    assert!(!source.path().join("app.log").exists());
    // Filtered files are untouched.
    assert!(source.path().join("old.gz").exists());
}

#[test]
fn test_no_temporary_file_survives_success() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), b"data").unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    let report = create_archive(&request, &mut NullEvents).unwrap();

    assert!(report.archive_path.exists());
    let leftovers: Vec<_> = fs::read_dir(dest.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "tmp residue: {leftovers:?}");
}

/// Returns `true` when permission bits are actually enforced.
///
/// Root ignores mode bits, which would turn the permission-based failure
/// tests into false negatives.
#[cfg(unix)]
fn permissions_enforced(dir: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    let probe = dir.join("probe");
    fs::create_dir(&probe).unwrap();
    fs::set_permissions(&probe, fs::Permissions::from_mode(0o555)).unwrap();
    let denied = File::create(probe.join("canary")).is_err();
    fs::set_permissions(&probe, fs::Permissions::from_mode(0o755)).unwrap();
    fs::remove_dir_all(&probe).unwrap();
    denied
}

#[cfg(unix)]
#[test]
fn test_failed_run_leaves_no_artifacts() {
    use std::os::unix::fs::PermissionsExt;

    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), b"data").unwrap();
    if !permissions_enforced(source.path()) {
        return;
    }

    // Read-only destination: the temporary archive cannot be created.
    fs::set_permissions(dest.path(), fs::Permissions::from_mode(0o555)).unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    let result = create_archive(&request, &mut NullEvents);
    assert!(result.is_err());

    fs::set_permissions(dest.path(), fs::Permissions::from_mode(0o755)).unwrap();
    let entries: Vec<_> = fs::read_dir(dest.path()).unwrap().collect();
    assert!(entries.is_empty(), "failed run left artifacts behind");
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_skipped_with_warning() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), b"data").unwrap();
    std::os::unix::fs::symlink(
        source.path().join("app.log"),
        source.path().join("app.link"),
    )
    .unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    let mut events = RecordingEvents::default();
    let report = create_archive(&request, &mut events).unwrap();

    assert_eq!(report.files_archived, 1);
    assert!(report.has_warnings());
    assert!(
        events
            .warnings
            .iter()
            .any(|w| w.contains("non-regular") && w.contains("app.link"))
    );
}

#[cfg(unix)]
#[test]
fn test_file_mode_is_preserved() {
    use std::os::unix::fs::PermissionsExt;

    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let file_path = source.path().join("app.log");
    fs::write(&file_path, b"data").unwrap();
    fs::set_permissions(&file_path, fs::Permissions::from_mode(0o640)).unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    let report = create_archive(&request, &mut NullEvents).unwrap();

    let file = File::open(&report.archive_path).unwrap();
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    let entry = archive.entries().unwrap().next().unwrap().unwrap();
    assert_eq!(entry.header().mode().unwrap() & 0o777, 0o640);
    assert_eq!(entry.header().size().unwrap(), 4);
}

#[test]
fn test_consecutive_runs_append_parsable_history() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.log"), vec![b'a'; 64]).unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    for _ in 0..2 {
        let report = create_archive(&request, &mut NullEvents).unwrap();
        append_history(
            dest.path(),
            &report.archive_path,
            report.files_archived,
            report.total_bytes,
        )
        .unwrap();
    }

    let content = fs::read_to_string(dest.path().join("archive_history.log")).unwrap();
    let entries: Vec<HistoryEntry> = content
        .lines()
        .map(|line| HistoryEntry::parse(line).expect("history line should parse"))
        .collect();
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        assert!(entry.archive_name.starts_with("logs_archive_"));
        assert!(entry.archive_name.ends_with(".tar.gz"));
        assert_eq!(entry.files_archived, 1);
        assert_eq!(entry.total_bytes, 64);
    }
}

#[test]
fn test_empty_source_produces_empty_archive() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    let report = create_archive(&request, &mut NullEvents).unwrap();

    assert_eq!(report.files_archived, 0);
    assert_eq!(report.total_bytes, 0);
    assert!(report.archive_path.exists());
    assert!(read_entries(&report.archive_path).is_empty());
}

#[cfg(unix)]
#[test]
fn test_per_file_failure_does_not_abort_run() {
    use std::os::unix::fs::PermissionsExt;

    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("good.log"), b"fine").unwrap();
    if !permissions_enforced(source.path()) {
        return;
    }
    let locked = source.path().join("locked.log");
    fs::write(&locked, b"secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let request = ArchiveRequest::new(source.path()).with_dest_dir(dest.path());
    let report = create_archive(&request, &mut NullEvents).unwrap();

    assert!(report.archive_path.exists());
    assert_eq!(report.files_archived, 1);
    assert_eq!(report.files_skipped, 1);
    assert!(report.has_warnings());

    // The unreadable original is not deleted and stays where it was.
    assert!(locked.exists());
}
