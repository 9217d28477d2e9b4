//! Routes core archiver diagnostics to the output formatter.

use crate::output::OutputFormatter;
use logarch_core::ArchiveEvents;
use logarch_core::SkipReason;
use std::path::Path;

/// Diagnostic sink backed by the CLI's output formatter.
///
/// Skip/include decisions surface only with `--verbose`; per-entry
/// warnings are always shown.
pub struct CliEvents<'a> {
    formatter: &'a dyn OutputFormatter,
    verbose: bool,
}

impl<'a> CliEvents<'a> {
    pub fn new(formatter: &'a dyn OutputFormatter, verbose: bool) -> Self {
        Self { formatter, verbose }
    }
}

impl ArchiveEvents for CliEvents<'_> {
    fn on_skip(&mut self, path: &Path, reason: SkipReason) {
        if self.verbose {
            self.formatter
                .format_detail(&format!("skipping {} ({reason})", path.display()));
        }
    }

    fn on_file_archived(&mut self, path: &Path, bytes: u64) {
        if self.verbose {
            self.formatter
                .format_detail(&format!("archived {} ({bytes} bytes)", path.display()));
        }
    }

    fn on_warning(&mut self, message: &str) {
        self.formatter.format_warning(message);
    }
}
