//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use logarch_core::ArchiveReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_archive_result(&self, report: &ArchiveReport) -> Result<()> {
        #[derive(Serialize)]
        struct ArchiveOutput {
            archive_path: String,
            files_archived: usize,
            total_bytes: u64,
            files_skipped: usize,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = ArchiveOutput {
            archive_path: report.archive_path.display().to_string(),
            files_archived: report.files_archived,
            total_bytes: report.total_bytes,
            files_skipped: report.files_skipped,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        let output = JsonOutput::success("archive", data);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("archive", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        // Keep stdout machine-readable; diagnostics go to stderr.
        let _ = writeln!(io::stderr(), "WARNING: {message}");
    }

    fn format_detail(&self, message: &str) {
        let _ = writeln!(io::stderr(), "{message}");
    }
}
