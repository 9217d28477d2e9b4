//! Logarch CLI - archives the files of a flat log directory into a
//! timestamped tar.gz bundle and records the run in a history log.

mod cli;
mod error;
mod events;
mod output;

use anyhow::Result;
use clap::Parser;
use logarch_core::ArchiveRequest;
use logarch_core::append_history;
use logarch_core::create_archive;
use output::OutputFormatter;

fn main() {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.quiet);

    if let Err(err) = run(&cli, &*formatter) {
        formatter.format_error(&err);
        std::process::exit(1);
    }
}

fn run(cli: &cli::Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut request = ArchiveRequest::new(&cli.log_dir).with_remove_originals(cli.remove);
    if let Some(dest) = &cli.dest {
        request = request.with_dest_dir(dest);
    }

    let mut events = events::CliEvents::new(formatter, cli.verbose);
    let report =
        create_archive(&request, &mut events).map_err(error::convert_archive_error)?;

    // Best-effort audit record: a published archive is a successful run
    // even when its history line cannot be written.
    if let Some(dest_dir) = report.archive_path.parent()
        && let Err(err) = append_history(
            dest_dir,
            &report.archive_path,
            report.files_archived,
            report.total_bytes,
        )
    {
        formatter.format_warning(&format!("failed to append to history file: {err}"));
    }

    formatter.format_archive_result(&report)?;

    Ok(())
}
