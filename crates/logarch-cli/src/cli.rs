//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logarch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source log directory to archive (non-recursive)
    #[arg(value_name = "LOG_DIR")]
    pub log_dir: PathBuf,

    /// Destination directory (default: <LOG_DIR>/archives)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Delete originals after successful inclusion in the archive
    #[arg(long)]
    pub remove: bool,

    /// Enable verbose output (each skip/include decision)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}
