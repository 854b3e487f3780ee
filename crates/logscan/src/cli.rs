//! Command-line surface.

use std::path::PathBuf;
use clap::Parser;

use crate::parser::LogFormat;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "logscan",
    version,
    about = "Parse and analyze log files"
)]
pub struct Cli {
    /// Path to the log file
    pub log_file: PathBuf,

    /// Log format (auto-detect if not specified)
    #[arg(long, value_enum)]
    pub format: Option<LogFormat>,

    /// Output file path for JSON results
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Save results as CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Maximum number of lines to parse
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Perform basic analysis on logs
    #[arg(long)]
    pub analyze: bool,

    /// Entries kept in each top-N ranking
    #[arg(long)]
    pub top: Option<usize>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
