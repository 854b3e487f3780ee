//! Run — one CLI invocation: parse, export, analyze.

use std::io::Write;

use crate::analysis::analyze_top;
use crate::cli::Cli;
use crate::conf::{ConfigError, ScanConfig};
use crate::error::LogScanError;
use crate::export::{render_json, write_csv, write_json};
use crate::logs::LogScanner;

/// What a finished run reports back to `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    /// Exports that failed; the run carries on past them
    pub export_failures: usize,
}

/// Flags win over the config file; the config file wins over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub format: Option<crate::parser::LogFormat>,
    pub max_lines: Option<usize>,
    pub top_n: usize,
}

impl Settings {
    /// `top_n` must stay positive whichever layer set it.
    pub fn resolve(cli: &Cli, config: &ScanConfig) -> Result<Self, ConfigError> {
        let settings = Self {
            format: cli.format.or(config.format),
            max_lines: cli.max_lines.or(config.max_lines),
            top_n: cli.top.unwrap_or(config.top_n),
        };
        if settings.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be > 0".to_string()));
        }
        Ok(settings)
    }
}

pub fn run<W: Write>(cli: &Cli, config: &ScanConfig, mut out: W) -> Result<RunSummary, LogScanError> {
    let settings = Settings::resolve(cli, config)?;
    tracing::debug!(?settings, "run: effective settings");

    let outcome = LogScanner::new().parse_file(&cli.log_file, settings.format, settings.max_lines)?;
    writeln!(out, "Successfully parsed {} log entries", outcome.len()).map_err(LogScanError::Output)?;

    let mut export_failures = 0;

    if let Some(path) = &cli.output {
        match write_json(&outcome.records, path) {
            Ok(_) => writeln!(out, "Results saved to {}", path.display()).map_err(LogScanError::Output)?,
            Err(e) => {
                tracing::error!(error = %e, "run: JSON export failed");
                eprintln!("Error: {e}");
                export_failures += 1;
            }
        }
    }

    if let Some(path) = &cli.csv {
        match write_csv(&outcome.records, path) {
            Ok(()) => writeln!(out, "Results saved to {}", path.display()).map_err(LogScanError::Output)?,
            Err(e) => {
                tracing::error!(error = %e, "run: CSV export failed");
                eprintln!("Error: {e}");
                export_failures += 1;
            }
        }
    }

    if cli.analyze {
        let analysis = analyze_top(&outcome.records, settings.top_n);
        let json = render_json(&analysis)?;
        writeln!(out, "\nLog Analysis:\n{json}").map_err(LogScanError::Output)?;
    }

    Ok(RunSummary {
        records: outcome.len(),
        export_failures,
    })
}
