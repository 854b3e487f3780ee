use std::process::ExitCode;

use clap::Parser;
use logscan::cli::Cli;
use logscan::conf::DEFAULT_LOG_FILTER;
use logscan::runtime::{boot, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter = boot::init_logging(DEFAULT_LOG_FILTER);

    let config = match boot::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    boot::apply_log_filter(&filter, &config.log_filter);

    match run::run(&cli, &config, std::io::stdout().lock()) {
        Ok(summary) if summary.export_failures == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
