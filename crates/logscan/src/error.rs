//! Crate-level error taxonomy.
//!
//! Only configuration and detection failures stop a run. Per-line problems are
//! [`ParseError`](crate::parser::ParseError)s and never surface here.

use std::path::PathBuf;
use thiserror::Error;

use crate::conf::ConfigError;
use crate::export::ExportError;
use crate::parser::UnknownFormat;

#[derive(Debug, Error)]
pub enum LogScanError {
    #[error("Log file '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("Could not detect log format. Please specify explicitly.")]
    UndetectableFormat,

    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormat),

    #[error("failed to read log: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
