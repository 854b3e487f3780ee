// Module layout for the logscan parser and CLI.

// Core infrastructure
pub mod error;
pub mod parser;

// Domain modules
pub mod analysis;
pub mod conf;
pub mod export;
pub mod logs;

// Process surface
pub mod cli;
pub mod runtime;

pub use error::LogScanError;
