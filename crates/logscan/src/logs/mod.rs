//! Logs module — reading log files, resolving their format, and the parse pass.

pub mod detect;
pub mod read;
pub mod scan;

pub use scan::{parse_file, LogScanner, ParseOutcome};
