//! Log format resolution: explicit override → first-line detection.
//!
//! Detection opens the file, reads the first non-blank line and closes it
//! again. The extraction pass reopens the file from the start.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::LogScanError;
use crate::parser::{FormatRegistry, LogFormat};
use super::read::first_non_blank;

/// Resolve the log format for a file.
///
/// Priority chain (highest → lowest):
/// 1. Explicit format from the caller (always wins, file is not read)
/// 2. First registered pattern matching the first non-blank line
///
/// Returns the format and whether detection ran.
pub fn resolve_format(
    registry: &FormatRegistry,
    path: &Path,
    requested: Option<LogFormat>,
) -> Result<(LogFormat, bool), LogScanError> {
    if let Some(format) = requested {
        tracing::debug!(%format, "detect: using explicit format");
        return Ok((format, false));
    }

    let format = detect_file_format(registry, path)?;
    Ok((format, true))
}

/// Detect a file's format from its first non-blank line.
///
/// An empty file, or a first line no pattern accepts, is a hard failure.
pub fn detect_file_format(registry: &FormatRegistry, path: &Path) -> Result<LogFormat, LogScanError> {
    let file = File::open(path)?;
    let sample = first_non_blank(BufReader::new(file))?;

    let Some(sample) = sample else {
        tracing::warn!(path = %path.display(), "detect: no non-blank line to sample");
        return Err(LogScanError::UndetectableFormat);
    };

    match registry.detect(&sample) {
        Some(format) => {
            tracing::info!(path = %path.display(), %format, "detect: format detected");
            Ok(format)
        }
        None => {
            tracing::warn!(path = %path.display(), "detect: no pattern matched the first line");
            Err(LogScanError::UndetectableFormat)
        }
    }
}
