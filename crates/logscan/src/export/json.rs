use std::fs;
use std::path::Path;
use serde::Serialize;

use crate::parser::LogRecord;
use super::ExportError;

/// Pretty JSON (two-space indent) for any serializable value.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Records as a JSON array, in parse order.
pub fn to_json(records: &[LogRecord]) -> Result<String, ExportError> {
    render_json(records)
}

/// Write the JSON array to `path` and return the rendered text.
pub fn write_json(records: &[LogRecord], path: impl AsRef<Path>) -> Result<String, ExportError> {
    let path = path.as_ref();
    let json = to_json(records)?;
    fs::write(path, &json).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = records.len(), "export: JSON written");
    Ok(json)
}
