//! Export — structured-text (JSON) and tabular (CSV) output of parsed records.

pub mod json;
pub mod table;

use thiserror::Error;

pub use json::{render_json, to_json, write_json};
pub use table::{to_table, write_csv, write_table};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
