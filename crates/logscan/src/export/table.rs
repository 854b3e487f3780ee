//! Tabular export.
//!
//! The column set is the union of every record's fields in first-seen order;
//! a record without a column leaves that cell empty.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::parser::LogRecord;
use super::ExportError;

const SEP: char = ',';

/// Header plus one row per record.
pub fn to_table(records: &[LogRecord]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header: Vec<&'static str> = Vec::new();
    let flattened: Vec<Vec<(&'static str, String)>> =
        records.iter().map(|record| record.columns()).collect();

    for cols in &flattened {
        for (name, _) in cols {
            if !header.contains(name) {
                header.push(*name);
            }
        }
    }

    let rows = flattened
        .into_iter()
        .map(|mut cols| {
            header
                .iter()
                .map(|name| {
                    cols.iter()
                        .position(|(k, _)| k == name)
                        .map(|i| std::mem::take(&mut cols[i].1))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    (header.into_iter().map(String::from).collect(), rows)
}

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", SEP)?; } else { first = false; }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header row followed by the records. Nothing is written for zero records.
pub fn write_table<W: Write>(records: &[LogRecord], mut w: W) -> io::Result<()> {
    let (header, rows) = to_table(records);
    if header.is_empty() {
        return Ok(());
    }
    write_row(&mut w, &header)?;
    for row in &rows {
        write_row(&mut w, row)?;
    }
    w.flush()
}

pub fn write_csv(records: &[LogRecord], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let wrap = |source: io::Error| ExportError::Write {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    write_table(records, BufWriter::new(file)).map_err(wrap)?;
    tracing::info!(path = %path.display(), records = records.len(), "export: CSV written");
    Ok(())
}
