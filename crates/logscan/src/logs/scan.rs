//! Full-file parse pass.
//!
//! One call is one independent run: the registry is read-only and every
//! counter lives in the returned [`ParseOutcome`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LogScanError;
use crate::parser::{FormatRegistry, LogFormat, LogRecord, ParseMetrics};
use super::detect::resolve_format;
use super::read::LossyLines;

/// Result of one parse run.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub format: LogFormat,
    /// Extracted records, in file order
    pub records: Vec<LogRecord>,
    pub metrics: ParseMetrics,
}

impl ParseOutcome {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct LogScanner {
    registry: FormatRegistry,
}

impl LogScanner {
    pub fn new() -> Self {
        Self {
            registry: FormatRegistry::new(),
        }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Parse a log file.
    ///
    /// Without `format` the first non-blank line decides it; if nothing
    /// matches the run fails with no partial results. `max_lines` caps the
    /// number of non-blank lines read (`None` or `0` reads everything).
    pub fn parse_file(
        &self,
        path: impl AsRef<Path>,
        format: Option<LogFormat>,
        max_lines: Option<usize>,
    ) -> Result<ParseOutcome, LogScanError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LogScanError::FileNotFound(path.to_path_buf()));
        }

        let (format, detected) = resolve_format(&self.registry, path, format)?;

        let file = File::open(path)?;
        let mut outcome = self.parse_reader(BufReader::new(file), format, max_lines)?;
        outcome.metrics.detection_ran = detected;

        tracing::info!(
            path = %path.display(),
            %format,
            records = outcome.metrics.records,
            dropped = outcome.metrics.dropped,
            success_rate = outcome.metrics.success_rate(),
            "scan: file parsed"
        );
        Ok(outcome)
    }

    /// Parse every line of `reader` with a known format.
    pub fn parse_reader<R: BufRead>(
        &self,
        reader: R,
        format: LogFormat,
        max_lines: Option<usize>,
    ) -> Result<ParseOutcome, LogScanError> {
        let parser = self
            .registry
            .parser(format)
            .ok_or_else(|| crate::parser::UnknownFormat(format.to_string()))?;
        let limit = max_lines.filter(|&n| n > 0);

        let mut records = Vec::new();
        let mut metrics = ParseMetrics::new();

        for line in LossyLines::new(reader) {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                metrics.record_blank();
                continue;
            }

            metrics.record_line();
            match parser.parse(line) {
                Ok(record) => {
                    metrics.record_parse(&record);
                    records.push(record);
                }
                Err(e) => {
                    metrics.record_error(&e);
                    tracing::debug!(line = metrics.lines_read, error = %e, "scan: line dropped");
                }
            }

            if limit.is_some_and(|n| metrics.lines_read >= n as u64) {
                tracing::debug!(max_lines = ?limit, "scan: line cap reached");
                break;
            }
        }

        Ok(ParseOutcome {
            format,
            records,
            metrics,
        })
    }
}

impl Default for LogScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper: parse a file with a fresh scanner.
pub fn parse_file(
    path: impl AsRef<Path>,
    format: Option<LogFormat>,
    max_lines: Option<usize>,
) -> Result<ParseOutcome, LogScanError> {
    LogScanner::new().parse_file(path, format, max_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn log_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    fn apache(i: u32) -> String {
        format!("10.0.0.{i} - - [01/Feb/2026:12:00:0{} +0000] \"GET /p{i} HTTP/1.1\" 200 {i}", i % 10)
    }

    // ─────────────────────────────────────────────────────────
    // parse_file
    // ─────────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_reported_before_parsing() {
        let err = parse_file("/no/such/file.log", Some(LogFormat::App), None).unwrap_err();
        assert!(matches!(err, LogScanError::FileNotFound(_)));
        assert_eq!(err.to_string(), "Log file '/no/such/file.log' not found");
    }

    #[test]
    fn detection_failure_is_fatal() {
        let file = log_file(b"hello world\n[2024-01-01 00:00:00] [INFO] [m] x\n");
        let err = parse_file(file.path(), None, None).unwrap_err();
        assert!(matches!(err, LogScanError::UndetectableFormat));
    }

    #[test]
    fn app_file_with_three_levels() {
        let file = log_file(
            b"[2024-01-01 00:00:01,5] [INFO] [api] a\n\
              [2024-01-01 00:00:02] [ERROR] [db] b\n\
              [2024-01-01 00:00:03] [INFO] [api] c\n",
        );
        let outcome = parse_file(file.path(), None, None).unwrap();
        assert_eq!(outcome.format, LogFormat::App);
        assert!(outcome.metrics.detection_ran);
        let levels: Vec<&str> = outcome
            .records
            .iter()
            .map(|r| r.app().unwrap().severity_level.as_str())
            .collect();
        assert_eq!(levels, vec!["INFO", "ERROR", "INFO"]);
    }

    #[test]
    fn explicit_format_does_not_run_detection() {
        let file = log_file(b"[2024-01-01 00:00:01] [INFO] [api] a\n");
        let outcome = parse_file(file.path(), Some(LogFormat::App), None).unwrap();
        assert!(!outcome.metrics.detection_ran);
        assert_eq!(outcome.len(), 1);
    }

    #[test]
    fn wrong_explicit_format_yields_empty_outcome() {
        let file = log_file(b"[2024-01-01 00:00:01] [INFO] [api] a\n");
        let outcome = parse_file(file.path(), Some(LogFormat::Apache), None).unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.metrics.dropped, 1);
    }

    #[test]
    fn invalid_utf8_lines_still_parse() {
        let file = log_file(b"[2024-01-01 00:00:01] [INFO] [api] caf\xE9 menu\n");
        let outcome = parse_file(file.path(), None, None).unwrap();
        let message = &outcome.records[0].app().unwrap().message;
        assert!(message.starts_with("caf"));
        assert!(message.ends_with(" menu"));
    }

    // ─────────────────────────────────────────────────────────
    // parse_reader: line accounting
    // ─────────────────────────────────────────────────────────

    #[test]
    fn records_keep_file_order() {
        let input: String = (1..=5).map(|i| apache(i) + "\n").collect();
        let outcome = LogScanner::new()
            .parse_reader(Cursor::new(input), LogFormat::Apache, None)
            .unwrap();
        let paths: Vec<&str> = outcome
            .records
            .iter()
            .map(|r| r.request().unwrap().path.as_str())
            .collect();
        assert_eq!(paths, vec!["/p1", "/p2", "/p3", "/p4", "/p5"]);
    }

    #[test]
    fn max_lines_is_exact_and_ignores_blanks() {
        let input = format!("\n{}\n\n   \n{}\n\n{}\n{}\n", apache(1), apache(2), apache(3), apache(4));
        let outcome = LogScanner::new()
            .parse_reader(Cursor::new(input), LogFormat::Apache, Some(2))
            .unwrap();
        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.metrics.lines_read, 2);
        assert_eq!(outcome.metrics.blank_skipped, 3);
    }

    #[test]
    fn max_lines_counts_dropped_lines() {
        let input = format!("not a log line\n{}\n{}\n", apache(1), apache(2));
        let outcome = LogScanner::new()
            .parse_reader(Cursor::new(input), LogFormat::Apache, Some(2))
            .unwrap();
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.metrics.dropped, 1);
        assert_eq!(outcome.metrics.lines_read, 2);
    }

    #[test]
    fn max_lines_zero_means_unlimited() {
        let input: String = (1..=4).map(|i| apache(i) + "\n").collect();
        let outcome = LogScanner::new()
            .parse_reader(Cursor::new(input), LogFormat::Apache, Some(0))
            .unwrap();
        assert_eq!(outcome.len(), 4);
    }

    #[test]
    fn dropped_lines_do_not_stop_the_run() {
        let input = format!(
            "{}\n10.0.0.9 - - [01/Feb/2026:12:00:00 +0000] \"GET / HTTP/1.1\" 200 many\n{}\n",
            apache(1),
            apache(2)
        );
        let outcome = LogScanner::new()
            .parse_reader(Cursor::new(input), LogFormat::Apache, None)
            .unwrap();
        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.metrics.dropped, 1);
    }

    #[test]
    fn dash_bytes_scenario() {
        let input = "192.168.1.1 - - [01/Feb/2026:12:00:00 +0000] \"GET / HTTP/1.1\" 304 -\n";
        let outcome = LogScanner::new()
            .parse_reader(Cursor::new(input), LogFormat::Apache, None)
            .unwrap();
        let req = outcome.records[0].request().unwrap();
        assert_eq!(req.bytes_sent, 0);
        assert_eq!(req.status_code, 304);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let outcome = LogScanner::new()
            .parse_reader(Cursor::new(""), LogFormat::App, Some(10))
            .unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.metrics, ParseMetrics::default());
    }

    #[test]
    fn raw_entry_is_trimmed_line() {
        let input = "   [2024-01-01 00:00:01] [INFO] [api] padded   \r\n";
        let outcome = LogScanner::new()
            .parse_reader(Cursor::new(input), LogFormat::App, None)
            .unwrap();
        assert_eq!(outcome.records[0].raw_entry(), "[2024-01-01 00:00:01] [INFO] [api] padded");
    }
}
