use serde::Serialize;

use super::model::{LogRecord, ParseError};

/// Per-run parse counters.
///
/// Every call to the scanner builds its own instance, so plain integers are
/// enough; nothing is shared between runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseMetrics {
    /// Whether the format was inferred from the first non-blank line
    pub detection_ran: bool,
    /// Non-blank lines handed to the extractor (what `max_lines` caps)
    pub lines_read: u64,
    pub blank_skipped: u64,
    pub records: u64,
    /// Lines that produced no record
    pub dropped: u64,
    pub no_match: u64,
    pub invalid_field: u64,
    /// Records whose timestamp was kept as raw text
    pub raw_timestamps: u64,
}

impl ParseMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_blank(&mut self) {
        self.blank_skipped += 1;
    }

    #[inline]
    pub fn record_line(&mut self) {
        self.lines_read += 1;
    }

    #[inline]
    pub fn record_parse(&mut self, record: &LogRecord) {
        self.records += 1;
        if !record.timestamp().is_parsed() {
            self.raw_timestamps += 1;
        }
    }

    #[inline]
    pub fn record_error(&mut self, error: &ParseError) {
        self.dropped += 1;
        match error {
            ParseError::NoMatch(_) => self.no_match += 1,
            ParseError::InvalidField { .. } => self.invalid_field += 1,
        }
    }

    /// Share of read lines that became records (0.0 when nothing was read).
    pub fn success_rate(&self) -> f64 {
        if self.lines_read == 0 {
            return 0.0;
        }
        self.records as f64 / self.lines_read as f64
    }
}
