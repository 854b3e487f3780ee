pub use super::model::{LogFormat, LogRecord, ParseError};

/// One registry entry: a line pattern plus its field extraction.
pub trait LogParser: Send + Sync {
    /// whether the line matches this format's pattern (anchored at line start)
    fn matches(&self, line: &str) -> bool;

    /// extract a record from a trimmed line
    fn parse(&self, line: &str) -> Result<LogRecord, ParseError>;

    fn format(&self) -> LogFormat;
}
