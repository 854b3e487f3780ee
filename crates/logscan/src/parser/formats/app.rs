use regex::Regex;

use crate::parser::model::AppRecord;
use crate::parser::timestamp::parse_app_timestamp;
use crate::parser::traits::{LogFormat, LogParser, LogRecord, ParseError};

// [date] [LEVEL] [module] message
const APP_PATTERN: &str = r"^\[(.*?)\] \[(\w+)\] \[(.*?)\] (.*)";

/// Parser for bracketed application logs.
///
/// The message is the rest of the line, so it may itself contain brackets.
pub struct AppParser {
    pattern: Regex,
}

impl AppParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(APP_PATTERN).expect("app pattern is a valid regex"),
        }
    }
}

impl Default for AppParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser for AppParser {
    fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    fn parse(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = self
            .pattern
            .captures(line)
            .ok_or(ParseError::NoMatch(LogFormat::App))?;
        let field = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");

        Ok(LogRecord::AppStructured(AppRecord {
            timestamp: parse_app_timestamp(field(1)),
            severity_level: field(2).to_string(),
            module_name: field(3).to_string(),
            message: field(4).to_string(),
            raw_entry: line.to_string(),
        }))
    }

    fn format(&self) -> LogFormat {
        LogFormat::App
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_line() {
        let line = "[2024-01-15 10:30:45,123] [INFO] [auth.service] User logged in";
        let record = AppParser::new().parse(line).unwrap();
        let app = record.app().unwrap();
        assert_eq!(app.severity_level, "INFO");
        assert_eq!(app.module_name, "auth.service");
        assert_eq!(app.message, "User logged in");
        assert_eq!(app.timestamp.to_string(), "2024-01-15T10:30:45.123000");
        assert_eq!(app.raw_entry, line);
    }

    #[test]
    fn test_message_may_contain_brackets() {
        let line = "[2024-01-15 10:30:45] [ERROR] [db] query [id=7] failed: \"timeout\"";
        let record = AppParser::new().parse(line).unwrap();
        assert_eq!(record.app().unwrap().message, "query [id=7] failed: \"timeout\"");
    }

    #[test]
    fn test_unknown_timestamp_layout_is_verbatim() {
        let line = "[Jan 15 10:30:45] [WARN] [cache] eviction storm";
        let record = AppParser::new().parse(line).unwrap();
        assert_eq!(record.timestamp().to_string(), "Jan 15 10:30:45");
        assert!(!record.timestamp().is_parsed());
    }

    #[test]
    fn test_level_must_be_a_word() {
        let line = "[2024-01-15 10:30:45] [NOT A LEVEL] [db] message";
        assert!(!AppParser::new().matches(line));
        assert_eq!(
            AppParser::new().parse(line),
            Err(ParseError::NoMatch(LogFormat::App))
        );
    }

    #[test]
    fn test_request_line_is_not_app() {
        let line = "127.0.0.1 - - [10/Oct/2000:13:55:36 -0700] \"GET / HTTP/1.0\" 200 1";
        assert!(!AppParser::new().matches(line));
    }
}
