use regex::{Captures, Regex};

use crate::parser::timestamp::parse_request_timestamp;
use crate::parser::traits::{LogFormat, LogParser, LogRecord, ParseError};
use crate::parser::model::{ExtendedRequestRecord, RequestRecord};
use crate::parser::NO_VALUE;

// host - - [date] "request" status bytes
const APACHE_PATTERN: &str =
    r#"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}) - - \[(.*?)\] "(.*?)" (\d+) (\d+|-)"#;

// host - user [date] "request" status bytes "referrer" "user-agent"
const NGINX_PATTERN: &str =
    r#"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}) - .* \[(.*?)\] "(.*?)" (\d+) (\d+|-) "(.*?)" "(.*?)""#;

/// Parser for Apache common log format lines.
pub struct ApacheParser {
    pattern: Regex,
}

impl ApacheParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(APACHE_PATTERN).expect("apache pattern is a valid regex"),
        }
    }
}

impl Default for ApacheParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser for ApacheParser {
    fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    fn parse(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = self
            .pattern
            .captures(line)
            .ok_or(ParseError::NoMatch(LogFormat::Apache))?;
        Ok(LogRecord::RequestBasic(request_from_captures(&caps, line)?))
    }

    fn format(&self) -> LogFormat {
        LogFormat::Apache
    }
}

/// Parser for Nginx access logs that also carry referrer and user-agent.
pub struct NginxParser {
    pattern: Regex,
}

impl NginxParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(NGINX_PATTERN).expect("nginx pattern is a valid regex"),
        }
    }
}

impl Default for NginxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser for NginxParser {
    fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    fn parse(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = self
            .pattern
            .captures(line)
            .ok_or(ParseError::NoMatch(LogFormat::Nginx))?;
        let request = request_from_captures(&caps, line)?;

        Ok(LogRecord::RequestExtended(ExtendedRequestRecord {
            request,
            referrer: group(&caps, 6).to_string(),
            client_agent: group(&caps, 7).to_string(),
        }))
    }

    fn format(&self) -> LogFormat {
        LogFormat::Nginx
    }
}

/// Groups 1-5 are laid out the same way in both request patterns.
fn request_from_captures(caps: &Captures<'_>, line: &str) -> Result<RequestRecord, ParseError> {
    let (http_method, path, protocol_version) = split_request(group(caps, 3));

    let status = group(caps, 4);
    let status_code = status.parse::<u16>().map_err(|_| ParseError::InvalidField {
        field: "status_code",
        value: status.to_string(),
    })?;

    Ok(RequestRecord {
        source_address: group(caps, 1).to_string(),
        timestamp: parse_request_timestamp(group(caps, 2)),
        http_method,
        path,
        protocol_version,
        status_code,
        bytes_sent: parse_bytes_sent(group(caps, 5))?,
        raw_entry: line.to_string(),
    })
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map(|m| m.as_str()).unwrap_or("")
}

/// Split `"GET /index.html HTTP/1.1"` into method, path and protocol.
///
/// Anything after the path is the protocol. Fewer than two tokens gives three
/// empty strings.
pub fn split_request(request: &str) -> (String, String, String) {
    let parts: Vec<&str> = request.split_whitespace().collect();
    if parts.len() < 2 {
        return (String::new(), String::new(), String::new());
    }
    (
        parts[0].to_string(),
        parts[1].to_string(),
        parts[2..].join(" "),
    )
}

/// `-` means nothing was sent.
pub fn parse_bytes_sent(value: &str) -> Result<u64, ParseError> {
    if value == NO_VALUE {
        return Ok(0);
    }
    value.parse::<u64>().map_err(|_| ParseError::InvalidField {
        field: "bytes_sent",
        value: value.to_string(),
    })
}
