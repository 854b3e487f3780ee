use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use serde::{Serialize, Deserialize};

use super::timestamp::Timestamp;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Apache common log format (`ip - - [ts] "req" status bytes`)
    #[serde(alias = "apache-combined")]
    #[value(name = "apache", alias = "apache-combined")]
    Apache,
    /// Nginx access log with referrer and user-agent
    #[serde(alias = "nginx-extended")]
    #[value(name = "nginx", alias = "nginx-extended")]
    Nginx,
    /// Application log (`[ts] [LEVEL] [module] message`)
    #[serde(alias = "app-structured")]
    #[value(name = "app", alias = "app-structured")]
    App,
}

impl LogFormat {
    /// Registration order. Detection walks formats in this order.
    pub const ALL: [LogFormat; 3] = [LogFormat::Apache, LogFormat::Nginx, LogFormat::App];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Apache => "apache",
            LogFormat::Nginx => "nginx",
            LogFormat::App => "app",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log format '{0}' (expected one of: apache, nginx, app)")]
pub struct UnknownFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apache" | "apache-combined" => Ok(LogFormat::Apache),
            "nginx" | "nginx-extended" => Ok(LogFormat::Nginx),
            "app" | "app-structured" => Ok(LogFormat::App),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Why a single line produced no record. Never fatal for a parse run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line does not match the {0} pattern")]
    NoMatch(LogFormat),

    #[error("invalid {field} value: {value:?}")]
    InvalidField {
        field: &'static str,
        value: String,
    },
}

/// Fields shared by every request-style record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestRecord {
    pub source_address: String,
    pub timestamp: Timestamp,
    pub http_method: String,
    pub path: String,
    pub protocol_version: String,
    pub status_code: u16,
    pub bytes_sent: u64,
    /// Original line (always preserved)
    pub raw_entry: String,
}

/// Request record with the referrer and user-agent columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedRequestRecord {
    #[serde(flatten)]
    pub request: RequestRecord,
    pub referrer: String,
    pub client_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppRecord {
    pub timestamp: Timestamp,
    pub severity_level: String,
    pub module_name: String,
    pub message: String,
    pub raw_entry: String,
}

/// One successfully extracted line. Each variant carries only its own fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogRecord {
    RequestBasic(RequestRecord),
    RequestExtended(ExtendedRequestRecord),
    AppStructured(AppRecord),
}

impl LogRecord {
    pub fn format(&self) -> LogFormat {
        match self {
            LogRecord::RequestBasic(_) => LogFormat::Apache,
            LogRecord::RequestExtended(_) => LogFormat::Nginx,
            LogRecord::AppStructured(_) => LogFormat::App,
        }
    }

    pub fn raw_entry(&self) -> &str {
        match self {
            LogRecord::RequestBasic(r) => &r.raw_entry,
            LogRecord::RequestExtended(r) => &r.request.raw_entry,
            LogRecord::AppStructured(r) => &r.raw_entry,
        }
    }

    pub fn timestamp(&self) -> &Timestamp {
        match self {
            LogRecord::RequestBasic(r) => &r.timestamp,
            LogRecord::RequestExtended(r) => &r.request.timestamp,
            LogRecord::AppStructured(r) => &r.timestamp,
        }
    }

    /// Request fields, for either request-style variant.
    pub fn request(&self) -> Option<&RequestRecord> {
        match self {
            LogRecord::RequestBasic(r) => Some(r),
            LogRecord::RequestExtended(r) => Some(&r.request),
            LogRecord::AppStructured(_) => None,
        }
    }

    pub fn app(&self) -> Option<&AppRecord> {
        match self {
            LogRecord::AppStructured(r) => Some(r),
            _ => None,
        }
    }

    /// Flattened (column, value) pairs in the same order as the JSON export.
    pub fn columns(&self) -> Vec<(&'static str, String)> {
        match self {
            LogRecord::RequestBasic(r) => request_columns(r),
            LogRecord::RequestExtended(r) => {
                let mut cols = request_columns(&r.request);
                cols.push(("referrer", r.referrer.clone()));
                cols.push(("client_agent", r.client_agent.clone()));
                cols
            }
            LogRecord::AppStructured(r) => vec![
                ("timestamp", r.timestamp.to_string()),
                ("severity_level", r.severity_level.clone()),
                ("module_name", r.module_name.clone()),
                ("message", r.message.clone()),
                ("raw_entry", r.raw_entry.clone()),
            ],
        }
    }
}

fn request_columns(r: &RequestRecord) -> Vec<(&'static str, String)> {
    vec![
        ("source_address", r.source_address.clone()),
        ("timestamp", r.timestamp.to_string()),
        ("http_method", r.http_method.clone()),
        ("path", r.path.clone()),
        ("protocol_version", r.protocol_version.clone()),
        ("status_code", r.status_code.to_string()),
        ("bytes_sent", r.bytes_sent.to_string()),
        ("raw_entry", r.raw_entry.clone()),
    ]
}
