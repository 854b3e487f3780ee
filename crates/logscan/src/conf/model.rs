//! Model — ScanConfig and related types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::DEFAULT_TOP_N;
use crate::parser::LogFormat;

/// Filter used until the config is loaded, and when it names none.
pub const DEFAULT_LOG_FILTER: &str = "logscan=warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Format to use instead of detection
    pub format: Option<LogFormat>,
    /// Cap on non-blank lines read (0 or unset reads everything)
    pub max_lines: Option<usize>,
    /// Entries kept in each top-N ranking
    pub top_n: usize,
    /// tracing EnvFilter directive, used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            format: None,
            max_lines: None,
            top_n: DEFAULT_TOP_N,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ScanConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be > 0".to_string()));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.format, None);
        assert_eq!(config.max_lines, None);
        assert_eq!(config.top_n, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_top_n() {
        let config = ScanConfig {
            top_n: 0,
            ..ScanConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("top_n"));
    }

    #[test]
    fn test_validate_blank_log_filter() {
        let config = ScanConfig {
            log_filter: "  ".to_string(),
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_toml_keeps_defaults() {
        let config: ScanConfig = toml::from_str("format = \"nginx\"\nmax_lines = 500\n").unwrap();
        assert_eq!(config.format, Some(LogFormat::Nginx));
        assert_eq!(config.max_lines, Some(500));
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn test_deserialize_format_alias() {
        let config: ScanConfig = toml::from_str("format = \"app-structured\"").unwrap();
        assert_eq!(config.format, Some(LogFormat::App));
    }

    #[test]
    fn test_deserialize_unknown_format_fails() {
        assert!(toml::from_str::<ScanConfig>("format = \"syslog\"").is_err());
    }
}
