//! Load — config loading from file and environment variables.

use std::fs;
use std::path::Path;

use super::model::{ConfigError, ScanConfig};

pub const CONFIG_FILE_ENV: &str = "LOGSCAN_CONFIG_FILE";
pub const DEFAULT_CONFIG_FILE: &str = "logscan.toml";

impl ScanConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// A missing default config file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var(CONFIG_FILE_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicitly named file, which must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Environment variables override file config
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `LOGSCAN_*` overrides from `lookup`.
    ///
    /// Unparsable numbers are ignored; an unknown format name is an error.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup("LOGSCAN_FORMAT") {
            let format = format
                .parse::<crate::parser::LogFormat>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            self.format = Some(format);
        }

        if let Some(max_str) = lookup("LOGSCAN_MAX_LINES") {
            match max_str.parse::<usize>() {
                Ok(max) => self.max_lines = Some(max),
                Err(_) => tracing::warn!("Ignoring invalid LOGSCAN_MAX_LINES={}", max_str),
            }
        }

        if let Some(top_str) = lookup("LOGSCAN_TOP_N") {
            match top_str.parse::<usize>() {
                Ok(top) => self.top_n = top,
                Err(_) => tracing::warn!("Ignoring invalid LOGSCAN_TOP_N={}", top_str),
            }
        }

        if let Some(filter) = lookup("LOGSCAN_LOG") {
            self.log_filter = filter;
        }

        Ok(())
    }
}
