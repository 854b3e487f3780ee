//! Conf module — scan configuration model and loading.

pub mod model;
pub mod load;

pub use model::{ConfigError, ScanConfig, DEFAULT_LOG_FILTER};
pub use load::{CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE};
