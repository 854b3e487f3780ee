//! Boot — logging init and config load.
//!
//! Logging comes up first so config warnings are visible; the config's
//! `log_filter` is swapped in once the config is known.

use std::path::Path;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

use crate::conf::{ConfigError, ScanConfig};

/// Handle for replacing the active filter after boot.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Initialise the tracing / logging subsystem.
///
/// `RUST_LOG` wins over `default_filter`. Output goes to stderr so stdout
/// only carries results.
pub fn init_logging(default_filter: &str) -> FilterHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let (subscriber, handle) = subscriber(filter, std::io::stderr);
    subscriber.init();
    handle
}

/// Apply the configured filter unless `RUST_LOG` already chose one.
pub fn apply_log_filter(handle: &FilterHandle, filter: &str) {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return;
    }
    if let Err(e) = handle.reload(EnvFilter::new(filter)) {
        tracing::warn!(error = %e, "boot: could not apply log_filter");
    }
}

fn subscriber<W>(filter: EnvFilter, writer: W) -> (impl tracing::Subscriber + Send + Sync + 'static, FilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false));
    (subscriber, handle)
}

/// Load the config file named on the command line, or the default location.
pub fn load_config(explicit: Option<&Path>) -> Result<ScanConfig, ConfigError> {
    match explicit {
        Some(path) => ScanConfig::load_from(path),
        None => ScanConfig::load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn bad_max_lines(key: &str) -> Option<String> {
        (key == "LOGSCAN_MAX_LINES").then(|| "lots".to_string())
    }

    #[test]
    fn test_config_warnings_reach_the_log() {
        let out = Captured::default();
        let sink = out.clone();
        let (subscriber, _handle) = subscriber(EnvFilter::new("logscan=warn"), move || sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut config = ScanConfig::default();
            config.apply_overrides(bad_max_lines).unwrap();
            assert_eq!(config.max_lines, None);
        });

        assert!(out.text().contains("Ignoring invalid LOGSCAN_MAX_LINES=lots"));
    }

    #[test]
    fn test_reloaded_filter_takes_effect() {
        let out = Captured::default();
        let sink = out.clone();
        let (subscriber, handle) = subscriber(EnvFilter::new("logscan=warn"), move || sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            handle.reload(EnvFilter::new("logscan=error")).unwrap();
            ScanConfig::default().apply_overrides(bad_max_lines).unwrap();
        });

        assert!(!out.text().contains("Ignoring invalid"));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_n = 4").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.top_n, 4);
    }

    #[test]
    fn test_load_config_explicit_path_missing() {
        let err = load_config(Some(Path::new("/no/such/logscan.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
