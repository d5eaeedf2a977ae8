//! Structured logging for Homestead via the `tracing` ecosystem.
//!
//! Console output carries uptime timestamps, targets and thread names (the
//! chunk workers are named). A JSON copy can go to a file for post-mortem
//! analysis. The level comes from `RUST_LOG`, then the config, then `info`.

use std::path::{Path, PathBuf};

use homestead_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing_subscriber::util::TryInitError;

/// Name of the JSON log file inside the log directory.
pub const LOG_FILE_NAME: &str = "homestead.log";

/// Filter used when neither `RUST_LOG` nor the config sets a level.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the global tracing subscriber.
///
/// File logging is enabled when `log_dir` is given and either
/// `debug_build` is set or the config asks for it. Returns the path of the
/// log file when one was opened; a file that cannot be created only loses
/// the file copy, never console output.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use homestead_config::Config;
/// use homestead_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config)).unwrap();
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<Option<PathBuf>, TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let wants_file = debug_build || config.is_some_and(|c| c.debug.log_to_file);
    let log_path = log_dir.filter(|_| wants_file).and_then(|dir| {
        std::fs::create_dir_all(dir).ok()?;
        let path = dir.join(LOG_FILE_NAME);
        std::fs::File::create(&path).ok().map(|file| (path, file))
    });

    if let Some((path, log_file)) = log_path {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).try_init()?;
        return Ok(Some(path));
    }

    subscriber.try_init()?;
    Ok(None)
}

/// Filter directive from the config's `log_level`, or [`DEFAULT_FILTER`]
/// when unset or blank.
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert_eq!(format!("{filter}"), "info");
    }

    #[test]
    fn test_directive_without_config() {
        assert_eq!(filter_directive(None), "info");
    }

    #[test]
    fn test_directive_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,homestead_terrain=trace".to_string();
        assert_eq!(filter_directive(Some(&config)), "debug,homestead_terrain=trace");
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_filters_parse() {
        let valid_filters = [
            "info",
            "debug,homestead_world=trace",
            "warn,homestead_terrain=debug,homestead_mesh=trace",
            "error",
        ];
        for filter_str in valid_filters {
            assert!(EnvFilter::try_new(filter_str).is_ok(), "Failed to parse filter: {filter_str}");
        }
    }

    #[test]
    fn test_log_file_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join(LOG_FILE_NAME);
        std::fs::File::create(&log_file_path).unwrap();
        assert_eq!(log_file_path.file_name().unwrap(), "homestead.log");
    }
}
