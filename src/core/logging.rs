//! File logging setup
//!
//! The TUI owns the terminal, so log output goes to a file in the config
//! directory. `RUST_LOG` takes precedence over the configured level.

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use crate::core::config::LogSettings;

/// Installs the global subscriber. Returns the log file path, or `None`
/// when logging is disabled.
///
/// Fails if a global subscriber is already installed.
pub fn init(settings: &LogSettings, config_dir: &Path) -> Result<Option<PathBuf>> {
    if !settings.enabled {
        return Ok(None);
    }

    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;
    let log_path = config_dir.join(&settings.file);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(env_filter(&settings.level)?)
        .with_writer(Mutex::new(log_file))
        .try_init()
        .map_err(|e| anyhow!("Unable to set up logging: {}", e))?;

    Ok(Some(log_path))
}

fn env_filter(level: &str) -> Result<EnvFilter> {
    let directive: Directive = level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", level))?;
    Ok(EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_disabled_logging_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let settings = LogSettings {
            enabled: false,
            ..Default::default()
        };

        assert_eq!(init(&settings, dir.path()).unwrap(), None);
        assert!(!dir.path().join(&settings.file).exists());
    }

    #[test]
    fn test_env_filter_levels() {
        assert!(env_filter("debug").is_ok());
        assert!(env_filter("reveal_toggle=trace").is_ok());
        assert!(env_filter("reveal_toggle=loud").is_err());
    }
}
