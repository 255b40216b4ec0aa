//! Configuration module for reveal-toggle
//!
//! Manages the toggle selectors, UI and logging settings.
//! Configuration is stored in `~/.config/.reveal-toggle/config.toml`, or in
//! the directory named by `REVEAL_TOGGLE_CONFIG_DIR` when set.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::visibility::{ICON_EYE, ICON_EYE_SLASH, IconClasses};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV_VAR: &str = "REVEAL_TOGGLE_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub toggle: ToggleSettings,
    pub ui: UiSettings,
    pub logging: LogSettings,
}

/// Which elements the toggle binds to and which icon classes it swaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleSettings {
    /// Selector of the clickable control
    pub control_selector: String,

    /// Selector of the password input
    pub field_selector: String,

    /// Icon class shown while the password is visible
    pub revealed_class: String,

    /// Icon class shown while the password is masked
    pub masked_class: String,
}

impl Default for ToggleSettings {
    fn default() -> Self {
        Self {
            control_selector: "#togglePassword".into(),
            field_selector: r#"input[name="password"]"#.into(),
            revealed_class: ICON_EYE.into(),
            masked_class: ICON_EYE_SLASH.into(),
        }
    }
}

impl ToggleSettings {
    /// The icon class pair, rejected unless the two names are distinct
    /// single class tokens.
    pub fn icon_classes(&self) -> Result<IconClasses> {
        for (key, class) in [
            ("revealed_class", &self.revealed_class),
            ("masked_class", &self.masked_class),
        ] {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                bail!("Invalid {} '{}': expected a single class name", key, class);
            }
        }
        if self.revealed_class == self.masked_class {
            bail!(
                "revealed_class and masked_class must differ (both are '{}')",
                self.revealed_class
            );
        }

        Ok(IconClasses {
            revealed: self.revealed_class.clone(),
            masked: self.masked_class.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Character drawn for each masked password character
    pub mask_char: char,

    /// Start the sign-in form with the password visible
    pub start_revealed: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            mask_char: '*',
            start_revealed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub enabled: bool,

    /// Default filter directive when RUST_LOG is not set
    pub level: String,

    /// Log file name, relative to the config directory
    pub file: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".into(),
            file: "reveal-toggle.log".into(),
        }
    }
}

impl Config {
    /// Load configuration from the config directory
    /// Creates default config if it doesn't exist
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: Config = toml::from_str(&content).unwrap_or_else(|e| {
                // Logging is not set up yet when the config loads
                eprintln!(
                    "Warning: Failed to parse config.toml: {}. Using defaults.",
                    e
                );
                Config::default()
            });
            Ok(config)
        } else {
            // Create default config file for user reference
            let config = Config::default();
            config.save(config_dir)?;
            Ok(config)
        }
    }

    /// Save configuration to the config directory
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;
        let config_path = config_dir.join(CONFIG_FILE);
        let content = Self::generate_config_with_comments(self)?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(())
    }

    /// Generate TOML content with helpful comments
    fn generate_config_with_comments(config: &Config) -> Result<String> {
        let toml_content = toml::to_string_pretty(config)?;

        let header = r#"# Reveal-Toggle Configuration
#
# [toggle] selects the control and the password input the toggle binds to,
# and the two icon classes swapped on each click.
# [ui] tunes the terminal sign-in form.
# [logging] writes to a file next to this one; RUST_LOG overrides `level`.

"#;

        Ok(format!("{}{}", header, toml_content))
    }

    /// Get the config directory path
    pub fn get_config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV_VAR)
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        let base_dirs = directories::BaseDirs::new()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine user directories"))?;

        #[cfg(unix)]
        let sub_dir = ".reveal-toggle";
        #[cfg(not(unix))]
        let sub_dir = "reveal-toggle";

        Ok(base_dirs.config_dir().join(sub_dir))
    }

    pub fn config_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }
}
