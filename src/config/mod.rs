//! Configuration management.

mod filter;

pub use filter::{DEFAULT_PLACEHOLDER, FilterConfig, MAX_PLACEHOLDER_CHARS};

use serde::Deserialize;
use std::path::Path;

/// Application name used for config directories.
const APP_NAME: &str = "cpr-redact";

/// Main configuration for the `cpr-redact` host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// CPR filter settings.
    pub filter: FilterConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Output format: "pretty" or "json".
    pub format: Option<String>,
    /// Filter directive, e.g. `cpr_redact=debug`.
    pub level: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Filter section.
    pub filter: Option<ConfigFileFilter>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// Filter section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileFilter {
    /// Enable the modulus 11 check.
    pub modulus11_check: Option<bool>,
    /// Enable the birth-date check.
    pub date_check: Option<bool>,
    /// Approve every dashed candidate.
    pub replace_all_dash: Option<bool>,
    /// Placeholder text.
    pub dummy_value: Option<String>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileLogging {
    /// Output format.
    pub format: Option<String>,
    /// Filter directive.
    pub level: Option<String>,
}

impl AppConfig {
    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema or the
    /// resulting filter settings are invalid.
    pub fn from_toml_str(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let config = Self::from_config_file(file);
        config.filter.validate()?;
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/cpr-redact/` on macOS)
    /// 2. XDG config dir (`~/.config/cpr-redact/` for Unix compatibility)
    ///
    /// Returns default configuration if no usable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join(APP_NAME).join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join(APP_NAME)
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                },
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `AppConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(filter) = file.filter {
            if let Some(v) = filter.modulus11_check {
                config.filter.enable_checksum_validation = v;
            }
            if let Some(v) = filter.date_check {
                config.filter.enable_date_validation = v;
            }
            if let Some(v) = filter.replace_all_dash {
                config.filter.replace_all_dashed = v;
            }
            if let Some(v) = filter.dummy_value {
                config.filter.placeholder = v;
            }
        }
        if let Some(logging) = file.logging {
            config.logging.format = logging.format;
            config.logging.level = logging.level;
        }

        config
    }

    /// Replaces the filter settings.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}
