//! Structured logging settings.

use crate::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "CPR_REDACT_LOG";

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "CPR_REDACT_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parses a format name, falling back to [`LogFormat::Pretty`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
}

impl LoggingConfig {
    /// Resolves logging settings.
    ///
    /// Environment variables win over the config file, which wins over the
    /// verbosity flag.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| settings.and_then(|s| s.format.clone()))
            .map_or(LogFormat::Pretty, |f| LogFormat::parse(&f));

        let directive = std::env::var(LOG_ENV)
            .ok()
            .or_else(|| settings.and_then(|s| s.level.clone()))
            .unwrap_or_else(|| default_directive(verbose).to_string());

        let filter = EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        Self { format, filter }
    }
}

const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}
