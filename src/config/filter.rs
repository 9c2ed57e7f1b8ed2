//! Filter settings for CPR redaction.

use serde::Serialize;

/// Default placeholder for redacted CPR numbers.
pub const DEFAULT_PLACEHOLDER: &str = "XXXXXX-XXXX";

/// Maximum placeholder length, in characters.
pub const MAX_PLACEHOLDER_CHARS: usize = 32;

/// Settings controlling which candidates are redacted and with what.
///
/// Serializes with the option names used in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterConfig {
    /// Approve candidates whose control digit passes the modulus 11 check.
    #[serde(rename = "modulus11_check")]
    pub enable_checksum_validation: bool,
    /// Approve candidates whose first six digits are a real birth date.
    #[serde(rename = "date_check")]
    pub enable_date_validation: bool,
    /// Approve every candidate containing a `-`.
    #[serde(rename = "replace_all_dash")]
    pub replace_all_dashed: bool,
    /// Replacement text.
    #[serde(rename = "dummy_value")]
    pub placeholder: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enable_checksum_validation: true,
            enable_date_validation: true,
            replace_all_dashed: true,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl FilterConfig {
    /// Creates a config with every rule enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config with every rule disabled.
    #[must_use]
    pub fn none() -> Self {
        Self {
            enable_checksum_validation: false,
            enable_date_validation: false,
            replace_all_dashed: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    /// Disables the modulus 11 check.
    #[must_use]
    pub const fn without_checksum(mut self) -> Self {
        self.enable_checksum_validation = false;
        self
    }

    /// Disables the birth-date check.
    #[must_use]
    pub const fn without_date_check(mut self) -> Self {
        self.enable_date_validation = false;
        self
    }

    /// Disables blanket approval of dashed candidates.
    #[must_use]
    pub const fn without_dash_blanket(mut self) -> Self {
        self.replace_all_dashed = false;
        self
    }

    /// Sets a custom placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Checks the settings a host accepts from users.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] if the placeholder is longer
    /// than [`MAX_PLACEHOLDER_CHARS`] characters.
    pub fn validate(&self) -> crate::Result<()> {
        let len = self.placeholder.chars().count();
        if len > MAX_PLACEHOLDER_CHARS {
            return Err(crate::Error::InvalidInput(format!(
                "dummy_value is {len} characters, maximum is {MAX_PLACEHOLDER_CHARS}"
            )));
        }
        Ok(())
    }
}
