//! # cpr-redact
//!
//! Detects and redacts Danish personal identification numbers (CPR
//! numbers) in free-form text.
//!
//! A CPR number is a `DDMMYY` birth date followed by a 4-digit serial,
//! optionally separated by punctuation or whitespace. Candidates are found
//! by a strict grammar, approved by configurable rules (dash blanket,
//! modulus 11 checksum, birth-date plausibility), and replaced with a
//! placeholder.
//!
//! ## Example
//!
//! ```rust
//! use cpr_redact::{FilterConfig, Redactor};
//!
//! let redactor = Redactor::with_config(FilterConfig::default());
//! assert_eq!(redactor.redact("CPR: 010203-1234"), "CPR: XXXXXX-XXXX");
//! assert_eq!(redactor.redact("Order 12345"), "Order 12345");
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

pub mod config;
pub mod cpr;
pub mod observability;

pub use config::{AppConfig, FilterConfig};
pub use cpr::{
    Candidate, DigitStream, Policy, RedactionOutcome, RedactionSummary, Redactor, Rule, redact,
};

/// Error type for cpr-redact operations.
///
/// The redaction core never fails; these errors come from the host layers.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Filter settings fail validation (placeholder too long) |
/// | `OperationFailed` | Config file I/O or parse errors, logging init, CLI I/O |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for cpr-redact operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");
    }

    #[test]
    fn test_redactor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Redactor>();
    }
}
