//! CPR number detection and redaction.
//!
//! Finds Danish personal identification numbers (CPR numbers) in text,
//! validates them, and replaces the approved ones with a placeholder.

mod matcher;
mod redactor;
mod validator;

pub use matcher::{CPR_DIGITS, Candidate, Candidates, DigitStream, candidates};
pub use redactor::{RedactionOutcome, RedactionSummary, Redactor, redact};
pub use validator::{
    CHECKSUM_WEIGHTS, Policy, Rule, birth_date, birth_year, checksum_valid, control_digit,
    date_valid,
};
