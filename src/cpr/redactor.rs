//! CPR redaction.
//!
//! Replaces approved CPR numbers in a text with the configured placeholder.
//!
//! Replacement is keyed by literal text, not by position: once a matched
//! substring is approved, every occurrence of that exact substring in the
//! document is replaced.

use super::matcher::candidates;
use super::validator::Policy;
use crate::config::FilterConfig;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::Serialize;
use std::collections::HashSet;

/// Result of redacting a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedactionOutcome {
    /// The redacted text.
    pub text: String,
    /// Summary of what changed.
    pub summary: RedactionSummary,
}

/// Counts describing a redaction pass.
///
/// Holds no identifiers, so it is safe to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RedactionSummary {
    /// Candidates produced by the matcher.
    pub candidates: usize,
    /// Distinct literals approved for replacement.
    pub approved: usize,
    /// Occurrences substituted in the text.
    pub replaced: usize,
}

impl RedactionSummary {
    /// Checks whether the text was changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.replaced > 0
    }
}

/// Redacts CPR numbers from text.
#[derive(Debug, Clone)]
pub struct Redactor {
    config: FilterConfig,
    policy: Policy,
}

impl Redactor {
    /// Creates a redactor with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FilterConfig::default())
    }

    /// Creates a redactor with a custom configuration.
    #[must_use]
    pub fn with_config(config: FilterConfig) -> Self {
        let policy = Policy::from_config(&config);
        Self { config, policy }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Returns the validation policy.
    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Returns the distinct approved literals in `text`, in first-seen order.
    #[must_use]
    pub fn approved_literals<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.scan(text).0
    }

    /// Checks if `text` contains anything that would be redacted.
    #[must_use]
    pub fn needs_redaction(&self, text: &str) -> bool {
        candidates(text).any(|c| self.policy.approves(c.literal()))
    }

    /// Redacts approved CPR numbers, returning the redacted text.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        self.redact_with_outcome(text).text
    }

    /// Returns the redacted text and a flag indicating if anything was redacted.
    #[must_use]
    pub fn redact_with_flag(&self, text: &str) -> (String, bool) {
        let outcome = self.redact_with_outcome(text);
        let changed = outcome.summary.changed();
        (outcome.text, changed)
    }

    /// Redacts approved CPR numbers, returning the text and a summary.
    #[must_use]
    pub fn redact_with_outcome(&self, text: &str) -> RedactionOutcome {
        let (approved, candidate_count) = self.scan(text);

        let (redacted, replaced) = replace_literals(text, &approved, &self.config.placeholder);

        let summary = RedactionSummary {
            candidates: candidate_count,
            approved: approved.len(),
            replaced,
        };

        tracing::debug!(
            candidates = summary.candidates,
            approved = summary.approved,
            replaced = summary.replaced,
            "cpr redaction pass"
        );

        RedactionOutcome {
            text: redacted,
            summary,
        }
    }

    /// Runs the matcher and policy, returning the replacement set and the
    /// number of candidates seen.
    fn scan<'t>(&self, text: &'t str) -> (Vec<&'t str>, usize) {
        let mut approved: Vec<&'t str> = Vec::new();
        let mut evaluated: HashSet<&'t str> = HashSet::new();
        let mut seen = 0;

        for candidate in candidates(text) {
            seen += 1;
            let literal = candidate.literal();
            if !evaluated.insert(literal) {
                continue;
            }
            if let Some(rule) = self.policy.verdict(literal) {
                tracing::trace!(rule = %rule, offset = candidate.start(), "cpr candidate approved");
                approved.push(literal);
            }
        }

        (approved, seen)
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new()
    }
}

/// Redacts `text` with `config`.
#[must_use]
pub fn redact(text: &str, config: &FilterConfig) -> String {
    Redactor::with_config(config.clone()).redact(text)
}

/// Replaces every occurrence of each key with `placeholder` in a single
/// left-to-right pass.
///
/// Where keys overlap, the earliest occurrence wins and the longest key
/// wins at equal positions. Inserted placeholders are never rescanned.
fn replace_literals(text: &str, keys: &[&str], placeholder: &str) -> (String, usize) {
    if keys.is_empty() {
        return (text.to_string(), 0);
    }

    match replace_with_automaton(text, keys, placeholder) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, keys = keys.len(), "falling back to per-key replacement");
            replace_with_sweep(text, keys, placeholder)
        },
    }
}

/// Leftmost-longest multi-pattern substitution over one automaton.
fn replace_with_automaton(
    text: &str,
    keys: &[&str],
    placeholder: &str,
) -> crate::Result<(String, usize)> {
    let automaton = AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(keys)
        .map_err(|e| crate::Error::OperationFailed {
            operation: "build_literal_automaton".to_string(),
            cause: e.to_string(),
        })?;

    let mut result = String::with_capacity(text.len());
    let mut replaced = 0;
    automaton
        .try_replace_all_with(text, &mut result, |_, _, dst| {
            dst.push_str(placeholder);
            replaced += 1;
            true
        })
        .map_err(|e| crate::Error::OperationFailed {
            operation: "replace_literals".to_string(),
            cause: e.to_string(),
        })?;

    Ok((result, replaced))
}

/// Collects every key occurrence and sweeps them in order.
///
/// Same output as [`replace_with_automaton`], but searches once per key.
fn replace_with_sweep(text: &str, keys: &[&str], placeholder: &str) -> (String, usize) {
    let mut hits: Vec<(usize, usize)> = keys
        .iter()
        .flat_map(|key| text.match_indices(*key).map(|(start, m)| (start, m.len())))
        .collect();

    // Earliest first, longest first at the same position.
    hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut replaced = 0;

    for (start, len) in hits {
        if start < cursor {
            continue;
        }
        result.push_str(&text[cursor..start]);
        result.push_str(placeholder);
        cursor = start + len;
        replaced += 1;
    }
    result.push_str(&text[cursor..]);

    (result, replaced)
}
