//! CPR validation rules.
//!
//! A candidate is approved for redaction when any enabled rule accepts it.
//! Rules are tried in a fixed order: the dash blanket rule first, then the
//! modulus 11 checksum, then the birth-date check.

use super::matcher::DigitStream;
use crate::config::FilterConfig;
use chrono::NaiveDate;

/// Weights applied to digits 0-8 by the modulus 11 check.
pub const CHECKSUM_WEIGHTS: [u32; 9] = [4, 3, 2, 7, 6, 5, 4, 3, 2];

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Any literal containing `-` is approved.
    DashBlanket,
    /// The control digit matches the modulus 11 checksum.
    Checksum,
    /// The first six digits form a real birth date.
    DateCheck,
}

impl Rule {
    /// Evaluation order.
    pub const ORDER: [Self; 3] = [Self::DashBlanket, Self::Checksum, Self::DateCheck];

    /// Returns the rule name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DashBlanket => "dash_blanket",
            Self::Checksum => "checksum",
            Self::DateCheck => "date_check",
        }
    }

    /// Checks whether this rule is switched on in `config`.
    #[must_use]
    pub const fn is_enabled(self, config: &FilterConfig) -> bool {
        match self {
            Self::DashBlanket => config.replace_all_dashed,
            Self::Checksum => config.enable_checksum_validation,
            Self::DateCheck => config.enable_date_validation,
        }
    }

    /// Applies the rule to a candidate literal and its digit stream.
    ///
    /// Rules other than [`Rule::DashBlanket`] reject when there is no digit stream.
    #[must_use]
    pub fn approves(self, literal: &str, digits: Option<&DigitStream>) -> bool {
        match self {
            Self::DashBlanket => literal.contains('-'),
            Self::Checksum => digits.is_some_and(checksum_valid),
            Self::DateCheck => digits.is_some_and(date_valid),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the control digit expected at position 9.
///
/// Returns `None` when the weighted sum leaves remainder 1, since no
/// single digit can satisfy the check.
#[must_use]
pub fn control_digit(digits: &DigitStream) -> Option<u8> {
    let sum: u32 = digits
        .as_array()
        .iter()
        .zip(CHECKSUM_WEIGHTS)
        .map(|(&d, w)| u32::from(d) * w)
        .sum();

    match 11 - sum % 11 {
        11 => Some(0),
        10 => None,
        expected => u8::try_from(expected).ok(),
    }
}

/// Modulus 11 check.
#[must_use]
pub fn checksum_valid(digits: &DigitStream) -> bool {
    control_digit(digits) == Some(digits.digit(9))
}

/// Resolves the full birth year from the two-digit year and the century
/// selector (the first serial digit).
#[must_use]
pub fn birth_year(digits: &DigitStream) -> Option<i32> {
    let year = i32::try_from(digits.pair(4)).ok()?;

    let century = match digits.digit(6) {
        0..=3 => 1900,
        4 if year > 36 => 1900,
        4 => 2000,
        5..=8 if year > 57 => 1800,
        5..=8 => 2000,
        9 if year > 37 => 1900,
        9 => 2000,
        _ => return None,
    };

    Some(century + year)
}

/// Resolves the birth date encoded in the digit stream, if it is a real
/// calendar date.
#[must_use]
pub fn birth_date(digits: &DigitStream) -> Option<NaiveDate> {
    let year = birth_year(digits)?;
    NaiveDate::from_ymd_opt(year, digits.pair(2), digits.pair(0))
}

/// Date plausibility check.
#[must_use]
pub fn date_valid(digits: &DigitStream) -> bool {
    birth_date(digits).is_some()
}

/// Ordered set of enabled rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    rules: Vec<Rule>,
}

impl Policy {
    /// Builds the policy from the rules enabled in `config`.
    #[must_use]
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            rules: Rule::ORDER
                .into_iter()
                .filter(|rule| rule.is_enabled(config))
                .collect(),
        }
    }

    /// The enabled rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the first rule that approves `literal`.
    #[must_use]
    pub fn verdict(&self, literal: &str) -> Option<Rule> {
        let digits = DigitStream::from_literal(literal);
        self.rules
            .iter()
            .copied()
            .find(|rule| rule.approves(literal, digits.as_ref()))
    }

    /// Checks whether any enabled rule approves `literal`.
    #[must_use]
    pub fn approves(&self, literal: &str) -> bool {
        self.verdict(literal).is_some()
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn stream(s: &str) -> DigitStream {
        DigitStream::from_literal(s).unwrap_or_else(|| panic!("not ten digits: {s}"))
    }

    #[test]
    fn test_control_digit() {
        // 0*4 + 1*3 + 0*2 + 2*7 + 0*6 + 3*5 + 1*4 + 2*3 + 3*2 = 48, 48 % 11 = 4
        assert_eq!(control_digit(&stream("0102031230")), Some(7));
        assert!(checksum_valid(&stream("0102031237")));
        assert!(!checksum_valid(&stream("0102031234")));
    }

    #[test]
    fn test_control_digit_remainder_zero() {
        // 1*7 + 2*2 = 11
        assert_eq!(control_digit(&stream("0001000200")), Some(0));
        assert!(checksum_valid(&stream("0001000200")));
    }

    #[test]
    fn test_control_digit_remainder_one() {
        // 4*3 = 12, 12 % 11 = 1
        let digits = stream("0000000400");
        assert_eq!(control_digit(&digits), None);
        assert!(!checksum_valid(&digits));
    }

    #[test_case("0102031234", 1903; "selector 0-3 is 1900s")]
    #[test_case("0101363000", 1936; "selector 3")]
    #[test_case("0101364000", 2036; "selector 4 low year")]
    #[test_case("0101374000", 1937; "selector 4 high year")]
    #[test_case("0101575000", 2057; "selector 5 low year")]
    #[test_case("0101588000", 1858; "selector 8 high year")]
    #[test_case("0101379000", 2037; "selector 9 low year")]
    #[test_case("0101389000", 1938; "selector 9 high year")]
    fn test_birth_year(digits: &str, expected: i32) {
        assert_eq!(birth_year(&stream(digits)), Some(expected));
    }

    #[test_case("0102031234", true; "first of february 1903")]
    #[test_case("3112991234", true; "new years eve 1999")]
    #[test_case("2902001234", false; "no leap day in 1900")]
    #[test_case("2902004234", true; "leap day 2000")]
    #[test_case("2902976234", false; "no leap day in 1897")]
    #[test_case("2902646234", true; "leap day 1864")]
    #[test_case("3104851234", false; "april has 30 days")]
    #[test_case("3213011235", false; "day 32")]
    #[test_case("0113011234", false; "month 13")]
    #[test_case("0001011234", false; "day zero")]
    fn test_date_valid(digits: &str, expected: bool) {
        assert_eq!(date_valid(&stream(digits)), expected);
    }

    #[test]
    fn test_dash_blanket_reads_literal() {
        assert!(Rule::DashBlanket.approves("999999-9999", None));
        assert!(!Rule::DashBlanket.approves("999999 9999", None));
    }

    #[test]
    fn test_digit_rules_need_stream() {
        assert!(!Rule::Checksum.approves("x", None));
        assert!(!Rule::DateCheck.approves("x", None));
    }

    #[test]
    fn test_policy_order_and_filtering() {
        assert_eq!(Policy::default().rules(), &Rule::ORDER);

        let config = FilterConfig::default().without_checksum();
        assert_eq!(
            Policy::from_config(&config).rules(),
            &[Rule::DashBlanket, Rule::DateCheck]
        );

        assert!(Policy::from_config(&FilterConfig::none()).rules().is_empty());
    }

    #[test]
    fn test_verdict_first_rule_wins() {
        let policy = Policy::default();

        // Valid checksum and valid date: checksum is tried first.
        assert_eq!(policy.verdict("1111111118"), Some(Rule::Checksum));
        // Dashed literal short-circuits even when the others would pass.
        assert_eq!(policy.verdict("111111-1118"), Some(Rule::DashBlanket));
        // Checksum fails, date passes.
        assert_eq!(policy.verdict("0102031234"), Some(Rule::DateCheck));
        // Nothing passes.
        assert_eq!(policy.verdict("1234567890"), None);
    }

    #[test]
    fn test_date_checked_when_checksum_fails() {
        let config = FilterConfig::default().without_dash_blanket();
        let policy = Policy::from_config(&config);
        assert!(!checksum_valid(&stream("010203-1234")));
        assert!(policy.approves("010203-1234"));
    }

    #[test]
    fn test_dash_only_policy() {
        let config = FilterConfig::default()
            .without_checksum()
            .without_date_check();
        let policy = Policy::from_config(&config);

        assert!(policy.approves("999999-9999"));
        assert!(!policy.approves("1111111118"));
    }

    #[test]
    fn test_no_rules_approve_nothing() {
        let policy = Policy::from_config(&FilterConfig::none());
        assert!(!policy.approves("111111-1118"));
        assert!(!policy.approves("0102031234"));
    }
}
