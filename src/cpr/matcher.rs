//! CPR candidate matching.
// Allow expect() on the static regex pattern - it is a constant and guaranteed to compile
#![allow(clippy::expect_used)]
//!
//! Finds substrings shaped like a CPR number: a `DDMMYY` date segment whose
//! day/month/year separators agree, a short gap, and a 4-digit serial.
//!
//! The `regex` crate has no backreferences or lookbehind, so the
//! "same separator twice" rule is spelled out as an alternation and the
//! "not preceded by a digit" rule is checked by [`Candidates`] itself.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Number of digits in a CPR number.
pub const CPR_DIGITS: usize = 10;

// ASCII whitespace only (tab, LF, VT, FF, CR, space).
const WS: &str = r"[\t\n\x0B\x0C\r ]";

static CPR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let date = r"[0-9]{2}(?: [0-9]{2} |/[0-9]{2}/|\.[0-9]{2}\.|-[0-9]{2}-|[0-9]{2})[0-9]{2}";
    let gap = format!(r"(?:{WS}{{0,2}}[/.\-]{WS}{{0,2}}|{WS}{{0,2}})");
    Regex::new(&format!(r"{date}{gap}[0-9]{{4}}\b")).expect("static regex: CPR pattern")
});

/// The ten digits of a candidate with all separators stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitStream([u8; CPR_DIGITS]);

impl DigitStream {
    /// Builds a digit stream from a literal, ignoring every non-digit.
    ///
    /// Returns `None` unless the literal holds exactly ten ASCII digits.
    #[must_use]
    pub fn from_literal(literal: &str) -> Option<Self> {
        let mut digits = [0u8; CPR_DIGITS];
        let mut count = 0;

        for b in literal.bytes().filter(u8::is_ascii_digit) {
            if count == CPR_DIGITS {
                return None;
            }
            digits[count] = b - b'0';
            count += 1;
        }

        (count == CPR_DIGITS).then_some(Self(digits))
    }

    /// Returns the digit at `index` (0-9) as a number.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 10 or more.
    #[must_use]
    pub(crate) const fn digit(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Returns the two-digit number starting at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 9 or more.
    #[must_use]
    pub(crate) const fn pair(&self, index: usize) -> u32 {
        self.0[index] as u32 * 10 + self.0[index + 1] as u32
    }

    /// Returns all ten digits.
    #[must_use]
    pub const fn as_array(&self) -> &[u8; CPR_DIGITS] {
        &self.0
    }
}

impl fmt::Display for DigitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// A substring matched by the CPR grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'t> {
    literal: &'t str,
    start: usize,
}

impl<'t> Candidate<'t> {
    /// The matched text, separators included.
    #[must_use]
    pub const fn literal(&self) -> &'t str {
        self.literal
    }

    /// Byte offset of the match in the scanned text.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the end of the match.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.literal.len()
    }

    /// The digit stream of the literal.
    ///
    /// Always `Some` for candidates produced by [`candidates`].
    #[must_use]
    pub fn digits(&self) -> Option<DigitStream> {
        DigitStream::from_literal(self.literal)
    }
}

/// Lazy iterator over the CPR candidates of a text.
///
/// Yields non-overlapping candidates from left to right.
#[derive(Debug, Clone)]
pub struct Candidates<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for Candidates<'t> {
    type Item = Candidate<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos <= self.text.len() {
            let m = CPR_REGEX.find_at(self.text, self.pos)?;

            if preceded_by_digit(self.text, m.start()) {
                // Matches always start with an ASCII digit, so one byte on is a char boundary.
                self.pos = m.start() + 1;
                continue;
            }

            self.pos = m.end();
            return Some(Candidate {
                literal: m.as_str(),
                start: m.start(),
            });
        }
        None
    }
}

impl std::iter::FusedIterator for Candidates<'_> {}

/// Returns the CPR candidates in `text`.
///
/// The iterator is lazy; call again to restart the scan.
#[must_use]
pub const fn candidates(text: &str) -> Candidates<'_> {
    Candidates { text, pos: 0 }
}

fn preceded_by_digit(text: &str, start: usize) -> bool {
    text.as_bytes()[..start]
        .last()
        .is_some_and(u8::is_ascii_digit)
}
