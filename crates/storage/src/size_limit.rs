//! Human-readable size limit parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use filekeeper_common::DEFAULT_SIZE_LIMIT;

/// Size unit short names, smallest first. A unit's index doubles as its
/// exponent: bytes = value * 1024^index.
pub const SIZE_UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// A byte count used as the upload size cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SizeLimit(u64);

impl SizeLimit {
    /// Wrap a raw byte count.
    pub fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// The limit in bytes.
    pub fn bytes(&self) -> u64 {
        self.0
    }

    /// Parse a human-readable size expression such as `"2MB"` or `"400kB"`.
    ///
    /// The unit table is scanned from largest to smallest and the first unit
    /// that occurs in the input, case-insensitively, wins; the unit's length
    /// is stripped from the end and the leading decimal digits of what
    /// remains become the value. An input with no recognizable unit is taken
    /// as a plain byte count.
    ///
    /// The parse is total: a missing numeric prefix yields zero and
    /// oversized values saturate. Range enforcement belongs to the caller.
    pub fn parse(input: &str) -> Self {
        let trimmed: &str = input.trim();
        for (exponent, unit) in SIZE_UNITS.iter().enumerate().rev() {
            if contains_ignore_case(trimmed, unit) {
                let cut: usize = trimmed.len().saturating_sub(unit.len());
                // get() keeps the cut on a char boundary for non-ASCII tails
                let prefix: &str = trimmed.get(..cut).unwrap_or(trimmed);
                let multiplier: u64 = 1024u64.saturating_pow(exponent as u32);
                return Self(leading_number(prefix).saturating_mul(multiplier));
            }
        }
        Self(leading_number(trimmed))
    }
}

impl Default for SizeLimit {
    /// 2MB, every pipeline's starting cap.
    fn default() -> Self {
        Self(DEFAULT_SIZE_LIMIT)
    }
}

impl FromStr for SizeLimit {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(input))
    }
}

impl From<u64> for SizeLimit {
    fn from(bytes: u64) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for SizeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Leading decimal digits of a trimmed prefix; zero when there are none.
fn leading_number(prefix: &str) -> u64 {
    let trimmed: &str = prefix.trim();
    let end: usize = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits: &str = &trimmed[..end];
    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_megabytes() {
        assert_eq!(SizeLimit::parse("2MB").bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_parse_kilobytes() {
        assert_eq!(SizeLimit::parse("400kB").bytes(), 400 * 1024);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(SizeLimit::parse("1tb").bytes(), 1024u64.pow(4));
        assert_eq!(SizeLimit::parse("3gb").bytes(), 3 * 1024u64.pow(3));
    }

    #[test]
    fn test_parse_plain_bytes() {
        assert_eq!(SizeLimit::parse("12B").bytes(), 12);
    }

    #[test]
    fn test_parse_without_unit_means_bytes() {
        assert_eq!(SizeLimit::parse("500").bytes(), 500);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        assert_eq!(SizeLimit::parse(" 2 MB ").bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_parse_missing_number_yields_zero() {
        assert_eq!(SizeLimit::parse("MB").bytes(), 0);
        assert_eq!(SizeLimit::parse("").bytes(), 0);
    }

    #[test]
    fn test_parse_ignores_trailing_garbage_after_digits() {
        assert_eq!(SizeLimit::parse("10x3MB").bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_parse_saturates_on_overflow() {
        assert_eq!(
            SizeLimit::parse("99999999999999999999999999").bytes(),
            u64::MAX
        );
    }

    #[test]
    fn test_default_is_two_megabytes() {
        assert_eq!(SizeLimit::default().bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_from_bytes_round_trip() {
        assert_eq!(SizeLimit::from_bytes(500).bytes(), 500);
        assert_eq!(SizeLimit::from(500u64).bytes(), 500);
    }
}
