//! Field value parsing shared by the record builders
//!
//! Numbers are read leniently: anything that does not yield a finite,
//! non-negative value becomes 0. Employee ids are strict.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse a numeric field, defaulting to 0
///
/// Reads the longest numeric prefix, so `"15.00 "` and `"7.5h"` both
/// parse. Blank, non-numeric, negative and non-finite values give 0.
pub fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .or_else(|| numeric_prefix(trimmed).parse::<f64>().ok())
        .unwrap_or(0.0);

    // `-0` compares equal to zero but would print as `-0`
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Longest prefix of the form `[+-]digits[.digits][e[+-]digits]`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Round to two decimal places, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// An employee identifier as found in an export
///
/// Keeps the trimmed source text alongside the integer used in the
/// ledger. The number is read from the leading digits, so `"00042"` and
/// `"42.0"` are both employee 42.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeId {
    raw: String,
    number: u64,
}

impl EmployeeId {
    /// Parse a trimmed id; `None` when it has no leading digits
    ///
    /// Text after the leading digits is ignored, so `"42abc"` is 42.
    pub fn parse(s: &str) -> Option<Self> {
        let raw = s.trim();
        let digits: &str = &raw[..raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len())];

        if digits.is_empty() {
            return None;
        }

        // All-digit ids too long for u64 are rejected rather than wrapped
        let number = digits.parse::<u64>().ok()?;
        Some(Self {
            raw: raw.to_string(),
            number,
        })
    }

    /// Source text of the id
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Integer value used in ledger output
    pub fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
