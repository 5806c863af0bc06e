//! Lenient numeric parsing for form inputs.
//!
//! # Invariants
//! - Parsing never fails: anything without a leading number reads as 0.
//! - Only the leading numeric prefix is used (`"12.5 kg"` -> 12.5).
//! - Non-finite results read as 0.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex")
});

/// Parses the leading number of `raw`, or returns 0.
pub fn parse_numeric_input(raw: &str) -> f64 {
    LEADING_NUMBER_RE
        .find(raw.trim_start())
        .and_then(|matched| matched.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::parse_numeric_input;

    #[test]
    fn parses_plain_and_prefixed_numbers() {
        assert_eq!(parse_numeric_input("42"), 42.0);
        assert_eq!(parse_numeric_input("  12.5 kg"), 12.5);
        assert_eq!(parse_numeric_input("-3"), -3.0);
        assert_eq!(parse_numeric_input(".5"), 0.5);
        assert_eq!(parse_numeric_input("1e3 units"), 1000.0);
    }

    #[test]
    fn garbage_reads_as_zero() {
        assert_eq!(parse_numeric_input(""), 0.0);
        assert_eq!(parse_numeric_input("abc"), 0.0);
        assert_eq!(parse_numeric_input("kg 12"), 0.0);
        assert_eq!(parse_numeric_input("1e999"), 0.0);
    }

    #[test]
    fn stops_at_first_non_numeric_character() {
        assert_eq!(parse_numeric_input("12,5"), 12.0);
        assert_eq!(parse_numeric_input("7%"), 7.0);
    }
}
