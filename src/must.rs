//! Parsers that panic instead of returning an error.
//!
//! These are for setup code and tests that parse string literals known to be
//! valid. Never use them on user input.

use crate::{Clock, Date};

/// As [`crate::parse_iso`], panicking if `value` cannot be parsed.
///
/// # Panics
/// If `value` is not an ISO 8601 date.
#[track_caller]
pub fn parse_iso(value: &str) -> Date {
    crate::parse_iso(value).unwrap_or_else(|e| panic!("{e}"))
}

/// As [`crate::auto_parse`], panicking if `value` cannot be parsed.
///
/// # Panics
/// If `value` is not a date in any supported layout.
#[track_caller]
pub fn auto_parse(value: &str) -> Date {
    crate::auto_parse(value).unwrap_or_else(|e| panic!("{e}"))
}

/// As [`crate::auto_parse_us`], panicking if `value` cannot be parsed.
///
/// # Panics
/// If `value` is not a date in any supported layout.
#[track_caller]
pub fn auto_parse_us(value: &str) -> Date {
    crate::auto_parse_us(value).unwrap_or_else(|e| panic!("{e}"))
}

/// As [`crate::parse_clock`], panicking if `value` cannot be parsed.
///
/// # Panics
/// If `value` is not a time of day.
#[track_caller]
pub fn parse_clock(value: &str) -> Clock {
    crate::parse_clock(value).unwrap_or_else(|e| panic!("{e}"))
}
