use std::{iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Date, ParseError, RANGE_SEPARATOR, prelude::*};

/// An inclusive range of dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: Date,
    end:   Date,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: Date, end: Date },

    /// Error parsing a date.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: Date, end: Date) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The range holding a single date
    pub const fn day(date: Date) -> Self {
        Self { start: date, end: date }
    }

    /// Returns the first date of the range
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last date of the range (inclusive)
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Number of days in the range, counting both ends
    pub const fn len_days(&self) -> i64 {
        self.start.days_until(self.end) + 1
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Checks if this range has any date in common with another
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Iterates over every date of the range in order
    pub const fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            next: Some(self.start),
            end:  self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = Date;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> DateRangeIter {
        self.iter()
    }
}

/// Iterator over the dates of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: Option<Date>,
    end:  Date,
}

impl Iterator for DateRangeIter {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let current = self.next?;
        // Stepping by one day from a date before `end` cannot saturate.
        self.next = if current < self.end { Some(current + 1) } else { None };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map_or(0, |next| usize::try_from(next.days_until(self.end) + 1).unwrap_or(usize::MAX));
        (remaining, Some(remaining))
    }
}

impl FusedIterator for DateRangeIter {}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ISO 8601 interval notation: start and end joined by RANGE_SEPARATOR
        let Some((start_str, end_str)) = s.trim().split_once(RANGE_SEPARATOR) else {
            return Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            )));
        };
        if end_str.contains(RANGE_SEPARATOR) {
            let found = 1 + end_str.matches(RANGE_SEPARATOR).count();
            return Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {found}"
            )));
        }

        let start = start_str.trim().parse::<Date>()?;
        let end = end_str.trim().parse::<Date>()?;

        Self::new(start, end)
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    fn range(start: (i32, i32, i32), end: (i32, i32, i32)) -> DateRange {
        DateRange::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2))
            .expect("failed to construct range")
    }

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:          Date,
            end:            Date,
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          date(1990, 1, 1),
                end:            date(2000, 1, 1),
                should_succeed: true,
                description:    "valid range (start < end)",
            },
            TestCase {
                start:          date(2000, 1, 1),
                end:            date(1990, 1, 1),
                should_succeed: false,
                description:    "invalid range (start > end)",
            },
            TestCase {
                start:          date(2000, 1, 1),
                end:            date(2000, 1, 1),
                should_succeed: true,
                description:    "equal dates (start == end)",
            },
        ];

        for case in &cases {
            let range = DateRange::new(case.start, case.end);

            if case.should_succeed {
                assert!(range.is_ok(), "Expected success for: {}", case.description);
            } else {
                assert!(range.is_err(), "Expected failure for: {}", case.description);
            }
        }
    }

    #[test]
    fn test_accessors() {
        let r = range((1990, 6, 15), (2000, 12, 31));
        assert_eq!(r.start(), date(1990, 6, 15));
        assert_eq!(r.end(), date(2000, 12, 31));
        assert_eq!(DateRange::day(date(2000, 1, 1)).len_days(), 1);
    }

    #[test]
    fn test_contains() {
        let r = range((1990, 1, 1), (2000, 12, 31));

        assert!(r.contains(date(1990, 1, 1)));
        assert!(r.contains(date(2000, 12, 31)));
        assert!(r.contains(date(1995, 6, 1)));
        assert!(!r.contains(date(1989, 12, 31)));
        assert!(!r.contains(date(2001, 1, 1)));
    }

    #[test]
    fn test_overlaps() {
        let r1 = range((1990, 1, 1), (2000, 1, 1));
        let r2 = range((1995, 1, 1), (2005, 1, 1));
        let r3 = range((2010, 1, 1), (2020, 1, 1));
        let touching = range((2000, 1, 1), (2000, 6, 1));

        assert!(r1.overlaps(&r2));
        assert!(r2.overlaps(&r1));
        assert!(r1.overlaps(&touching));
        assert!(!r1.overlaps(&r3));
        assert!(!r3.overlaps(&r1));
    }

    #[test]
    fn test_is_within() {
        let outer = range((1990, 1, 1), (2000, 1, 1));
        let inner = range((1995, 1, 1), (1998, 1, 1));

        assert!(inner.is_within(&outer));
        assert!(!outer.is_within(&inner));
        assert!(outer.is_within(&outer));
    }

    #[test]
    fn test_len_days() {
        assert_eq!(range((2024, 1, 1), (2024, 12, 31)).len_days(), 366);
        assert_eq!(range((2023, 1, 1), (2023, 12, 31)).len_days(), 365);
        assert_eq!(range((-1, 12, 31), (1, 1, 1)).len_days(), 368);
    }

    #[test]
    fn test_iter() {
        let r = range((2023, 12, 30), (2024, 1, 2));
        let dates: Vec<Date> = r.iter().collect();
        assert_eq!(
            dates,
            vec![date(2023, 12, 30), date(2023, 12, 31), date(2024, 1, 1), date(2024, 1, 2)]
        );
        assert_eq!(r.iter().size_hint(), (4, Some(4)));
        assert_eq!(r.into_iter().count(), 4);

        let mut single = DateRange::day(Date::MAX).iter();
        assert_eq!(single.next(), Some(Date::MAX));
        assert_eq!(single.next(), None);
        assert_eq!(single.next(), None);
    }

    #[test]
    fn test_display() {
        let r = range((1990, 1, 1), (12345, 6, 7));
        assert_eq!(r.to_string(), "1990-01-01/+12345-06-07");
    }

    #[test]
    fn test_from_str() {
        let r: DateRange = "1990-01-01/2000-12-31".parse().unwrap();
        assert_eq!(r, range((1990, 1, 1), (2000, 12, 31)));

        let r: DateRange = " -0001-12-31 / 0001-01-01 ".parse().unwrap();
        assert_eq!(r, range((-1, 12, 31), (1, 1, 1)));

        let r: DateRange = "2006-217/2006-08-06".parse().unwrap();
        assert_eq!(r.len_days(), 2);
    }

    #[test]
    fn test_from_str_invalid_order() {
        let result = "2000-01-01/1990-01-01".parse::<DateRange>();
        assert!(matches!(result, Err(RangeError::InvalidRange { .. })));
    }

    #[test]
    fn test_from_str_bad_date() {
        let result = "2000-13-01/2001-01-01".parse::<DateRange>();
        assert!(matches!(result, Err(RangeError::ParseError(_))));
    }

    #[test]
    fn test_no_range_separator() {
        let result = "2000-01-01".parse::<DateRange>();
        assert!(matches!(result, Err(RangeError::InvalidFormat(_))));
    }

    #[test]
    fn test_too_many_range_separators() {
        let result = "2000-01-01/2001-01-01/2002-01-01".parse::<DateRange>();
        assert!(matches!(result, Err(RangeError::InvalidFormat(_))));
        assert!(result.unwrap_err().to_string().contains("Too many '/' separators"));

        let result = "2000-01-01/2001-01-01/2002-01-01/2003-01-01".parse::<DateRange>();
        assert!(result.unwrap_err().to_string().ends_with("expected 1, found 3"));
    }

    #[test]
    fn test_serde_string_format() {
        let r = range((1990, 1, 1), (2000, 12, 31));
        let json = serde_json::to_string(&r).expect("failed to serialize range to JSON");
        assert_eq!(json, r#""1990-01-01/2000-12-31""#);
        let parsed: DateRange = serde_json::from_str(&json).expect("failed to deserialize range from JSON");
        assert_eq!(parsed, r);

        let result: Result<DateRange, _> = serde_json::from_str(r#""2000-01-01/1990-01-01""#);
        assert!(result.is_err());
    }
}
