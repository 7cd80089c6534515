//! Proleptic Gregorian dates stored as a single day count, plus a wall-clock
//! [`Clock`] type.
//!
//! A [`Date`] is a count of days since 1 January of year 1. Years use
//! astronomical numbering, so the year before 1 is 0 and earlier years are
//! negative. Dates are parsed from ISO 8601 text with [`parse_iso`], or from
//! common day/month/year layouts with [`auto_parse`] and [`auto_parse_us`].

#[macro_use]
mod logging;

mod auto;
pub mod civil;
mod clock;
mod consts;
mod iso;
mod marshal;
pub mod must;
mod prelude;
mod range;
mod types;

pub use auto::{Compose, DayFirst, MonthFirst, auto_parse, auto_parse_us, auto_parse_with};
pub use clock::{Clock, ClockParseError, parse as parse_clock};
pub use consts::*;
pub use iso::parse_iso;
pub use marshal::{DateRecord, DecodeError};
pub use range::{DateRange, DateRangeIter, RangeError};
pub use types::{InvalidMonth, Month, Weekday};

use crate::prelude::*;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A calendar date, held as the number of days since 0001-01-01.
///
/// Day 0 is Monday 1 January of year 1, and 1970-01-01 is day 719162.
/// Comparison and arithmetic act on the day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, From, Into)]
pub struct Date(i32);

/// A numeric field of a date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "ordinal")]
    Ordinal,
}

/// Why a single field of a date string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FieldError {
    #[display(fmt = "{_0} has wrong length")]
    WrongLength(Field),
    #[display(fmt = "invalid {_0}")]
    Invalid(Field),
}

/// Every field error found in one parse attempt, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub(crate) fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Blank input given to an auto-detecting parser.
    #[error("cannot parse a blank string")]
    Blank,

    /// The text does not have the shape of any supported layout.
    #[error("cannot parse {input:?}: {reason}")]
    Syntax { input: String, reason: &'static str },

    /// A `T` time designator is followed by something that is not a time.
    #[error("date-time {input:?}: not a time")]
    NotATime { input: String },

    /// One or more fields of a calendar date were rejected.
    #[error("cannot parse {input:?}: {errors}")]
    Fields { input: String, errors: FieldErrors },

    /// One or more fields of an ordinal date were rejected.
    #[error("cannot parse ordinal date {input:?}: {errors}")]
    OrdinalFields { input: String, errors: FieldErrors },
}

impl ParseError {
    /// The field errors, if this error was caused by malformed fields
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Fields { errors, .. } | Self::OrdinalFields { errors, .. } => Some(errors),
            Self::Blank | Self::Syntax { .. } | Self::NotATime { .. } => None,
        }
    }
}

impl Date {
    /// Monday 1 January, year 1
    pub const ZERO: Self = Self(0);
    /// Earliest representable date
    pub const MIN: Self = Self(i32::MIN);
    /// Latest representable date
    pub const MAX: Self = Self(i32::MAX);

    /// Creates the date for a year, month and day.
    ///
    /// Month and day may fall outside their usual ranges and carry into the
    /// neighbouring months and years: `Date::new(1000, 15, 0)` is 1001-02-28.
    /// Results beyond the representable range saturate at [`Date::MIN`] or
    /// [`Date::MAX`].
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self::saturating(civil::days_from_civil(
            i64::from(year),
            i64::from(month),
            i64::from(day),
        ))
    }

    /// Creates the date for a 1-based day of the year. Ordinals past the end of
    /// the year carry into the next.
    pub fn from_ordinal(year: i32, ordinal: i32) -> Self {
        Self::new(year, 1, ordinal)
    }

    /// Creates a date from its count of days since 0001-01-01
    pub const fn from_days(days: i32) -> Self {
        Self(days)
    }

    /// Days since 0001-01-01
    #[inline]
    pub const fn days_since_zero(self) -> i32 {
        self.0
    }

    pub(crate) fn saturating(days: i64) -> Self {
        Self(days.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    /// Returns the (year, month, day)
    pub fn ymd(self) -> (i32, Month, u8) {
        let (year, month, day) = civil::civil_from_days(i64::from(self.0));
        // An i32 day count is always within about 5.9 million years of year 1.
        (year as i32, Month::from_civil(month), day)
    }

    pub fn year(self) -> i32 {
        self.ymd().0
    }

    pub fn month(self) -> Month {
        self.ymd().1
    }

    pub fn day(self) -> u8 {
        self.ymd().2
    }

    pub const fn weekday(self) -> Weekday {
        civil::weekday_from_days(self.0 as i64)
    }

    /// 1-based day of the year, 1 to 366
    pub fn year_day(self) -> u16 {
        let (year, month, day) = civil::civil_from_days(i64::from(self.0));
        civil::year_day(year, month, day)
    }

    /// Whether this date falls in a leap year
    pub fn is_leap(self) -> bool {
        civil::is_leap_year(i64::from(self.year()))
    }

    /// The date `days` later (earlier when negative), saturating at the ends
    /// of the representable range.
    pub fn add_days(self, days: i32) -> Self {
        Self(self.0.saturating_add(days))
    }

    /// Adds years, months and days to the civil fields and normalises the
    /// result, so `1000-01-01` plus `(0, 14, -1)` is `1001-02-28`.
    pub fn add_date(self, years: i32, months: i32, days: i32) -> Self {
        let (year, month, day) = civil::civil_from_days(i64::from(self.0));
        Self::saturating(civil::days_from_civil(
            year + i64::from(years),
            i64::from(month) + i64::from(months),
            i64::from(day) + i64::from(days),
        ))
    }

    /// Days from `self` to `other`; negative when `other` is earlier
    pub const fn days_until(self, other: Self) -> i64 {
        other.0 as i64 - self.0 as i64
    }

    /// Formats as ISO 8601 `±YYYY-MM-DD` with at least `year_digits` year digits.
    ///
    /// Negative years always carry a `-`. A `+` is written for years above
    /// 9999 and whenever more than four year digits are requested, as ISO 8601
    /// requires for expanded years.
    pub fn format_iso(self, year_digits: usize) -> String {
        let (year, month, day) = self.ymd();
        format!(
            "{}{:0width$}-{:02}-{:02}",
            year_sign(year, year_digits),
            year.unsigned_abs(),
            month.number(),
            day,
            width = year_digits
        )
    }
}

const fn year_sign(year: i32, year_digits: usize) -> &'static str {
    if year < 0 {
        "-"
    } else if year > 9999 || year_digits > 4 {
        "+"
    } else {
        ""
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.ymd();
        write!(
            f,
            "{}{:04}-{:02}-{:02}",
            year_sign(year, 4),
            year.unsigned_abs(),
            month.number(),
            day
        )
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_iso(s)
    }
}

impl Add<i32> for Date {
    type Output = Self;

    fn add(self, days: i32) -> Self {
        self.add_days(days)
    }
}

impl Sub<i32> for Date {
    type Output = Self;

    fn sub(self, days: i32) -> Self {
        Self(self.0.saturating_sub(days))
    }
}

impl Sub for Date {
    type Output = i64;

    /// Days between two dates
    fn sub(self, other: Self) -> i64 {
        other.days_until(self)
    }
}
