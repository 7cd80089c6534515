use std::fmt;
use std::ops::{Add, Sub};
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{CLOCK_SEPARATOR, FRACTION_SEPARATOR};
use crate::iso::parse_digits;
use crate::prelude::*;

/// A wall-clock time of day, held as nanoseconds since midnight.
///
/// Values below zero or above 24 hours are allowed so that clock arithmetic
/// can run past midnight in either direction; [`Clock::mod_24`] brings a value
/// back into one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, From, Into)]
pub struct Clock(i64);

/// Error returned when a string is not a recognisable time of day.
///
/// The message names the source line of the check that failed, which tells
/// apart the many ways a clock string can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}:{}: cannot parse clock {:?}", file_name(.location.file()), .location.line(), .input)]
pub struct ClockParseError {
    input:    String,
    location: &'static Location<'static>,
}

impl ClockParseError {
    /// The text that failed to parse
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Source line of the failed check
    pub fn line(&self) -> u32 {
        self.location.line()
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[track_caller]
fn parse_error(input: &str) -> ClockParseError {
    ClockParseError {
        input:    input.to_owned(),
        location: Location::caller(),
    }
}

impl Clock {
    pub const NANOSECOND: i64 = 1;
    pub const MICROSECOND: i64 = 1_000 * Self::NANOSECOND;
    pub const MILLISECOND: i64 = 1_000 * Self::MICROSECOND;
    pub const SECOND: i64 = 1_000 * Self::MILLISECOND;
    pub const MINUTE: i64 = 60 * Self::SECOND;
    pub const HOUR: i64 = 60 * Self::MINUTE;
    pub const DAY: i64 = 24 * Self::HOUR;

    /// 00:00:00 at the start of a day
    pub const MIDNIGHT: Self = Self(0);
    /// 12:00:00
    pub const NOON: Self = Self(12 * Self::HOUR);

    /// Creates a clock time from hours, minutes, seconds and milliseconds.
    /// None of the fields is range checked; each simply contributes its value.
    pub fn new(hour: i32, minute: i32, second: i32, millisecond: i32) -> Self {
        Self(
            i64::from(hour) * Self::HOUR
                + i64::from(minute) * Self::MINUTE
                + i64::from(second) * Self::SECOND
                + i64::from(millisecond) * Self::MILLISECOND,
        )
    }

    /// As [`Clock::new`], with nanosecond precision
    pub fn new_nanos(hour: i32, minute: i32, second: i32, nanosecond: i64) -> Self {
        Self(Self::new(hour, minute, second, 0).0 + nanosecond)
    }

    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Nanoseconds since midnight; may be negative or exceed one day
    #[inline]
    pub const fn nanos(self) -> i64 {
        self.0
    }

    /// The same time of day, moved into `[00:00, 24:00)`
    pub const fn mod_24(self) -> Self {
        Self(self.0.rem_euclid(Self::DAY))
    }

    /// Whether the value lies between the start and end of one day, inclusive
    pub const fn is_in_one_day(self) -> bool {
        self.0 >= 0 && self.0 <= Self::DAY
    }

    pub const fn is_midnight(self) -> bool {
        self.mod_24().0 == 0
    }

    pub const fn hour(self) -> u8 {
        (self.mod_24().0 / Self::HOUR) as u8
    }

    pub const fn minute(self) -> u8 {
        (self.mod_24().0 % Self::HOUR / Self::MINUTE) as u8
    }

    pub const fn second(self) -> u8 {
        (self.mod_24().0 % Self::MINUTE / Self::SECOND) as u8
    }

    pub const fn millisecond(self) -> u16 {
        (self.mod_24().0 % Self::SECOND / Self::MILLISECOND) as u16
    }

    pub const fn nanosecond(self) -> u32 {
        (self.mod_24().0 % Self::SECOND) as u32
    }

    /// Adds hours, minutes, seconds and milliseconds without wrapping at
    /// midnight.
    pub fn add(self, hours: i32, minutes: i32, seconds: i32, milliseconds: i32) -> Self {
        self + Self::new(hours, minutes, seconds, milliseconds)
    }

    /// `hh:mm`
    pub fn hh_mm(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// `hh:mm:ss`
    pub fn hh_mm_ss(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
    }

    /// Twelve-hour notation such as `2:45pm`; midnight is `12:00am`.
    pub fn hh_mm_am_pm(self) -> String {
        let hour = self.hour();
        let suffix = if hour < 12 { "am" } else { "pm" };
        let hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{hour}:{:02}{suffix}", self.minute())
    }
}

impl fmt::Display for Clock {
    /// `hh:mm:ss`, or `hh:mm:ss.nnnnnnnnn` when there is a fraction of a
    /// second. Times outside one day are shown modulo 24 hours.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())?;
        match self.nanosecond() {
            0 => Ok(()),
            nanos => write!(f, ".{nanos:09}"),
        }
    }
}

impl Add for Clock {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sub for Clock {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl FromStr for Clock {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Times in `[00:00, 24:00)` serialize as their `Display` string. Anything
/// else, which `Display` would fold into one day, serializes as the raw
/// nanosecond count.
impl Serialize for Clock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if (0..Self::DAY).contains(&self.0) {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_i64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Clock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ClockVisitor)
    }
}

struct ClockVisitor;

impl serde::de::Visitor<'_> for ClockVisitor {
    type Value = Clock;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a time of day or a count of nanoseconds")
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Clock, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Clock, E> {
        Ok(Clock(value))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Clock, E> {
        i64::try_from(value).map(Clock).map_err(E::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    const fn offset(self) -> i64 {
        match self {
            Self::Am => 0,
            Self::Pm => 12,
        }
    }
}

/// Fields of a clock string. An empty field is absent and counts as zero.
#[derive(Debug, Clone, Copy, Default)]
struct Parts<'a> {
    hh:       &'a [u8],
    mm:       &'a [u8],
    ss:       &'a [u8],
    fraction: &'a [u8],
}

/// Parses a time of day.
///
/// ISO 8601 layouts: `hh`, `hhmm`, `hh:mm`, `hhmmss`, `hh:mm:ss` and
/// `hh:mm:ss.f` with 1 to 9 fraction digits.
///
/// Twelve-hour layouts, with an `am` or `pm` suffix in either case: `2pm`,
/// `11am`, `2:45pm`, `2:45:30pm` and `2:45:30.5pm` with 1 to 3 fraction
/// digits. `12am` is midnight and `12pm` is noon.
///
/// Minutes and seconds are not range checked.
///
/// # Errors
/// Returns `ClockParseError` if the text matches none of the layouts.
pub fn parse(hms: &str) -> Result<Clock, ClockParseError> {
    match meridiem(hms) {
        Some(meridiem) => {
            trace!("clock: parsing {hms:?} as twelve-hour time, {meridiem:?}");
            parse_twelve_hour(hms, meridiem)
        }
        None => parse_iso(hms),
    }
}

fn meridiem(hms: &str) -> Option<Meridiem> {
    let [.., a, m] = hms.as_bytes() else {
        return None;
    };
    if !m.eq_ignore_ascii_case(&b'm') {
        return None;
    }
    match a.to_ascii_lowercase() {
        b'a' => Some(Meridiem::Am),
        b'p' => Some(Meridiem::Pm),
        _ => None,
    }
}

fn parse_iso(hms: &str) -> Result<Clock, ClockParseError> {
    let b = hms.as_bytes();
    let parts = match b.len() {
        // hh
        2 => Parts { hh: b, ..Parts::default() },
        // hhmm
        4 => Parts { hh: &b[..2], mm: &b[2..], ..Parts::default() },
        // hh:mm
        5 => {
            expect_separators(hms, b, &[(2, CLOCK_SEPARATOR)])?;
            Parts { hh: &b[..2], mm: &b[3..], ..Parts::default() }
        }
        // hhmmss
        6 => Parts { hh: &b[..2], mm: &b[2..4], ss: &b[4..], ..Parts::default() },
        // hh:mm:ss
        8 => {
            expect_separators(hms, b, &[(2, CLOCK_SEPARATOR), (5, CLOCK_SEPARATOR)])?;
            Parts { hh: &b[..2], mm: &b[3..5], ss: &b[6..], ..Parts::default() }
        }
        // hh:mm:ss.f to hh:mm:ss.fffffffff
        10..=18 => {
            expect_separators(
                hms,
                b,
                &[(2, CLOCK_SEPARATOR), (5, CLOCK_SEPARATOR), (8, FRACTION_SEPARATOR)],
            )?;
            Parts { hh: &b[..2], mm: &b[3..5], ss: &b[6..8], fraction: &b[9..] }
        }
        _ => return Err(parse_error(hms)),
    };
    assemble(hms, parts, None)
}

fn parse_twelve_hour(hms: &str, meridiem: Meridiem) -> Result<Clock, ClockParseError> {
    let b = hms.as_bytes();
    let body = &b[..b.len() - 2];

    // h or hh with nothing between it and the suffix
    if matches!(body.len(), 1 | 2) {
        return assemble(hms, Parts { hh: body, ..Parts::default() }, Some(meridiem));
    }

    let colon = body
        .iter()
        .position(|&c| c == CLOCK_SEPARATOR as u8)
        .ok_or_else(|| parse_error(hms))?;
    let (hh, rest) = (&body[..colon], &body[colon + 1..]);
    if !(1..=2).contains(&hh.len()) {
        return Err(parse_error(hms));
    }

    let parts = match rest.len() {
        // mm
        2 => Parts { hh, mm: rest, ..Parts::default() },
        // mm:ss
        5 => {
            expect_separators(hms, rest, &[(2, CLOCK_SEPARATOR)])?;
            Parts { hh, mm: &rest[..2], ss: &rest[3..], ..Parts::default() }
        }
        // mm:ss.f to mm:ss.fff
        7..=9 => {
            expect_separators(hms, rest, &[(2, CLOCK_SEPARATOR), (5, FRACTION_SEPARATOR)])?;
            Parts { hh, mm: &rest[..2], ss: &rest[3..5], fraction: &rest[6..] }
        }
        _ => return Err(parse_error(hms)),
    };
    assemble(hms, parts, Some(meridiem))
}

#[track_caller]
fn expect_separators(input: &str, b: &[u8], separators: &[(usize, char)]) -> Result<(), ClockParseError> {
    if separators.iter().all(|&(i, sep)| b.get(i) == Some(&(sep as u8))) {
        Ok(())
    } else {
        Err(parse_error(input))
    }
}

fn assemble(input: &str, parts: Parts<'_>, meridiem: Option<Meridiem>) -> Result<Clock, ClockParseError> {
    let field = |digits: &[u8]| {
        if digits.is_empty() {
            Ok(0)
        } else {
            parse_digits(digits).ok_or_else(|| parse_error(input))
        }
    };

    let mut hour = field(parts.hh)?;
    if let Some(meridiem) = meridiem {
        hour = hour % 12 + meridiem.offset();
    }
    let minute = field(parts.mm)?;
    let second = field(parts.ss)?;

    // Right-pad the fraction to nanoseconds.
    let nanos = match parts.fraction.len() {
        0 => 0,
        len @ 1..=9 => {
            let mut padded = [b'0'; 9];
            padded[..len].copy_from_slice(parts.fraction);
            field(&padded[..])?
        }
        _ => return Err(parse_error(input)),
    };

    Ok(Clock(
        hour * Clock::HOUR + minute * Clock::MINUTE + second * Clock::SECOND + nanos,
    ))
}
