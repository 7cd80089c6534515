use crate::consts::{DAYS_IN_MONTH, FEBRUARY_DAYS_LEAP};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A month of the Gregorian year, numbered 1 (January) to 12 (December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Month {
    #[display(fmt = "January")]
    January = 1,
    #[display(fmt = "February")]
    February,
    #[display(fmt = "March")]
    March,
    #[display(fmt = "April")]
    April,
    #[display(fmt = "May")]
    May,
    #[display(fmt = "June")]
    June,
    #[display(fmt = "July")]
    July,
    #[display(fmt = "August")]
    August,
    #[display(fmt = "September")]
    September,
    #[display(fmt = "October")]
    October,
    #[display(fmt = "November")]
    November,
    #[display(fmt = "December")]
    December,
}

/// Error returned when a number does not name a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid month: {0} (must be 1-12)")]
pub struct InvalidMonth(pub u8);

impl Month {
    const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Creates a month from its 1-based number
    ///
    /// # Errors
    /// Returns `InvalidMonth` if the value is 0 or greater than 12.
    pub const fn new(value: u8) -> Result<Self, InvalidMonth> {
        if value == 0 || value > 12 {
            return Err(InvalidMonth(value));
        }
        Ok(Self::from_civil(value))
    }

    /// Month for a number already known to be in `1..=12`
    pub(crate) const fn from_civil(value: u8) -> Self {
        debug_assert!(value != 0 && value <= 12);
        Self::ALL[(value - 1) as usize]
    }

    /// Returns the 1-based month number
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Number of days in this month, for a leap or common year
    pub const fn days(self, leap: bool) -> u8 {
        if leap && matches!(self, Self::February) {
            FEBRUARY_DAYS_LEAP
        } else {
            DAYS_IN_MONTH[self as usize]
        }
    }
}

impl TryFrom<u8> for Month {
    type Error = InvalidMonth;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

impl From<Month> for i32 {
    fn from(month: Month) -> Self {
        Self::from(month.number())
    }
}

/// A day of the week. Weeks start on Monday, as in ISO 8601.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Weekday {
    #[display(fmt = "Monday")]
    Monday,
    #[display(fmt = "Tuesday")]
    Tuesday,
    #[display(fmt = "Wednesday")]
    Wednesday,
    #[display(fmt = "Thursday")]
    Thursday,
    #[display(fmt = "Friday")]
    Friday,
    #[display(fmt = "Saturday")]
    Saturday,
    #[display(fmt = "Sunday")]
    Sunday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Weekday that is `offset` days after a Monday. Negative offsets count
    /// backwards.
    pub(crate) const fn from_monday_offset(offset: i64) -> Self {
        Self::ALL[offset.rem_euclid(7) as usize]
    }

    /// ISO 8601 weekday number, 1 (Monday) to 7 (Sunday)
    pub const fn number_from_monday(self) -> u8 {
        self as u8 + 1
    }
}
