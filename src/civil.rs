//! Conversion between proleptic Gregorian (year, month, day) triples and day
//! counts.
//!
//! Day counts are relative to 0001-01-01, so day 0 is a Monday and 1970-01-01
//! is day 719162. Years use astronomical numbering: the year before 1 is 0,
//! and the year before that is -1.
//!
//! The arithmetic follows <http://howardhinnant.github.io/date_algorithms.html>,
//! widened to `i64` so every `i32` day count round trips.

use crate::consts::{
    CENTURY_CYCLE, DAYS_FROM_ERA_START_TO_UNIX_EPOCH, DAYS_FROM_ZERO_TO_UNIX_EPOCH, DAYS_IN_ERA, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MONTHS_PER_YEAR,
};
use crate::types::{Month, Weekday};

pub const fn is_leap_year(year: i64) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

pub const fn days_in_month(year: i64, month: Month) -> u8 {
    month.days(is_leap_year(year))
}

pub const fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Days since 0001-01-01 of the given date.
///
/// This is not a validating constructor. A month outside `1..=12` carries
/// into the year and a day outside the month carries into neighbouring
/// months, so month 15 of year 1000 is March 1001 and day 0 of a month is the
/// last day of the month before. The whole sum is exact; only the final
/// result saturates at the ends of `i64`.
pub fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let months_per_year = i128::from(MONTHS_PER_YEAR);
    let total_months = i128::from(year) * months_per_year + i128::from(month) - 1;
    let year = total_months.div_euclid(months_per_year);
    let month = total_months.rem_euclid(months_per_year) + 1;

    let days = first_of_month(year, month) + i128::from(day) - 1;
    days.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Days since 0001-01-01 of the first of a month in `1..=12`.
///
/// Runs in `i128`: a normalised `i64` year times 366 days needs about 70 bits.
const fn first_of_month(year: i128, month: i128) -> i128 {
    let cycle = GREGORIAN_CYCLE as i128;
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(cycle);
    let year_of_era = year - era * cycle;
    let month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * month + 2) / 5;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    let unix_days = era * DAYS_IN_ERA as i128 + day_of_era - DAYS_FROM_ERA_START_TO_UNIX_EPOCH as i128;
    unix_days + DAYS_FROM_ZERO_TO_UNIX_EPOCH as i128
}

/// The (year, month, day) of a count of days since 0001-01-01. Exact inverse
/// of [`days_from_civil`] for every in-range date.
pub const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let days = days - DAYS_FROM_ZERO_TO_UNIX_EPOCH + DAYS_FROM_ERA_START_TO_UNIX_EPOCH;
    let era = days.div_euclid(DAYS_IN_ERA);
    let day_of_era = days - era * DAYS_IN_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / (DAYS_IN_ERA - 1)) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 };
    let year = year_of_era + era * GREGORIAN_CYCLE;
    let year = if month <= 2 { year + 1 } else { year };
    (year, month as u8, day as u8)
}

pub const fn weekday_from_days(days: i64) -> Weekday {
    Weekday::from_monday_offset(days)
}

/// 1-based day of the year.
pub const fn year_day(year: i64, month: u8, day: u8) -> u16 {
    let mut total = day as u16;
    let mut m = 1;
    while m < month {
        total += days_in_month(year, Month::from_civil(m)) as u16;
        m += 1;
    }
    total
}
