/// Number of months in a year
pub const MONTHS_PER_YEAR: i64 = 12;

/// Days in a 400-year Gregorian cycle
pub(crate) const DAYS_IN_ERA: i64 = 146_097;

/// Days from 0000-03-01 (the start of a computational era) to 1970-01-01
pub(crate) const DAYS_FROM_ERA_START_TO_UNIX_EPOCH: i64 = 719_468;

/// Days from 0001-01-01 (day zero of a `Date`) to 1970-01-01
pub const DAYS_FROM_ZERO_TO_UNIX_EPOCH: i64 = 719_162;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separator between the date and time parts of an ISO 8601 date-time
pub const TIME_DESIGNATOR: char = 'T';
/// Range separator (ISO 8601 interval notation)
pub const RANGE_SEPARATOR: char = '/';
/// Separator between hours, minutes and seconds
pub const CLOCK_SEPARATOR: char = ':';
/// Separator before fractional seconds
pub const FRACTION_SEPARATOR: char = '.';

/// Minimum number of digits in a year field
pub const MIN_YEAR_DIGITS: usize = 4;
/// Width of month and day fields
pub const MONTH_DAY_DIGITS: usize = 2;
/// Width of the day-of-year field of an ordinal date
pub const ORDINAL_DIGITS: usize = 3;

/// Width of the binary encoding of a `Date`
pub const BINARY_LEN: usize = 8;
