use crate::civil::{days_from_civil, days_in_month, days_in_year};
use crate::consts::{DATE_SEPARATOR, MIN_YEAR_DIGITS, MONTH_DAY_DIGITS, ORDINAL_DIGITS, TIME_DESIGNATOR};
use crate::types::Month;
use crate::{Date, Field, FieldError, FieldErrors, ParseError};

/// Parses an ISO 8601 date.
///
/// Accepted layouts:
///
/// - `±YYYY-MM-DD` and `±YYYYMMDD`, e.g. `2006-01-02` and `20060102`
/// - the ordinal date `±YYYY-OOO`, e.g. `2006-217`
///
/// The year has at least four digits and may have more; in the basic layout
/// the year is everything before the last four digits. A leading `+` is
/// ignored and a leading `-` makes the year negative. The ordinal layout is
/// only accepted in extended form, because `YYYYOOO` cannot be told apart from
/// `YYYYMMDD` with a wider year.
///
/// A time after a `T` is checked for shape and then ignored, so
/// `2018-02-03T00:00:00Z` is 3 February 2018.
///
/// # Errors
/// A malformed layout fails immediately. Otherwise every field is checked and
/// all failures are reported together in [`ParseError::Fields`] or
/// [`ParseError::OrdinalFields`].
pub fn parse_iso(value: &str) -> Result<Date, ParseError> {
    parse_iso_quoting(value, value)
}

/// Parses `value`, quoting `input` in any error.
pub(crate) fn parse_iso_quoting(input: &str, value: &str) -> Result<Date, ParseError> {
    let (negative, abs) = split_sign(value);
    let mut abs = abs.as_bytes();

    let tee = abs.iter().position(|&b| b == TIME_DESIGNATOR as u8);
    if let Some(tee @ (8 | 10)) = tee {
        if !looks_like_time(&abs[tee..]) {
            return Err(ParseError::NotATime { input: input.to_owned() });
        }
        abs = &abs[..tee];
    }

    let dash = DATE_SEPARATOR as u8;
    let (Some(dash1), Some(dash2)) = (
        abs.iter().position(|&b| b == dash),
        abs.iter().rposition(|&b| b == dash),
    ) else {
        // YYYYMMDD, with more year digits allowed
        let len = abs.len();
        if len < 2 * MONTH_DAY_DIGITS {
            return Err(syntax(input, "too short"));
        }
        let month_start = len - 2 * MONTH_DAY_DIGITS;
        let day_start = len - MONTH_DAY_DIGITS;
        return parse_calendar_date(
            input,
            negative,
            &abs[..month_start],
            &abs[month_start..day_start],
            &abs[day_start..],
        );
    };

    if dash2 > dash1 {
        // YYYY-MM-DD, with more year digits allowed
        return parse_calendar_date(
            input,
            negative,
            &abs[..dash1],
            &abs[dash1 + 1..dash2],
            &abs[dash2 + 1..],
        );
    }

    // YYYY-OOO
    if abs.len() != dash1 + 1 + ORDINAL_DIGITS {
        return Err(syntax(input, "incorrect length for ordinal date yyyy-ooo"));
    }
    parse_ordinal_date(input, negative, &abs[..dash1], &abs[dash1 + 1..])
}

/// Strips a leading `+` or `-`, reporting whether it was `-`.
pub(crate) fn split_sign(value: &str) -> (bool, &str) {
    if let Some(rest) = value.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = value.strip_prefix('+') {
        (false, rest)
    } else {
        (false, value)
    }
}

/// Whether `text` starts like the time part of a date-time.
///
/// Both `T\d\d.\d\d.\d\d` and `T\d{2,6}` are accepted as prefixes, and each
/// of them begins with `T` and two digits, which is all that is checked.
fn looks_like_time(text: &[u8]) -> bool {
    matches!(text, [b'T', h1, h2, ..] if h1.is_ascii_digit() && h2.is_ascii_digit())
}

fn syntax(input: &str, reason: &'static str) -> ParseError {
    ParseError::Syntax {
        input: input.to_owned(),
        reason,
    }
}

fn parse_calendar_date(
    input: &str,
    negative: bool,
    yyyy: &[u8],
    mm: &[u8],
    dd: &[u8],
) -> Result<Date, ParseError> {
    let mut errors = FieldErrors::default();

    let year = collect(&mut errors, parse_year(yyyy, negative));
    let month = collect(
        &mut errors,
        parse_field(mm, Field::Month, Width::Exactly(MONTH_DAY_DIGITS))
            .and_then(|m| check_range(m, 12, Field::Month)),
    );
    let max_day = match (year, month) {
        (Some(y), Some(m)) => days_in_month(y, Month::from_civil(m as u8)),
        (None, Some(m)) => Month::from_civil(m as u8).days(true),
        (_, None) => 31,
    };
    let day = collect(
        &mut errors,
        parse_field(dd, Field::Day, Width::Exactly(MONTH_DAY_DIGITS))
            .and_then(|d| check_range(d, i64::from(max_day), Field::Day)),
    );

    let date = match (year, month, day) {
        (Some(year), Some(month), Some(day)) if errors.is_empty() => {
            in_range(days_from_civil(year, month, day), &mut errors)
        }
        _ => None,
    };

    match date {
        Some(date) => Ok(date),
        None => Err(ParseError::Fields {
            input: input.to_owned(),
            errors,
        }),
    }
}

fn parse_ordinal_date(input: &str, negative: bool, yyyy: &[u8], ooo: &[u8]) -> Result<Date, ParseError> {
    let mut errors = FieldErrors::default();

    let year = collect(&mut errors, parse_year(yyyy, negative));
    let max_ordinal = year.map_or(366, days_in_year);
    let ordinal = collect(
        &mut errors,
        parse_field(ooo, Field::Ordinal, Width::Exactly(ORDINAL_DIGITS))
            .and_then(|o| check_range(o, i64::from(max_ordinal), Field::Ordinal)),
    );

    let date = match (year, ordinal) {
        (Some(year), Some(ordinal)) if errors.is_empty() => in_range(days_from_civil(year, 1, ordinal), &mut errors),
        _ => None,
    };

    match date {
        Some(date) => Ok(date),
        None => Err(ParseError::OrdinalFields {
            input: input.to_owned(),
            errors,
        }),
    }
}

fn parse_year(yyyy: &[u8], negative: bool) -> Result<i64, FieldError> {
    let year = parse_field(yyyy, Field::Year, Width::AtLeast(MIN_YEAR_DIGITS))?;
    Ok(if negative { -year } else { year })
}

/// The date for a day count, or an invalid year when no `Date` reaches it.
fn in_range(days: i64, errors: &mut FieldErrors) -> Option<Date> {
    let date = i32::try_from(days).ok().map(Date::from_days);
    if date.is_none() {
        errors.push(FieldError::Invalid(Field::Year));
    }
    date
}

/// Records a failed field and passes a good one through.
fn collect(errors: &mut FieldErrors, result: Result<i64, FieldError>) -> Option<i64> {
    result.map_err(|e| errors.push(e)).ok()
}

#[derive(Debug, Clone, Copy)]
enum Width {
    AtLeast(usize),
    Exactly(usize),
}

fn parse_field(field: &[u8], name: Field, width: Width) -> Result<i64, FieldError> {
    let len_ok = match width {
        Width::AtLeast(min) => field.len() >= min,
        Width::Exactly(len) => field.len() == len,
    };
    if !len_ok {
        return Err(FieldError::WrongLength(name));
    }
    parse_digits(field).ok_or(FieldError::Invalid(name))
}

const fn check_range(value: i64, max: i64, name: Field) -> Result<i64, FieldError> {
    if value >= 1 && value <= max {
        Ok(value)
    } else {
        Err(FieldError::Invalid(name))
    }
}

/// Parses a non-empty run of ASCII digits. Signs, other characters and
/// values that overflow an `i64` are rejected.
pub(crate) fn parse_digits(field: &[u8]) -> Option<i64> {
    if field.is_empty() {
        return None;
    }
    field.iter().try_fold(0_i64, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
    })
}
