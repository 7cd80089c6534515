use std::borrow::Cow;

use icu_properties::CodePointMapData;
use icu_properties::props::{GeneralCategory, GeneralCategoryGroup};

use crate::consts::DATE_SEPARATOR;
use crate::iso::parse_iso_quoting;
use crate::{Date, ParseError};

/// Reassembles a date written with its day and month before the year into ISO
/// `YYYY-MM-DD` order.
///
/// `first` and `second` are the two short fields in the order they were
/// written, each already zero padded to two digits. Whether `first` is the day
/// or the month cannot be told from the text, so the caller picks the policy
/// by picking the composer.
pub trait Compose {
    fn compose(&self, year: &str, first: &str, second: &str) -> String;
}

/// `dd/mm/yyyy`, as written in most of Europe and in Britain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayFirst;

/// `mm/dd/yyyy`, as written in the US.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthFirst;

impl Compose for DayFirst {
    fn compose(&self, year: &str, first: &str, second: &str) -> String {
        format!("{year}{DATE_SEPARATOR}{second}{DATE_SEPARATOR}{first}")
    }
}

impl Compose for MonthFirst {
    fn compose(&self, year: &str, first: &str, second: &str) -> String {
        format!("{year}{DATE_SEPARATOR}{first}{DATE_SEPARATOR}{second}")
    }
}

impl<F> Compose for F
where
    F: Fn(&str, &str, &str) -> String,
{
    fn compose(&self, year: &str, first: &str, second: &str) -> String {
        self(year, first, second)
    }
}

/// Parses a date in any layout [`parse_iso`](crate::parse_iso) accepts, or in
/// `yyyy/mm/dd`, `dd/mm/yyyy` or `d/m/yyyy` with any punctuation character as
/// the separator. Surrounding whitespace is ignored.
///
/// This is the "European" and "British" reading: `01/02/2023` is 1 February.
/// Use [`auto_parse_us`] for the US reading.
///
/// # Errors
/// [`ParseError::Blank`] for blank input; otherwise whatever the ISO parser
/// reports for the normalised text.
pub fn auto_parse(value: &str) -> Result<Date, ParseError> {
    auto_parse_with(value, &DayFirst)
}

/// As [`auto_parse`], but reading `mm/dd/yyyy` and `m/d/yyyy`: `01/02/2023`
/// is 2 January.
///
/// # Errors
/// As [`auto_parse`].
pub fn auto_parse_us(value: &str) -> Result<Date, ParseError> {
    auto_parse_with(value, &MonthFirst)
}

/// Parses a date, using `composer` to put day-or-month-first text into ISO
/// order.
///
/// Only text of at least 8 characters (after any sign) with exactly two
/// punctuation characters, both the same, is rewritten. When the first of them
/// is at index 4 or later the fields are already year first and the separators
/// just become `-`. When it is at index 1 to 3 the text is day or month first
/// and is handed to `composer`. Anything else goes to the ISO parser untouched.
///
/// # Errors
/// As [`auto_parse`].
pub fn auto_parse_with<C>(value: &str, composer: &C) -> Result<Date, ParseError>
where
    C: Compose + ?Sized,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Blank);
    }

    let (sign, abs) = if trimmed.starts_with(['+', '-']) {
        trimmed.split_at(1)
    } else {
        ("", trimmed)
    };

    match normalize(abs, composer) {
        Some(rewritten) => parse_iso_quoting(value, &format!("{sign}{rewritten}")),
        None => parse_iso_quoting(value, trimmed),
    }
}

fn normalize<C>(abs: &str, composer: &C) -> Option<String>
where
    C: Compose + ?Sized,
{
    if abs.len() < 8 {
        return None;
    }

    let mut marks = abs.char_indices().filter(|&(_, c)| is_punctuation(c));
    let (Some((i1, mark)), Some((i2, other)), None) = (marks.next(), marks.next(), marks.next()) else {
        return None;
    };
    if mark != other {
        return None;
    }

    let width = mark.len_utf8();
    let head = &abs[..i1];
    let middle = &abs[i1 + width..i2];
    let tail = &abs[i2 + width..];

    match i1 {
        4.. => {
            trace!("auto_parse: {abs:?} is year first, separator {mark:?}");
            Some(format!("{head}{DATE_SEPARATOR}{middle}{DATE_SEPARATOR}{tail}"))
        }
        1..=3 => {
            trace!("auto_parse: {abs:?} has the year last, separator {mark:?}");
            Some(composer.compose(tail, &zero_pad(head), &zero_pad(middle)))
        }
        0 => None,
    }
}

fn zero_pad(field: &str) -> Cow<'_, str> {
    if field.len() == 1 {
        Cow::Owned(format!("0{field}"))
    } else {
        Cow::Borrowed(field)
    }
}

/// Whether `c` is in Unicode general category P, in any script.
fn is_punctuation(c: char) -> bool {
    GeneralCategoryGroup::Punctuation.contains(CodePointMapData::<GeneralCategory>::new().get(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use crate::{Field, FieldError};

    #[test]
    fn test_auto_parse_cases() {
        struct TestCase {
            input:       &'static str,
            want:        Date,
            description: &'static str,
        }

        let cases = [
            TestCase { input: "2023-12-25", want: date(2023, 12, 25), description: "iso extended" },
            TestCase { input: "20231225", want: date(2023, 12, 25), description: "iso basic" },
            TestCase { input: "2023-359", want: date(2023, 12, 25), description: "iso ordinal" },
            TestCase { input: "+12345-06-07", want: date(12345, 6, 7), description: "wide year" },
            TestCase { input: "2023/12/25", want: date(2023, 12, 25), description: "year first, slashes" },
            TestCase { input: "2023.12.25", want: date(2023, 12, 25), description: "year first, dots" },
            TestCase { input: "25/12/2023", want: date(2023, 12, 25), description: "day first" },
            TestCase { input: "25.12.2023", want: date(2023, 12, 25), description: "day first, dots" },
            TestCase { input: "5.3.2023", want: date(2023, 3, 5), description: "single digit fields" },
            TestCase { input: "1/2/2023", want: date(2023, 2, 1), description: "1 February" },
            TestCase { input: "  25/12/2023\n", want: date(2023, 12, 25), description: "surrounding space" },
            TestCase { input: "-25/12/2023", want: date(-2023, 12, 25), description: "negative year" },
            TestCase { input: "+25/12/2023", want: date(2023, 12, 25), description: "explicit plus" },
            TestCase { input: "25\u{2010}12\u{2010}2023", want: date(2023, 12, 25), description: "unicode hyphen" },
            TestCase { input: "2023\u{3001}12\u{3001}25", want: date(2023, 12, 25), description: "ideographic comma" },
            TestCase { input: "25\u{060C}12\u{060C}2023", want: date(2023, 12, 25), description: "arabic comma" },
            TestCase { input: "25\u{2E31}12\u{2E31}2023", want: date(2023, 12, 25), description: "word separator middle dot" },
            TestCase { input: "2023\u{0964}12\u{0964}25", want: date(2023, 12, 25), description: "devanagari danda" },
            TestCase { input: "2018-02-03T10:11:12", want: date(2018, 2, 3), description: "date-time" },
        ];

        for case in &cases {
            let got = auto_parse(case.input);
            assert_eq!(got, Ok(case.want), "{:?} ({})", case.input, case.description);
        }
    }

    #[test]
    fn test_auto_parse_us_cases() {
        assert_eq!(auto_parse_us("12/25/2023"), Ok(date(2023, 12, 25)));
        assert_eq!(auto_parse_us("1/2/2023"), Ok(date(2023, 1, 2)));
        assert_eq!(auto_parse_us("2023/12/25"), Ok(date(2023, 12, 25)));
        assert_eq!(auto_parse_us("2023-12-25"), Ok(date(2023, 12, 25)));
    }

    #[test]
    fn test_composer_choice_disambiguates() {
        assert_eq!(auto_parse("25/12/2023"), Ok(date(2023, 12, 25)));

        let err = auto_parse_us("25/12/2023").unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains(&FieldError::Invalid(Field::Month)));
        assert_eq!(err.to_string(), "cannot parse \"25/12/2023\": invalid month");

        assert_eq!(auto_parse("03/04/2023"), Ok(date(2023, 4, 3)));
        assert_eq!(auto_parse_us("03/04/2023"), Ok(date(2023, 3, 4)));
    }

    #[test]
    fn test_custom_composer() {
        let composer = |year: &str, first: &str, second: &str| format!("{year}-{second}-{first}");
        assert_eq!(auto_parse_with("25/12/2023", &composer), Ok(date(2023, 12, 25)));

        let boxed: Box<dyn Compose> = Box::new(MonthFirst);
        assert_eq!(auto_parse_with("12/25/2023", &*boxed), Ok(date(2023, 12, 25)));
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(auto_parse(""), Err(ParseError::Blank));
        assert_eq!(auto_parse(" \t\n"), Err(ParseError::Blank));
        assert_eq!(ParseError::Blank.to_string(), "cannot parse a blank string");
    }

    #[test]
    fn test_unmatched_separators_fall_through() {
        // Mixed separators and three or more separators reach the ISO parser as written.
        assert!(matches!(auto_parse("25/12-2023"), Err(ParseError::Syntax { .. })));
        assert!(auto_parse("1/2/3/2023").is_err());
        assert!(auto_parse("2023/12-25").is_err());
        // Too short to be rewritten.
        assert!(auto_parse("1/2/203").is_err());
    }

    #[test]
    fn test_errors_quote_original_input() {
        let err = auto_parse("  31/02/2023 ").unwrap_err();
        assert_eq!(err.to_string(), "cannot parse \"  31/02/2023 \": invalid day");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("2023/12/25", &DayFirst), Some("2023-12-25".to_owned()));
        assert_eq!(normalize("25/12/2023", &DayFirst), Some("2023-12-25".to_owned()));
        assert_eq!(normalize("5/3/2023", &MonthFirst), Some("2023-05-03".to_owned()));
        assert_eq!(normalize("/12/2023", &DayFirst), None);
        assert_eq!(normalize("20231225", &DayFirst), None);
        assert_eq!(normalize("2023-359", &DayFirst), None);
    }

    #[test]
    fn test_is_punctuation() {
        for c in ['-', '/', '.', ',', ':', '\u{2014}', '\u{3002}', '\u{FF0F}', '\u{055D}', '\u{060C}', '\u{0964}', '\u{2E31}'] {
            assert!(is_punctuation(c), "{c:?} is punctuation");
        }
        for c in ['+', '$', '|', '~', 'a', '0', ' '] {
            assert!(!is_punctuation(c), "{c:?} is not punctuation");
        }
    }
}
