//! Partial date value object
//!
//! A birthday as stored in a vCard `BDAY` property: always a month and a day,
//! optionally a year.
//!
//! # Examples
//!
//! ```
//! use domain::PartialDate;
//!
//! let full: PartialDate = "1990-05-10".parse().unwrap();
//! assert_eq!(full.known_year(), Some(1990));
//!
//! let year_less: PartialDate = "--05-10".parse().unwrap();
//! assert_eq!(year_less.known_year(), None);
//! ```

use std::{fmt, str::FromStr};

use chrono::{
    NaiveDate,
    format::{Parsed, StrftimeItems, parse},
};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Years at or below this value are placeholders for an unknown birth year
pub const UNKNOWN_YEAR_SENTINEL: i32 = 1900;

/// A month/day pair with an optional year
///
/// The day is only range-checked (1..=31) on construction; whether it exists
/// in the month is decided per target year by [`PartialDate::in_year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPartialDate")]
pub struct PartialDate {
    month: u32,
    day: u32,
    year: Option<i32>,
}

impl PartialDate {
    /// Create a partial date, validating month and day ranges
    pub fn new(month: u32, day: u32, year: Option<i32>) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidDateTime(format!(
                "month {month} out of range"
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(DomainError::InvalidDateTime(format!(
                "day {day} out of range"
            )));
        }
        Ok(Self { month, day, year })
    }

    /// Create a partial date without a year
    pub fn month_day(month: u32, day: u32) -> Result<Self, DomainError> {
        Self::new(month, day, None)
    }

    /// Create a partial date with a year
    pub fn ymd(year: i32, month: u32, day: u32) -> Result<Self, DomainError> {
        Self::new(month, day, Some(year))
    }

    /// Month (1-12)
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Day of month (1-31)
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Year as recorded, including placeholder years
    #[must_use]
    pub const fn year(&self) -> Option<i32> {
        self.year
    }

    /// Year only when it is a real birth year (after 1900)
    #[must_use]
    pub fn known_year(&self) -> Option<i32> {
        self.year.filter(|year| *year > UNKNOWN_YEAR_SENTINEL)
    }

    /// Whether this is February 29
    #[must_use]
    pub const fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    /// The calendar date this birthday falls on in `year`
    ///
    /// February 29 moves to March 1 in non-leap years. Any other month/day
    /// combination that does not exist (e.g. April 31) yields `None`.
    #[must_use]
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).or_else(|| {
            if self.is_leap_day() {
                NaiveDate::from_ymd_opt(year, 3, 1)
            } else {
                None
            }
        })
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{year:04}-{:02}-{:02}", self.month, self.day),
            None => write!(f, "--{:02}-{:02}", self.month, self.day),
        }
    }
}

impl From<NaiveDate> for PartialDate {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;

        Self {
            month: date.month(),
            day: date.day(),
            year: Some(date.year()),
        }
    }
}

/// Year-less vCard forms, `--MM-DD` and `--MMDD`
const YEAR_LESS_FORMATS: [&str; 2] = ["--%m-%d", "--%m%d"];

/// Full-date vCard forms, `YYYY-MM-DD` and `YYYYMMDD`
const FULL_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Parses the vCard date forms `YYYY-MM-DD`, `YYYYMMDD`, `--MM-DD`, `--MMDD`
/// and date-times whose date part is a full date (the time is ignored).
impl FromStr for PartialDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || DomainError::InvalidDateTime(format!("unrecognized date: {value}"));

        if value.starts_with("--") {
            let parsed = parse_fields(value, &YEAR_LESS_FORMATS).ok_or_else(invalid)?;
            let (Some(month), Some(day)) = (parsed.month(), parsed.day()) else {
                return Err(invalid());
            };
            return Self::month_day(month, day);
        }

        let date = value.split_once('T').map_or(value, |(date, _)| date);
        let parsed = parse_fields(date, &FULL_DATE_FORMATS).ok_or_else(invalid)?;
        let (Some(year), Some(month), Some(day)) = (parsed.year(), parsed.month(), parsed.day())
        else {
            return Err(invalid());
        };
        Self::ymd(year, month, day)
    }
}

/// Fields of the first format matching all of `value`
///
/// Only field ranges are checked here, not whether the day exists in the
/// month.
fn parse_fields(value: &str, formats: &[&str]) -> Option<Parsed> {
    formats.iter().find_map(|format| {
        let mut parsed = Parsed::new();
        parse(&mut parsed, value, StrftimeItems::new(format)).ok()?;
        Some(parsed)
    })
}

/// Serialized shape of a [`PartialDate`], validated on the way in
#[derive(Deserialize)]
struct RawPartialDate {
    month: u32,
    day: u32,
    year: Option<i32>,
}

impl TryFrom<RawPartialDate> for PartialDate {
    type Error = DomainError;

    fn try_from(raw: RawPartialDate) -> Result<Self, Self::Error> {
        Self::new(raw.month, raw.day, raw.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_extended_full_date() {
        let parsed: PartialDate = "1990-05-10".parse().unwrap();
        assert_eq!(parsed, PartialDate::ymd(1990, 5, 10).unwrap());
    }

    #[test]
    fn parses_basic_full_date() {
        let parsed: PartialDate = "19850228".parse().unwrap();
        assert_eq!(parsed, PartialDate::ymd(1985, 2, 28).unwrap());
    }

    #[test]
    fn parses_year_less_forms() {
        let extended: PartialDate = "--05-10".parse().unwrap();
        let basic: PartialDate = "--0510".parse().unwrap();
        assert_eq!(extended, PartialDate::month_day(5, 10).unwrap());
        assert_eq!(basic, extended);
        assert_eq!(extended.year(), None);
    }

    #[test]
    fn parses_date_time_and_ignores_time() {
        let parsed: PartialDate = "1990-05-10T00:00:00Z".parse().unwrap();
        assert_eq!(parsed, PartialDate::ymd(1990, 5, 10).unwrap());

        let basic: PartialDate = "19900510T120000".parse().unwrap();
        assert_eq!(basic, parsed);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let parsed: PartialDate = "  1990-05-10\r".parse().unwrap();
        assert_eq!(parsed.month(), 5);
    }

    #[test]
    fn rejects_garbage() {
        for input in [
            "", "not a date", "1990/05/10", "---10", "--13-01", "1990-00-10",
            "1990-05-32", "--05-1x", "199a-05-10", "1990-05-10-",
        ] {
            assert!(input.parse::<PartialDate>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn rejects_non_ascii_without_panicking() {
        assert!("--ü5-10".parse::<PartialDate>().is_err());
        assert!("199ö0510".parse::<PartialDate>().is_err());
    }

    #[test]
    fn parse_keeps_days_missing_from_the_month() {
        let parsed: PartialDate = "--04-31".parse().unwrap();
        assert_eq!((parsed.month(), parsed.day()), (4, 31));

        let parsed: PartialDate = "20010230".parse().unwrap();
        assert_eq!(parsed.year(), Some(2001));
        assert_eq!(parsed.in_year(2001), None);
    }

    #[test]
    fn deserialize_validates_ranges() {
        let parsed: PartialDate =
            serde_json::from_str(r#"{"month":5,"day":10,"year":1990}"#).unwrap();
        assert_eq!(parsed, PartialDate::ymd(1990, 5, 10).unwrap());

        let year_less: PartialDate = serde_json::from_str(r#"{"month":2,"day":29}"#).unwrap();
        assert_eq!(year_less.year(), None);

        assert!(serde_json::from_str::<PartialDate>(r#"{"month":13,"day":99}"#).is_err());
        assert!(serde_json::from_str::<PartialDate>(r#"{"month":0,"day":1}"#).is_err());
    }

    #[test]
    fn serialize_round_trips() {
        let bday = PartialDate::ymd(1985, 2, 28).unwrap();
        let json = serde_json::to_string(&bday).unwrap();
        assert_eq!(serde_json::from_str::<PartialDate>(&json).unwrap(), bday);
    }

    #[test]
    fn new_validates_ranges() {
        assert!(PartialDate::new(0, 1, None).is_err());
        assert!(PartialDate::new(13, 1, None).is_err());
        assert!(PartialDate::new(1, 0, None).is_err());
        assert!(PartialDate::new(1, 32, None).is_err());
        assert!(PartialDate::new(4, 31, None).is_ok());
    }

    #[test]
    fn known_year_treats_1900_and_earlier_as_unknown() {
        assert_eq!(PartialDate::ymd(1901, 1, 1).unwrap().known_year(), Some(1901));
        assert_eq!(PartialDate::ymd(1900, 1, 1).unwrap().known_year(), None);
        assert_eq!(PartialDate::ymd(1604, 3, 2).unwrap().known_year(), None);
        assert_eq!(PartialDate::month_day(3, 2).unwrap().known_year(), None);
    }

    #[test]
    fn in_year_returns_same_month_and_day() {
        let bday = PartialDate::ymd(1990, 5, 10).unwrap();
        assert_eq!(bday.in_year(2023), Some(date(2023, 5, 10)));
    }

    #[test]
    fn leap_day_moves_to_march_first_in_common_years() {
        let bday = PartialDate::ymd(2000, 2, 29).unwrap();
        assert!(bday.is_leap_day());
        assert_eq!(bday.in_year(2023), Some(date(2023, 3, 1)));
        assert_eq!(bday.in_year(2024), Some(date(2024, 2, 29)));
        assert_eq!(bday.in_year(2100), Some(date(2100, 3, 1)));
    }

    #[test]
    fn impossible_day_is_rejected_outside_leap_day() {
        let bday = PartialDate::month_day(4, 31).unwrap();
        assert_eq!(bday.in_year(2023), None);
        assert_eq!(bday.in_year(2024), None);

        let bday = PartialDate::month_day(2, 30).unwrap();
        assert_eq!(bday.in_year(2024), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let full = PartialDate::ymd(1985, 2, 28).unwrap();
        assert_eq!(full.to_string(), "1985-02-28");
        assert_eq!(full.to_string().parse::<PartialDate>().unwrap(), full);

        let year_less = PartialDate::month_day(12, 1).unwrap();
        assert_eq!(year_less.to_string(), "--12-01");
    }

    #[test]
    fn from_naive_date() {
        let parsed = PartialDate::from(date(1970, 1, 1));
        assert_eq!(parsed, PartialDate::ymd(1970, 1, 1).unwrap());
    }
}
