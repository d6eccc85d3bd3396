//! Date normalization for heterogeneous cell values.
//!
//! Everything is resolved against UTC, so the same input yields the same
//! calendar date whatever the time zone of the machine producing the report.
//! Unparseable input is "no date", never an error.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

use crate::table::CellValue;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid ISO date pattern"));

static SHORT_YEAR_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}$").expect("valid short date pattern"));

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y, %I:%M:%S %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%a %b %d %Y",
];

/// Resolves a raw cell to a UTC calendar date.
///
/// - `Absent`, empty text and the number zero are no date.
/// - Numbers are epoch milliseconds.
/// - `YYYY-MM-DD` text is read component-wise; out-of-range months and days
///   roll over into the following month or year.
/// - Other text goes through a list of common date and date-time layouts.
#[must_use]
pub fn normalize(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Absent => None,
        CellValue::Number(millis) if millis.is_zero() => None,
        CellValue::Number(millis) => millis
            .trunc()
            .to_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|instant| instant.date_naive()),
        CellValue::Timestamp(instant) => Some(instant.date_naive()),
        CellValue::Date(date) => Some(*date),
        CellValue::Text(text) => parse_text(text.trim()),
    }
}

fn parse_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if let Some(captures) = ISO_DATE.captures(text) {
        let year = captures[1].parse().ok()?;
        let month = captures[2].parse().ok()?;
        let day = captures[3].parse().ok()?;
        return from_components(year, month, day);
    }
    parse_general(text)
}

/// Assembles a date the way a calendar constructor with overflow would:
/// month 13 is January of the next year, day 0 is the last day of the
/// previous month.
///
/// The year is taken literally: `0050` is the year 50, not 1950.
fn from_components(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first_of_year = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let first_of_month = if month == 0 {
        first_of_year.checked_sub_months(Months::new(1))?
    } else {
        first_of_year.checked_add_months(Months::new(month - 1))?
    };
    first_of_month.checked_add_signed(TimeDelta::days(i64::from(day) - 1))
}

fn parse_general(text: &str) -> Option<NaiveDate> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc).date_naive());
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Some(instant.with_timezone(&Utc).date_naive());
    }
    if SHORT_YEAR_DATE.is_match(text) {
        return NaiveDate::parse_from_str(text, "%m/%d/%y").ok();
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|local| local.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        })
}

/// Formats a date as `MM/DD/YY`.
#[must_use]
pub fn format_display(date: NaiveDate) -> String {
    format!(
        "{:02}/{:02}/{:02}",
        date.month(),
        date.day(),
        date.year().rem_euclid(100)
    )
}

/// A date as shown on the report; no date renders as an empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayDate(Option<NaiveDate>);

impl DisplayDate {
    /// Normalizes a raw cell.
    #[must_use]
    pub fn from_cell(cell: &CellValue) -> Self {
        Self(normalize(cell))
    }

    /// The underlying calendar date, if any.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.0
    }

    /// Returns true when there is no date to show.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<NaiveDate> for DisplayDate {
    fn from(date: NaiveDate) -> Self {
        Self(Some(date))
    }
}

impl std::fmt::Display for DisplayDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(date) => f.write_str(&format_display(date)),
            None => Ok(()),
        }
    }
}

impl Serialize for DisplayDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Earliest and latest date of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest date.
    pub start: NaiveDate,
    /// Latest date.
    pub end: NaiveDate,
}

impl DateRange {
    /// Spans every date in the pool; `None` for an empty pool.
    pub fn spanning<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |range, date| {
            Some(match range {
                None => Self {
                    start: date,
                    end: date,
                },
                Some(Self { start, end }) => Self {
                    start: start.min(date),
                    end: end.max(date),
                },
            })
        })
    }
}

/// `MM/DD/YY - MM/DD/YY`
impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            format_display(self.start),
            format_display(self.end)
        )
    }
}
