//! Date filters for narrowing record listings.
//!
//! A [DateFilter] is resolved against today's date into an inclusive
//! [DateRange], which [filter_by_date_range] then applies to records.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, UtcOffset};

use crate::{Error, cycle::AccountingCycle, record::Record, timezone::local_date};

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// Create a range from `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDateFilter] if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidDateFilter(format!(
                "start date {start} is after end date {end}"
            )));
        }

        Ok(Self { start, end })
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The ways records can be narrowed down by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// A single day.
    Day(Date),
    /// The calendar week containing today, starting on Monday.
    CurrentWeek,
    /// A calendar month, from the 1st to the last day of the month.
    Month { year: i32, month: Month },
    /// An accounting cycle, from the 11th to the 10th of the next month.
    Cycle(AccountingCycle),
    /// A calendar year.
    Year(i32),
    /// An explicit inclusive range.
    Range(DateRange),
}

impl DateFilter {
    /// The dates selected by this filter when evaluated on `today`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDate] if the filter names a year outside of the
    /// supported range.
    pub fn resolve(&self, today: Date) -> Result<DateRange, Error> {
        match *self {
            DateFilter::Day(date) => DateRange::new(date, date),
            DateFilter::CurrentWeek => week_bounds(today),
            DateFilter::Month { year, month } => month_bounds(year, month),
            DateFilter::Cycle(cycle) => cycle.date_range(),
            DateFilter::Year(year) => year_bounds(year),
            DateFilter::Range(range) => Ok(range),
        }
    }
}

/// Keep the records whose local date falls in `range`.
///
/// Record timestamps are converted to `offset` before comparison and records
/// without a date are dropped. Applying the same filter again has no effect.
pub fn filter_by_date_range(records: Vec<Record>, range: DateRange, offset: UtcOffset) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| {
            record
                .occurred_at
                .is_some_and(|occurred_at| range.contains(local_date(occurred_at, offset)))
        })
        .collect()
}

/// The filter names accepted in query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    Day,
    Week,
    Month,
    Cycle,
    Year,
    Range,
}

/// The query string form of a [DateFilter].
///
/// For example `?filter=cycle&year=2024&month=2` or
/// `?filter=range&start=2024-01-01&end=2024-01-31`.
#[derive(Debug, Default, Deserialize)]
pub struct DateFilterQuery {
    pub filter: Option<FilterKind>,
    pub date: Option<Date>,
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateFilterQuery {
    /// Convert the query into a filter, or `None` if no filter was requested.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDateFilter] if a parameter the filter needs is
    /// missing, or [Error::InvalidMonth] for a month outside of 1 to 12.
    pub fn into_filter(self) -> Result<Option<DateFilter>, Error> {
        let Some(kind) = self.filter else {
            return Ok(None);
        };

        let filter = match kind {
            FilterKind::Day => DateFilter::Day(require(self.date, "date")?),
            FilterKind::Week => DateFilter::CurrentWeek,
            FilterKind::Month => {
                let year = require(self.year, "year")?;
                let month = require(self.month, "month")?;
                let month = Month::try_from(month).map_err(|_| Error::InvalidMonth(month))?;

                DateFilter::Month { year, month }
            }
            FilterKind::Cycle => DateFilter::Cycle(AccountingCycle::new(
                require(self.year, "year")?,
                require(self.month, "month")?,
            )?),
            FilterKind::Year => DateFilter::Year(require(self.year, "year")?),
            FilterKind::Range => DateFilter::Range(DateRange::new(
                require(self.start, "start")?,
                require(self.end, "end")?,
            )?),
        };

        Ok(Some(filter))
    }
}

fn require<T>(value: Option<T>, name: &str) -> Result<T, Error> {
    value.ok_or_else(|| Error::InvalidDateFilter(format!("missing query parameter \"{name}\"")))
}

fn week_bounds(today: Date) -> Result<DateRange, Error> {
    let weekday_number = today.weekday().number_from_monday() as i64;
    let start = today - Duration::days(weekday_number - 1);
    let end = start + Duration::days(6);

    DateRange::new(start, end)
}

fn month_bounds(year: i32, month: Month) -> Result<DateRange, Error> {
    let start = Date::from_calendar_date(year, month, 1)?;
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))?;

    DateRange::new(start, end)
}

fn year_bounds(year: i32) -> Result<DateRange, Error> {
    let start = Date::from_calendar_date(year, Month::January, 1)?;
    let end = Date::from_calendar_date(year, Month::December, 31)?;

    DateRange::new(start, end)
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
