//! Accounting cycles for credit card billing.
//!
//! A cycle is named after the month in which its charges start to accumulate.
//! Days 1 to 10 of a month still belong to the previous month's cycle and form
//! its payment period, so the cycle for March 2024 runs from 11 March to
//! 10 April.
//!
//! All functions here take calendar dates. Convert instants with
//! [crate::timezone::local_date] first.

use std::fmt::Display;

use serde::{Serialize, Serializer};
use time::{Date, Month};

use crate::{Error, date_filter::DateRange};

/// The last day of a month that still belongs to the previous month's cycle.
pub const PAYMENT_PERIOD_LAST_DAY: u8 = 10;

/// The billing cycle a date belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AccountingCycle {
    year: i32,
    #[serde(serialize_with = "serialize_month_number")]
    month: Month,
}

fn serialize_month_number<S: Serializer>(month: &Month, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*month))
}

impl AccountingCycle {
    /// Create the cycle for `year` and `month`, where `month` is 1 to 12.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidMonth] if `month` is not a calendar month, or
    /// [Error::InvalidDate] if `year` is outside of the years a [Date] can hold.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        let month = Month::try_from(month).map_err(|_| Error::InvalidMonth(month))?;
        // Keeps `previous` and `next` clear of integer overflow.
        Date::from_calendar_date(year, month, 1)?;

        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 to 12.
    pub fn month(&self) -> u8 {
        u8::from(self.month)
    }

    pub fn previous(&self) -> Self {
        match self.month {
            Month::January => Self {
                year: self.year - 1,
                month: Month::December,
            },
            month => Self {
                year: self.year,
                month: month.previous(),
            },
        }
    }

    pub fn next(&self) -> Self {
        match self.month {
            Month::December => Self {
                year: self.year + 1,
                month: Month::January,
            },
            month => Self {
                year: self.year,
                month: month.next(),
            },
        }
    }

    /// The dates in this cycle, from day 11 of its month to day 10 of the
    /// next month inclusive.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDate] if the cycle falls outside of the range of
    /// supported years.
    pub fn date_range(&self) -> Result<DateRange, Error> {
        let next = self.next();
        let start = Date::from_calendar_date(self.year, self.month, PAYMENT_PERIOD_LAST_DAY + 1)?;
        let end = Date::from_calendar_date(next.year, next.month, PAYMENT_PERIOD_LAST_DAY)?;

        DateRange::new(start, end)
    }
}

impl Display for AccountingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month(), self.year)
    }
}

/// Map a date to the accounting cycle it belongs to.
///
/// Days 1 to 10 belong to the previous month's cycle, with January rolling
/// back to December of the previous year. Later days belong to their own
/// month's cycle.
pub fn classify(date: Date) -> AccountingCycle {
    let cycle = AccountingCycle {
        year: date.year(),
        month: date.month(),
    };

    if date.day() <= PAYMENT_PERIOD_LAST_DAY {
        cycle.previous()
    } else {
        cycle
    }
}

/// The accounting cycle active on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cycle {
    #[serde(flatten)]
    pub accounting_cycle: AccountingCycle,
    /// Whether the cycle's charges are due, i.e. the day is 1 to 10.
    pub is_payment_period: bool,
    /// Days left to pay, counting today. Zero outside of the payment period.
    pub days_remaining: u8,
}

impl Cycle {
    pub fn year(&self) -> i32 {
        self.accounting_cycle.year()
    }

    pub fn month(&self) -> u8 {
        self.accounting_cycle.month()
    }
}

/// Resolve the cycle that is active on `today`.
pub fn current_cycle(today: Date) -> Cycle {
    let day = today.day();
    let is_payment_period = day <= PAYMENT_PERIOD_LAST_DAY;
    let days_remaining = if is_payment_period {
        PAYMENT_PERIOD_LAST_DAY - day + 1
    } else {
        0
    };

    Cycle {
        accounting_cycle: classify(today),
        is_payment_period,
        days_remaining,
    }
}

/// Whether `date` falls in `cycle`.
pub fn belongs_to_cycle(date: Date, cycle: AccountingCycle) -> bool {
    classify(date) == cycle
}
