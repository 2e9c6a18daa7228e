//! Fixed UTC offsets used to turn instants into calendar dates.
//!
//! The app never consults the host's timezone database. Every instant is
//! converted to the configured offset before its date is taken.

use time::{Date, OffsetDateTime, UtcOffset, macros::offset};

use crate::{Error, clock::Clock};

/// The offset used when none is configured (UTC-05:00).
pub const DEFAULT_UTC_OFFSET: UtcOffset = offset!(-5);

/// Create a whole-hour UTC offset, e.g. `-5` for UTC-05:00.
///
/// # Errors
///
/// Returns [Error::InvalidUtcOffset] if `hours` is outside of ±25.
pub fn utc_offset_from_hours(hours: i8) -> Result<UtcOffset, Error> {
    UtcOffset::from_hms(hours, 0, 0).map_err(|_| Error::InvalidUtcOffset(hours))
}

/// The calendar date of `instant` as seen from `offset`.
pub fn local_date(instant: OffsetDateTime, offset: UtcOffset) -> Date {
    instant.to_offset(offset).date()
}

/// The local date of `instant` as shown on pages, e.g. "2024-03-04".
pub fn format_local_date(instant: OffsetDateTime, offset: UtcOffset) -> String {
    local_date(instant, offset).to_string()
}

/// Today's date at `offset` according to `clock`.
pub fn local_today(clock: &dyn Clock, offset: UtcOffset) -> Date {
    local_date(clock.now_utc(), offset)
}
