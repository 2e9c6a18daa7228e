//! Sources of the current instant.
//!
//! Code that needs "now" takes a [Clock] so that tests can pin the date.

use std::fmt::Debug;

use time::OffsetDateTime;

/// Provides the current instant in UTC.
pub trait Clock: Debug + Send + Sync {
    /// The current instant.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{Clock, FixedClock, SystemClock};

    #[test]
    fn fixed_clock_returns_same_instant() {
        let now = datetime!(2024-03-05 12:00 UTC);
        let clock = FixedClock(now);

        assert_eq!(clock.now_utc(), now);
        assert_eq!(clock.now_utc(), now);
    }

    #[test]
    fn system_clock_is_utc() {
        assert!(SystemClock.now_utc().offset().is_utc());
    }
}
