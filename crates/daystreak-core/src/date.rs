//! Local calendar-day normalization.
//!
//! Every place that stores, compares or displays a day goes through
//! [`canonical_day`] and [`local_day`]. Days are taken from the wall-clock
//! year/month/day fields of the local time zone, never from a UTC conversion,
//! so a click at 00:30 local time lands on the local day and not on the
//! previous UTC day.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};

use crate::error::ValidationError;

/// Canonical day format: zero-padded `YYYY-MM-DD`.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Source of "today" and "now".
///
/// The store and the calendar controller never read the system time
/// directly, which keeps the streak rules testable across day boundaries.
pub trait Clock {
    /// Current local calendar day.
    fn today(&self) -> NaiveDate;

    /// Current instant, used for informational timestamps.
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall clock of the machine, in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        local_day(&Local::now())
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a given day. The day can be moved forward to simulate a
/// session that stays open past midnight.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Move the clock forward by `days` calendar days.
    pub fn advance_days(&self, days: u64) {
        if let Some(next) = self.today.get().checked_add_days(Days::new(days)) {
            self.today.set(next);
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now(&self) -> DateTime<Utc> {
        self.today
            .get()
            .and_hms_opt(12, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(Utc::now)
    }
}

/// Calendar day of `at` as seen on a wall clock in `at`'s own time zone.
pub fn local_day<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.date_naive()
}

/// Format a day as its canonical `YYYY-MM-DD` string.
pub fn canonical_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a canonical day string.
///
/// Only the exact zero-padded form is accepted: `2024-1-5` and
/// `2024-01-05T10:00:00Z` are rejected rather than silently normalized, so a
/// string and the day it denotes always agree.
pub fn parse_day(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .ok()
        .filter(|day| canonical_day(*day) == value)
        .ok_or_else(|| ValidationError::InvalidDay(value.to_string()))
}

/// Whether `day` is the clock's current local day.
pub fn is_today(day: NaiveDate, clock: &impl Clock) -> bool {
    day == clock.today()
}

/// The day `offset` days before `day`, if representable.
pub fn days_before(day: NaiveDate, offset: u64) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(offset))
}
