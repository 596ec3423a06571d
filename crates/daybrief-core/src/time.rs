//! Time types for agenda events.
//!
//! This module provides [`EventTime`] for representing when an event happens
//! (either a whole calendar day or a start/end pair in the local zone),
//! [`SyncRange`] for the day range an agenda covers, and [`TimeWindow`] for
//! the UTC interval handed to calendar sources.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// When a calendar event takes place.
///
/// Calendar events come in two shapes:
/// - **AllDay**: a date without a specific time
/// - **Timed**: a start and end instant, already converted to the local zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventTime {
    /// An all-day event date (no specific time).
    AllDay(NaiveDate),
    /// A timed event. `end` is never before `start`.
    Timed {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
}

impl EventTime {
    /// Creates a new `EventTime::AllDay` from a date.
    pub fn all_day(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Creates a new `EventTime::Timed`.
    ///
    /// Returns `None` if `end` is before `start`.
    pub fn timed(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Option<Self> {
        (end >= start).then_some(Self::Timed { start, end })
    }

    /// Returns `true` if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// The local instant used to order events.
    ///
    /// All-day events start at local midnight.
    pub fn effective_start(&self) -> NaiveDateTime {
        match self {
            Self::AllDay(date) => date.and_time(NaiveTime::MIN),
            Self::Timed { start, .. } => start.naive_local(),
        }
    }

    /// The local calendar date an event is filed under.
    pub fn effective_date(&self) -> NaiveDate {
        self.effective_start().date()
    }

    /// Returns `true` for timed events whose end falls on a later local date.
    pub fn spans_days(&self) -> bool {
        match self {
            Self::AllDay(_) => false,
            Self::Timed { start, end } => start.date_naive() != end.date_naive(),
        }
    }
}

/// The range of days an agenda covers, relative to "today".
///
/// The range is the closed interval `[today - days_before, today + days_ahead]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRange {
    /// Number of days before today to include.
    pub days_before: u32,
    /// Number of days after today to include.
    pub days_ahead: u32,
}

impl Default for SyncRange {
    fn default() -> Self {
        Self {
            days_before: 3,
            days_ahead: 7,
        }
    }
}

impl SyncRange {
    /// Creates a new range.
    pub fn new(days_before: u32, days_ahead: u32) -> Self {
        Self {
            days_before,
            days_ahead,
        }
    }

    /// A range covering only today.
    pub fn today_only() -> Self {
        Self::new(0, 0)
    }

    /// Number of days in the range, today included.
    pub fn len(&self) -> usize {
        self.days_before as usize + self.days_ahead as usize + 1
    }

    /// A range always contains at least today.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First date of the range.
    pub fn first_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.days_before)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last date of the range (inclusive).
    pub fn last_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.days_ahead)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// All dates of the range in ascending order.
    pub fn dates(&self, today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_date(today);
        let last = self.last_date(today);
        first.iter_days().take_while(move |d| *d <= last)
    }

    /// Checks if a date falls inside the range.
    pub fn contains(&self, today: NaiveDate, date: NaiveDate) -> bool {
        self.first_date(today) <= date && date <= self.last_date(today)
    }

    /// The UTC window to request from calendar sources.
    ///
    /// Runs from local midnight of the first date to local midnight of the
    /// day after the last date.
    pub fn fetch_window<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> TimeWindow {
        let first = self.first_date(today);
        let after_last = self.last_date(today).succ_opt().unwrap_or(NaiveDate::MAX);
        TimeWindow::new(
            local_midnight_utc(first, tz),
            local_midnight_utc(after_last, tz),
        )
    }
}

/// Converts local midnight of `date` in `tz` to UTC.
///
/// When midnight does not exist locally (a DST gap), the naive midnight is
/// taken as UTC.
fn local_midnight_utc<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// A time window for querying calendar sources.
///
/// Represents a half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// Checks if a datetime falls within this window.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Checks if an interval overlaps this window.
    ///
    /// Zero-length intervals overlap when their instant is inside the window.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if start == end {
            return self.contains(start);
        }
        start < self.end && end > self.start
    }
}
