//! Ordering events and bucketing them into days.
//!
//! [`sort_events`] puts merged events in chronological order, and
//! [`Timeline::build`] files them under every date of a [`SyncRange`],
//! producing one [`TimelineEntry`] per day whether or not it has events.

use chrono::NaiveDate;
use tracing::debug;

use crate::event::Event;
use crate::time::SyncRange;

/// Sorts events by effective start.
///
/// The sort is stable: events starting at the same instant keep the order
/// they were merged in (source order, then fetch order).
pub fn sort_events(events: &mut [Event]) {
    events.sort_by_key(Event::effective_start);
}

/// One calendar day and the events filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry<'a> {
    /// The calendar date.
    pub date: NaiveDate,
    /// Events on this date, in sorted order. Empty for a free day.
    pub events: Vec<&'a Event>,
    /// Whether this is the distinguished "today" entry.
    pub is_today: bool,
}

impl TimelineEntry<'_> {
    /// Returns true if nothing is scheduled on this day.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A contiguous run of days around "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline<'a> {
    /// The distinguished date.
    pub today: NaiveDate,
    /// The range the timeline covers.
    pub range: SyncRange,
    /// One entry per date of the range, ascending.
    pub entries: Vec<TimelineEntry<'a>>,
}

impl<'a> Timeline<'a> {
    /// Partitions sorted events into the days of `range`.
    ///
    /// Every date in `[today - days_before, today + days_ahead]` gets an
    /// entry. Events whose effective date is outside the range are left out.
    pub fn build(events: &'a [Event], today: NaiveDate, range: SyncRange) -> Self {
        let mut entries: Vec<TimelineEntry<'a>> = range
            .dates(today)
            .map(|date| TimelineEntry {
                date,
                events: Vec::new(),
                is_today: date == today,
            })
            .collect();

        let first = range.first_date(today);
        let mut outside = 0usize;
        for event in events {
            let offset = (event.effective_date() - first).num_days();
            match usize::try_from(offset).ok().and_then(|i| entries.get_mut(i)) {
                Some(entry) => entry.events.push(event),
                None => outside += 1,
            }
        }

        if outside > 0 {
            debug!(outside, "events outside the agenda range were left out");
        }

        Self {
            today,
            range,
            entries,
        }
    }

    /// The entry for today.
    pub fn today_entry(&self) -> Option<&TimelineEntry<'a>> {
        self.entries.iter().find(|e| e.is_today)
    }

    /// Total number of events across all days.
    pub fn event_count(&self) -> usize {
        self.entries.iter().map(|e| e.events.len()).sum()
    }
}
