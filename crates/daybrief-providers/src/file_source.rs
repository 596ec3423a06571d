//! A calendar account read from a JSON snapshot.
//!
//! The snapshot uses the Google Calendar API shapes, so an export of
//! `calendarList` and `events` responses can be replayed offline:
//!
//! ```json
//! {
//!   "calendars": [{"id": "team@example.com", "summary": "Team"}],
//!   "events": {
//!     "primary": [{"summary": "Standup", "start": {"dateTime": "..."}, "end": {"dateTime": "..."}}],
//!     "team@example.com": []
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use daybrief_core::TimeWindow;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, CalendarInfo, CalendarSource};
use crate::raw_event::RawEvent;

const PROVIDER_NAME: &str = "file";

/// The on-disk snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSnapshot {
    /// The calendar catalog, in display order.
    #[serde(default)]
    pub calendars: Vec<CalendarInfo>,
    /// Raw events keyed by calendar id.
    #[serde(default)]
    pub events: HashMap<String, Vec<RawEvent>>,
}

/// A [`CalendarSource`] backed by a [`CalendarSnapshot`].
#[derive(Debug, Clone)]
pub struct FileSource {
    snapshot: CalendarSnapshot,
}

impl FileSource {
    /// Wraps an in-memory snapshot.
    pub fn from_snapshot(snapshot: CalendarSnapshot) -> Self {
        Self { snapshot }
    }

    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an invalid response error if the JSON does not match the
    /// snapshot format.
    pub fn from_json(json: &str) -> ProviderResult<Self> {
        let snapshot = serde_json::from_str(json).map_err(|e| {
            ProviderError::invalid_response(format!("invalid calendar snapshot: {e}"))
                .with_provider(PROVIDER_NAME)
                .with_source(e)
        })?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Loads a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read, or an
    /// invalid response error if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> ProviderResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::configuration(format!(
                "failed to read calendar snapshot {}: {e}",
                path.display()
            ))
            .with_provider(PROVIDER_NAME)
            .with_source(e)
        })?;

        let source = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            calendars = source.snapshot.calendars.len(),
            "loaded calendar snapshot"
        );
        Ok(source)
    }
}

impl CalendarSource for FileSource {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarInfo>>> {
        let calendars = self.snapshot.calendars.clone();
        Box::pin(async move { Ok(calendars) })
    }

    fn fetch_events<'a>(
        &'a self,
        calendar_id: &'a str,
        window: &'a TimeWindow,
    ) -> BoxFuture<'a, ProviderResult<Vec<RawEvent>>> {
        Box::pin(async move {
            let events = self.snapshot.events.get(calendar_id).ok_or_else(|| {
                ProviderError::not_found(format!("no events recorded for calendar '{calendar_id}'"))
                    .with_provider(PROVIDER_NAME)
            })?;

            Ok(events
                .iter()
                .filter(|raw| may_overlap(raw, window))
                .cloned()
                .collect())
        })
    }
}

/// Window filter for snapshot records.
///
/// Unreadable records pass through so the normalizer can report them.
/// All-day records are compared by date with a day of slack on each side,
/// since the snapshot does not know the local zone; the timeline drops
/// whatever falls outside the rendered days.
fn may_overlap(raw: &RawEvent, window: &TimeWindow) -> bool {
    if let Some(ref start) = raw.start.date_time {
        let Some(start) = parse_utc(start) else {
            return true;
        };
        let end = raw
            .end
            .date_time
            .as_deref()
            .and_then(parse_utc)
            .unwrap_or(start);
        return window.overlaps(start, end.max(start));
    }

    if let Some(ref date) = raw.start.date {
        let Some(start) = parse_date(date) else {
            return true;
        };
        let end = raw.end.date.as_deref().and_then(parse_date).unwrap_or(start);
        let first = window.start.date_naive().checked_sub_days(Days::new(1));
        let last = window.end.date_naive().checked_add_days(Days::new(1));
        return first.is_none_or(|first| end.max(start) >= first)
            && last.is_none_or(|last| start <= last);
    }

    true
}

fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
