//! Raw event type from calendar sources.
//!
//! [`RawEvent`] mirrors the event resource of the Google Calendar API: the
//! start and end each carry either a date-only value (all-day events) or an
//! RFC 3339 timestamp. Nothing is parsed here; the normalizer turns a raw
//! record into a [`daybrief_core::Event`] and reports records it cannot read.

use serde::{Deserialize, Serialize};

use daybrief_core::DEFAULT_SUMMARY;

/// The start or end of a raw event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    /// Date-only value (`YYYY-MM-DD`) for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// RFC 3339 timestamp with offset for timed events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// IANA zone the event was created in. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl RawEventTime {
    /// A date-only value.
    pub fn date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// A timestamp value.
    pub fn date_time(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            ..Self::default()
        }
    }
}

/// A raw calendar event from a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Identifier within the source, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The event title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// The event description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The event location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// The event status (e.g., "confirmed", "tentative", "cancelled").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// When the event starts.
    #[serde(default)]
    pub start: RawEventTime,

    /// When the event ends.
    #[serde(default)]
    pub end: RawEventTime,
}

impl RawEvent {
    /// Creates a timed raw event from two timestamps.
    pub fn timed(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: RawEventTime::date_time(start),
            end: RawEventTime::date_time(end),
            ..Self::default()
        }
    }

    /// Creates an all-day raw event. The end is the following date, as the
    /// Google API reports it.
    pub fn all_day(date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start: RawEventTime::date(date),
            end: RawEventTime::date(end_date),
            ..Self::default()
        }
    }

    /// Returns the title, falling back to "No title" if missing or blank.
    pub fn effective_summary(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SUMMARY)
    }

    /// Returns true if the event is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.eq_ignore_ascii_case("cancelled"))
    }

    /// Builder method to set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_summary_falls_back() {
        let event = RawEvent::timed("2025-02-05T09:00:00Z", "2025-02-05T09:30:00Z");
        assert_eq!(event.effective_summary(), "No title");

        let event = event.with_summary("   ");
        assert_eq!(event.effective_summary(), "No title");

        let event = event.with_summary("Standup");
        assert_eq!(event.effective_summary(), "Standup");
    }

    #[test]
    fn cancelled_status() {
        let event = RawEvent::all_day("2025-02-05", "2025-02-06").with_status("Cancelled");
        assert!(event.is_cancelled());
        assert!(!RawEvent::default().is_cancelled());
    }

    #[test]
    fn parses_google_event_json() {
        let json = r#"{
            "id": "evt1",
            "summary": "Team Meeting",
            "location": "Room 101",
            "status": "confirmed",
            "start": {"dateTime": "2025-02-05T10:00:00-05:00", "timeZone": "America/New_York"},
            "end": {"dateTime": "2025-02-05T11:00:00-05:00"},
            "htmlLink": "https://calendar.google.com/event?eid=abc"
        }"#;

        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id.as_deref(), Some("evt1"));
        assert_eq!(event.location.as_deref(), Some("Room 101"));
        assert_eq!(
            event.start.date_time.as_deref(),
            Some("2025-02-05T10:00:00-05:00")
        );
        assert_eq!(event.start.time_zone.as_deref(), Some("America/New_York"));
        assert!(event.description.is_none());
    }

    #[test]
    fn parses_all_day_json_without_end() {
        let json = r#"{"summary": "Holiday", "start": {"date": "2025-02-05"}}"#;
        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.start, RawEventTime::date("2025-02-05"));
        assert_eq!(event.end, RawEventTime::default());
    }
}
