//! RawEvent to Event conversion.
//!
//! Each record is converted on its own. A record that cannot be read yields
//! an [`EventParseError`] naming the source and the record id, and the rest
//! of the batch carries on.
//!
//! Conversion rules:
//! 1. A start with a timestamp is a timed event, even if a date is also set.
//!    Both ends are converted into the local zone.
//! 2. A start with only a date is an all-day event on that date.
//! 3. A blank summary becomes "No title"; blank locations and descriptions
//!    are treated as absent.

use chrono::{DateTime, NaiveDate, TimeZone};
use tracing::debug;

use daybrief_core::{Event, EventParseError, EventTime, ParseErrorKind};

use crate::raw_event::RawEvent;

/// Converts a [`RawEvent`] into an [`Event`] tagged with `source_name`.
///
/// Timestamps are converted into `tz`, the zone the agenda is rendered in.
///
/// # Errors
///
/// Returns an [`EventParseError`] if the start or end cannot be read, or if
/// a timed event ends before it starts.
pub fn normalize_event<Tz: TimeZone>(
    raw: &RawEvent,
    source_name: &str,
    tz: &Tz,
) -> Result<Event, EventParseError> {
    let fail = |kind| EventParseError::new(source_name, raw.id.clone(), kind);

    let time = convert_time(raw, tz).map_err(fail)?;

    let mut event = Event::new(raw.effective_summary(), time).with_source_name(source_name);

    if let Some(location) = non_blank(raw.location.as_deref()) {
        event = event.with_location(location);
    }

    if let Some(description) = non_blank(raw.description.as_deref()) {
        event = event.with_description(description);
    }

    Ok(event)
}

/// Converts a batch of raw events from one source.
///
/// Cancelled records are skipped silently. Returns the converted events in
/// input order together with one error per unreadable record.
pub fn normalize_events<Tz: TimeZone>(
    raw_events: &[RawEvent],
    source_name: &str,
    tz: &Tz,
) -> (Vec<Event>, Vec<EventParseError>) {
    let mut events = Vec::with_capacity(raw_events.len());
    let mut errors = Vec::new();

    for raw in raw_events {
        if raw.is_cancelled() {
            debug!(id = ?raw.id, source = source_name, "skipping cancelled event");
            continue;
        }
        match normalize_event(raw, source_name, tz) {
            Ok(event) => events.push(event),
            Err(err) => errors.push(err),
        }
    }

    (events, errors)
}

fn convert_time<Tz: TimeZone>(raw: &RawEvent, tz: &Tz) -> Result<EventTime, ParseErrorKind> {
    if let Some(ref start) = raw.start.date_time {
        let end = raw.end.date_time.as_ref().ok_or(ParseErrorKind::MissingEnd)?;
        let start = parse_timestamp(start)?.with_timezone(tz).fixed_offset();
        let end = parse_timestamp(end)?.with_timezone(tz).fixed_offset();
        return EventTime::timed(start, end).ok_or(ParseErrorKind::EndBeforeStart);
    }

    if let Some(ref date) = raw.start.date {
        return parse_date(date).map(EventTime::all_day);
    }

    Err(ParseErrorKind::MissingStart)
}

fn parse_timestamp(value: &str) -> Result<DateTime<chrono::FixedOffset>, ParseErrorKind> {
    DateTime::parse_from_rfc3339(value.trim())
        .map_err(|_| ParseErrorKind::InvalidTimestamp(value.to_string()))
}

fn parse_date(value: &str) -> Result<NaiveDate, ParseErrorKind> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ParseErrorKind::InvalidDate(value.to_string()))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
