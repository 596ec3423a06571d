//! Event types for agenda building.
//!
//! [`Event`] is the provider-agnostic representation of one calendar entry
//! after normalization. Events are never mutated once built; the timeline
//! only reorders and regroups references to them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::time::EventTime;

/// Title used when a source record carries no summary.
pub const DEFAULT_SUMMARY: &str = "No title";

/// Display name of the default calendar source.
pub const PRIMARY_SOURCE_NAME: &str = "Primary";

/// A normalized calendar event from any source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The event title.
    pub summary: String,
    /// When the event takes place.
    pub time: EventTime,
    /// The event location, if any.
    pub location: Option<String>,
    /// The event description, if any.
    pub description: Option<String>,
    /// Display name of the calendar this event came from.
    pub source_name: String,
}

impl Event {
    /// Creates a new event belonging to the primary source.
    pub fn new(summary: impl Into<String>, time: EventTime) -> Self {
        Self {
            summary: summary.into(),
            time,
            location: None,
            description: None,
            source_name: PRIMARY_SOURCE_NAME.to_string(),
        }
    }

    /// Returns true if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.time.is_all_day()
    }

    /// Returns true if the event came from the default "Primary" source.
    pub fn is_primary_source(&self) -> bool {
        self.source_name == PRIMARY_SOURCE_NAME
    }

    /// See [`EventTime::effective_start`].
    pub fn effective_start(&self) -> NaiveDateTime {
        self.time.effective_start()
    }

    /// See [`EventTime::effective_date`].
    pub fn effective_date(&self) -> NaiveDate {
        self.time.effective_date()
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to tag the event with its source.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }
}
