//! Issues reported while assembling an agenda.
//!
//! None of these abort a run. They are collected alongside the events that
//! did make it through, and the caller decides whether a partial agenda is
//! acceptable.

use std::fmt;

use thiserror::Error;

/// A requested source specification did not match any known calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("calendar '{spec}' not found")]
pub struct SourceResolutionError {
    /// The specification as the user wrote it.
    pub spec: String,
}

impl SourceResolutionError {
    /// Creates a new resolution error for the given spec.
    pub fn new(spec: impl Into<String>) -> Self {
        Self { spec: spec.into() }
    }
}

/// Why a raw event record could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The record has neither a date nor a timestamp for its start.
    MissingStart,
    /// A timed record has no timestamp for its end.
    MissingEnd,
    /// A date-only value is not `YYYY-MM-DD`.
    InvalidDate(String),
    /// A timestamp is not RFC 3339 with an offset.
    InvalidTimestamp(String),
    /// A timed record ends before it starts.
    EndBeforeStart,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "no start date or time"),
            Self::MissingEnd => write!(f, "timed event has no end time"),
            Self::InvalidDate(value) => write!(f, "invalid date '{}'", value),
            Self::InvalidTimestamp(value) => write!(f, "invalid timestamp '{}'", value),
            Self::EndBeforeStart => write!(f, "event ends before it starts"),
        }
    }
}

/// A single raw record that could not be turned into an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skipping event {} from '{source_name}': {kind}", .event_id.as_deref().unwrap_or("<no id>"))]
pub struct EventParseError {
    /// Display name of the source the record came from.
    pub source_name: String,
    /// Provider identifier of the record, when it has one.
    pub event_id: Option<String>,
    /// What was wrong with the record.
    pub kind: ParseErrorKind,
}

impl EventParseError {
    /// Creates a new parse error.
    pub fn new(
        source_name: impl Into<String>,
        event_id: Option<String>,
        kind: ParseErrorKind,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            event_id,
            kind,
        }
    }
}

/// Anything that went wrong in a run without stopping it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncIssue {
    /// A source spec matched nothing; its events are missing.
    #[error(transparent)]
    SourceResolution(#[from] SourceResolutionError),

    /// A record was dropped from the timeline.
    #[error(transparent)]
    EventParse(#[from] EventParseError),

    /// Fetching a resolved source failed; its events are missing.
    #[error("failed to fetch calendar '{source_name}': {message}")]
    SourceFetch {
        /// Display name of the source.
        source_name: String,
        /// The underlying failure.
        message: String,
    },

    /// The list of available calendars could not be retrieved.
    #[error("failed to list calendars: {message}")]
    CatalogUnavailable {
        /// The underlying failure.
        message: String,
    },
}

impl SyncIssue {
    /// Returns true if the issue cost the run a whole source.
    pub fn drops_source(&self) -> bool {
        matches!(self, Self::SourceResolution(_) | Self::SourceFetch { .. })
    }
}
