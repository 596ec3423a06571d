//! Core types: events, day ranges, timelines, agenda rendering

pub mod advisory;
pub mod error;
pub mod event;
pub mod format;
pub mod time;
pub mod timeline;
pub mod tracing;

pub use advisory::{AdvisoryRequest, ContextDocument, ContextDocuments, DailyUpdate, EmailMessage};
pub use error::{EventParseError, ParseErrorKind, SourceResolutionError, SyncIssue};
pub use event::{DEFAULT_SUMMARY, Event, PRIMARY_SOURCE_NAME};
pub use format::{
    AgendaFormatter, DescriptionBudget, Excerpt, RenderOptions, day_label, excerpt,
    format_time_range,
};
pub use time::{EventTime, SyncRange, TimeWindow};
pub use timeline::{Timeline, TimelineEntry, sort_events};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
