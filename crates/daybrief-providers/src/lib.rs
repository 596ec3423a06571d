//! Calendar sources and the pipeline from raw records to a merged event list.
//!
//! - [`CalendarSource`] - The trait calendar accounts implement
//! - [`RawEvent`] - Source records in the Google Calendar API shape
//! - [`normalize_event`] - Converts one raw record into an [`Event`]
//! - [`resolve`] - Matches a [`SourceSpec`] against the calendar catalog
//! - [`collect_events`] - Fetches, normalizes and merges several calendars
//! - [`FileSource`] - A source replayed from a JSON snapshot
//!
//! # Architecture
//!
//! ```text
//!  specs ──resolve()──► ResolvedSource ──fetch_events()──► Vec<RawEvent>
//!                                                               │
//!                                              normalize_events()
//!                                                               ▼
//!                       MergeOutcome ◄──merge_batches()── Vec<Event> per calendar
//! ```
//!
//! [`Event`]: daybrief_core::Event

pub mod error;
pub mod file_source;
pub mod merge;
pub mod normalize;
pub mod provider;
pub mod raw_event;
pub mod resolve;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use file_source::{CalendarSnapshot, FileSource};
pub use merge::{MergeOutcome, SourceBatch, collect_events, merge_batches};
pub use normalize::{normalize_event, normalize_events};
pub use provider::{BoxFuture, CalendarInfo, CalendarSource, PRIMARY_CALENDAR_ID};
pub use raw_event::{RawEvent, RawEventTime};
pub use resolve::{ResolvedSource, SourceSpec, resolve};
