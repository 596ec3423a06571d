//! CalendarSource trait definition.
//!
//! A [`CalendarSource`] is an account with several calendars: it can list
//! them and return the raw events of one calendar within a time window.
//! Authentication, paging and retries are the implementation's business.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use daybrief_core::TimeWindow;

use crate::error::ProviderResult;
use crate::raw_event::RawEvent;

/// Identifier every account uses for its main calendar.
pub const PRIMARY_CALENDAR_ID: &str = "primary";

/// Information about a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInfo {
    /// Unique identifier for the calendar.
    pub id: String,
    /// Human-readable name of the calendar. May be empty.
    #[serde(rename = "summary", default)]
    pub name: String,
}

impl CalendarInfo {
    /// Creates a new CalendarInfo with the given ID and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The name to show for this calendar: its name, or its id if unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A boxed future for async trait methods.
///
/// Boxing keeps the trait object-safe so callers can hold a
/// `&dyn CalendarSource`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The core abstraction for calendar accounts.
///
/// # Example Implementation
///
/// ```ignore
/// struct GoogleSource {
///     client: reqwest::Client,
/// }
///
/// impl CalendarSource for GoogleSource {
///     fn name(&self) -> &str { "google" }
///
///     fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarInfo>>> {
///         Box::pin(async move {
///             // GET /users/me/calendarList
///             Ok(calendars)
///         })
///     }
///     // ... fetch_events
/// }
/// ```
pub trait CalendarSource: Send + Sync {
    /// Returns the name/type of this source (e.g., "file", "google").
    fn name(&self) -> &str;

    /// Lists the calendars the account can read.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the catalog cannot be retrieved.
    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarInfo>>>;

    /// Fetches the raw events of one calendar that overlap `window`.
    ///
    /// Recurring events are expected as individual instances. Records are
    /// returned as-is; malformed ones are reported later by the normalizer.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the calendar does not exist or cannot be
    /// read.
    fn fetch_events<'a>(
        &'a self,
        calendar_id: &'a str,
        window: &'a TimeWindow,
    ) -> BoxFuture<'a, ProviderResult<Vec<RawEvent>>>;
}
