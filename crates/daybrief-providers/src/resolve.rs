//! Source specs and their resolution against a calendar catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use daybrief_core::{PRIMARY_SOURCE_NAME, SourceResolutionError};

use crate::provider::{CalendarInfo, PRIMARY_CALENDAR_ID};

/// A user's reference to a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceSpec {
    /// The account's main calendar.
    Primary,
    /// A calendar named by its id or its display name.
    Named(String),
}

impl SourceSpec {
    /// Parses a spec. Exactly `primary` means the main calendar; anything
    /// else is looked up by id or name.
    pub fn parse(spec: &str) -> Self {
        if spec == PRIMARY_CALENDAR_ID {
            Self::Primary
        } else {
            Self::Named(spec.to_string())
        }
    }

    /// Returns true for the main calendar.
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Primary)
    }

    /// Parses a list of specs, defaulting to the main calendar when empty.
    pub fn parse_list<S: AsRef<str>>(specs: &[S]) -> Vec<Self> {
        if specs.is_empty() {
            return vec![Self::Primary];
        }
        specs.iter().map(|s| Self::parse(s.as_ref())).collect()
    }
}

impl FromStr for SourceSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for SourceSpec {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<SourceSpec> for String {
    fn from(spec: SourceSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str(PRIMARY_CALENDAR_ID),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// A spec matched to a concrete calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// The id to fetch events with.
    pub calendar_id: String,
    /// The name events from this calendar are tagged with.
    pub display_name: String,
}

impl ResolvedSource {
    /// The account's main calendar.
    pub fn primary() -> Self {
        Self {
            calendar_id: PRIMARY_CALENDAR_ID.to_string(),
            display_name: PRIMARY_SOURCE_NAME.to_string(),
        }
    }
}

/// Resolves a spec against the calendar catalog.
///
/// The main calendar always resolves, even without a catalog. A named spec
/// matches a calendar whose id equals it or whose name equals it ignoring
/// case; the first match in catalog order wins.
///
/// # Errors
///
/// Returns [`SourceResolutionError`] if a named spec matches nothing.
pub fn resolve(
    spec: &SourceSpec,
    catalog: &[CalendarInfo],
) -> Result<ResolvedSource, SourceResolutionError> {
    let wanted = match spec {
        SourceSpec::Primary => return Ok(ResolvedSource::primary()),
        SourceSpec::Named(wanted) => wanted,
    };

    let wanted_lower = wanted.to_lowercase();
    catalog
        .iter()
        .find(|cal| cal.id == *wanted || cal.name.to_lowercase() == wanted_lower)
        .map(|cal| ResolvedSource {
            calendar_id: cal.id.clone(),
            display_name: cal.display_name().to_string(),
        })
        .ok_or_else(|| SourceResolutionError::new(wanted.as_str()))
}
