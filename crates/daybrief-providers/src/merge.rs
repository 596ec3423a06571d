//! Gathering events from several calendars into one list.

use std::future::Future;
use std::time::Duration;

use chrono::TimeZone;
use tracing::{debug, info, warn};

use daybrief_core::{Event, SyncIssue, TimeWindow, sort_events};

use crate::error::{ProviderError, ProviderResult};
use crate::normalize::normalize_events;
use crate::provider::{CalendarInfo, CalendarSource};
use crate::resolve::{ResolvedSource, SourceSpec, resolve};

/// The events from one resolved calendar.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    /// The calendar the events came from.
    pub source: ResolvedSource,
    /// The normalized events, in the order the calendar returned them.
    pub events: Vec<Event>,
}

/// Everything a multi-calendar fetch produced.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Events from all calendars, sorted by effective start.
    pub events: Vec<Event>,
    /// Calendars that were fetched, in spec order.
    pub sources: Vec<ResolvedSource>,
    /// Problems that did not stop the run.
    pub issues: Vec<SyncIssue>,
}

/// Concatenates batches in the order given.
///
/// Duplicates are kept: the same meeting on two calendars shows up twice,
/// once per calendar.
pub fn merge_batches(batches: Vec<SourceBatch>) -> Vec<Event> {
    batches.into_iter().flat_map(|batch| batch.events).collect()
}

/// Fetches and normalizes every calendar named by `specs`.
///
/// The catalog is listed once, and only when a named spec needs it. If it
/// cannot be listed, only the main calendar resolves. Failures to resolve
/// or fetch a calendar drop that calendar and are recorded as issues; the
/// other calendars are still fetched. An empty `specs` means the main
/// calendar only.
///
/// Each request to `source` gets `request_timeout`. A calendar that does
/// not answer in time counts as a failed fetch.
pub async fn collect_events<Tz: TimeZone>(
    source: &dyn CalendarSource,
    specs: &[SourceSpec],
    window: &TimeWindow,
    tz: &Tz,
    request_timeout: Duration,
) -> MergeOutcome {
    let default_specs = [SourceSpec::Primary];
    let specs = if specs.is_empty() { &default_specs[..] } else { specs };

    let mut outcome = MergeOutcome::default();
    let catalog = load_catalog(source, specs, request_timeout, &mut outcome.issues).await;

    let mut batches = Vec::with_capacity(specs.len());
    for spec in specs {
        let resolved = match resolve(spec, &catalog) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(spec = %spec, "{err}");
                outcome.issues.push(err.into());
                continue;
            }
        };

        info!(
            calendar = %resolved.display_name,
            id = %resolved.calendar_id,
            "fetching calendar"
        );

        let fetch = source.fetch_events(&resolved.calendar_id, window);
        let raws = match with_timeout(request_timeout, fetch).await {
            Ok(raws) => raws,
            Err(err) => {
                warn!(calendar = %resolved.display_name, error = %err, "failed to fetch calendar");
                outcome.issues.push(SyncIssue::SourceFetch {
                    source_name: resolved.display_name.clone(),
                    message: err.to_string(),
                });
                continue;
            }
        };

        let (events, errors) = normalize_events(&raws, &resolved.display_name, tz);
        debug!(
            calendar = %resolved.display_name,
            events = events.len(),
            skipped = errors.len(),
            "normalized calendar"
        );
        for err in errors {
            warn!("{err}");
            outcome.issues.push(err.into());
        }

        outcome.sources.push(resolved.clone());
        batches.push(SourceBatch {
            source: resolved,
            events,
        });
    }

    outcome.events = merge_batches(batches);
    sort_events(&mut outcome.events);
    outcome
}

async fn with_timeout<T>(
    limit: Duration,
    request: impl Future<Output = ProviderResult<T>>,
) -> ProviderResult<T> {
    tokio::time::timeout(limit, request)
        .await
        .unwrap_or_else(|_| Err(ProviderError::network(format!("request timeout after {limit:?}"))))
}

async fn load_catalog(
    source: &dyn CalendarSource,
    specs: &[SourceSpec],
    request_timeout: Duration,
    issues: &mut Vec<SyncIssue>,
) -> Vec<CalendarInfo> {
    if specs.iter().all(SourceSpec::is_primary) {
        return Vec::new();
    }

    match with_timeout(request_timeout, source.list_calendars()).await {
        Ok(catalog) => {
            debug!(count = catalog.len(), "listed calendars");
            catalog
        }
        Err(err) => {
            warn!(error = %err, "failed to list calendars");
            issues.push(SyncIssue::CatalogUnavailable {
                message: err.to_string(),
            });
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{FixedOffset, NaiveDate, Utc};

    use crate::provider::BoxFuture;
    use crate::raw_event::RawEvent;

    /// In-memory account with an optional broken catalog, or a broken or
    /// stalled calendar.
    #[derive(Default)]
    struct FakeSource {
        calendars: Vec<CalendarInfo>,
        events: HashMap<String, Vec<RawEvent>>,
        catalog_broken: bool,
        broken_calendar: Option<String>,
        stalled_calendar: Option<String>,
        catalog_calls: AtomicUsize,
    }

    impl FakeSource {
        fn with_calendar(mut self, id: &str, name: &str, events: Vec<RawEvent>) -> Self {
            self.calendars.push(CalendarInfo::new(id, name));
            self.events.insert(id.to_string(), events);
            self
        }
    }

    impl CalendarSource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }

        fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarInfo>>> {
            self.catalog_calls.fetch_add(1, Ordering::SeqCst);
            let result = if self.catalog_broken {
                Err(ProviderError::network("connection reset"))
            } else {
                Ok(self.calendars.clone())
            };
            Box::pin(async move { result })
        }

        fn fetch_events<'a>(
            &'a self,
            calendar_id: &'a str,
            _window: &'a TimeWindow,
        ) -> BoxFuture<'a, ProviderResult<Vec<RawEvent>>> {
            Box::pin(async move {
                if self.stalled_calendar.as_deref() == Some(calendar_id) {
                    std::future::pending::<()>().await;
                }
                if self.broken_calendar.as_deref() == Some(calendar_id) {
                    return Err(ProviderError::network("timed out"));
                }
                self.events
                    .get(calendar_id)
                    .cloned()
                    .ok_or_else(|| ProviderError::not_found(calendar_id))
            })
        }
    }

    fn eastern() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn window() -> TimeWindow {
        let now = Utc::now();
        TimeWindow::new(now, now)
    }

    fn specs(names: &[&str]) -> Vec<SourceSpec> {
        SourceSpec::parse_list(names)
    }

    async fn collect(source: &FakeSource, names: &[&str]) -> MergeOutcome {
        collect_events(source, &specs(names), &window(), &eastern(), TIMEOUT).await
    }

    fn account() -> FakeSource {
        FakeSource::default()
            .with_calendar(
                "primary",
                "me@example.com",
                vec![
                    RawEvent::timed("2025-02-05T14:00:00Z", "2025-02-05T14:30:00Z")
                        .with_summary("Standup"),
                ],
            )
            .with_calendar(
                "team@example.com",
                "Team",
                vec![RawEvent::all_day("2025-02-05", "2025-02-06").with_summary("Offsite")],
            )
    }

    #[tokio::test]
    async fn merges_and_sorts_across_calendars() {
        let source = account();
        let outcome = collect(&source, &["primary", "Team"]).await;

        assert!(outcome.issues.is_empty());
        let merged: Vec<_> = outcome
            .events
            .iter()
            .map(|e| (e.summary.as_str(), e.source_name.as_str()))
            .collect();
        assert_eq!(merged, vec![("Offsite", "Team"), ("Standup", "Primary")]);
        assert_eq!(outcome.sources.len(), 2);
    }

    #[tokio::test]
    async fn primary_only_skips_catalog() {
        let source = account();
        let outcome = collect(&source, &[]).await;

        assert_eq!(source.catalog_calls.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.sources, vec![ResolvedSource::primary()]);
    }

    #[tokio::test]
    async fn unresolved_spec_is_reported_and_skipped() {
        let source = account();
        let outcome = collect(&source, &["Book Club", "Team"]).await;

        assert_eq!(source.catalog_calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].to_string(), "calendar 'Book Club' not found");
    }

    #[tokio::test]
    async fn broken_catalog_leaves_primary() {
        let source = FakeSource {
            catalog_broken: true,
            ..account()
        };
        let outcome = collect(&source, &["primary", "Team"]).await;

        assert_eq!(outcome.events.len(), 1);
        assert!(matches!(
            outcome.issues[0],
            SyncIssue::CatalogUnavailable { .. }
        ));
        assert!(matches!(outcome.issues[1], SyncIssue::SourceResolution(_)));
    }

    #[tokio::test]
    async fn fetch_failure_drops_one_calendar() {
        let source = FakeSource {
            broken_calendar: Some("team@example.com".into()),
            ..account()
        };
        let outcome = collect(&source, &["Team", "primary"]).await;

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].summary, "Standup");
        assert_eq!(
            outcome.issues,
            vec![SyncIssue::SourceFetch {
                source_name: "Team".into(),
                message: "network_error: timed out".into(),
            }]
        );
    }

    #[tokio::test]
    async fn stalled_calendar_times_out_alone() {
        let source = FakeSource {
            stalled_calendar: Some("team@example.com".into()),
            ..account()
        };
        let outcome = collect_events(
            &source,
            &specs(&["primary", "Team"]),
            &window(),
            &eastern(),
            Duration::from_millis(50),
        )
        .await;

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].summary, "Standup");
        assert_eq!(outcome.sources, vec![ResolvedSource::primary()]);
        assert_eq!(
            outcome.issues,
            vec![SyncIssue::SourceFetch {
                source_name: "Team".into(),
                message: "network_error: request timeout after 50ms".into(),
            }]
        );
    }

    #[tokio::test]
    async fn parse_errors_keep_the_rest_of_the_calendar() {
        let source = FakeSource::default().with_calendar(
            "primary",
            "",
            vec![
                RawEvent::default().with_id("broken"),
                RawEvent::all_day("2025-02-05", "2025-02-06").with_summary("Holiday"),
            ],
        );
        let outcome = collect(&source, &[]).await;

        assert_eq!(outcome.events.len(), 1);
        assert!(matches!(outcome.issues[0], SyncIssue::EventParse(_)));
    }

    #[test]
    fn merge_keeps_duplicates_in_batch_order() {
        let day = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
        let event = |source: &str| {
            Event::new("All hands", daybrief_core::EventTime::all_day(day)).with_source_name(source)
        };
        let batch = |name: &str| SourceBatch {
            source: ResolvedSource {
                calendar_id: name.to_lowercase(),
                display_name: name.to_string(),
            },
            events: vec![event(name)],
        };

        let merged = merge_batches(vec![batch("Primary"), batch("Team")]);

        let sources: Vec<_> = merged.iter().map(|e| e.source_name.as_str()).collect();
        assert_eq!(sources, vec!["Primary", "Team"]);
    }
}
