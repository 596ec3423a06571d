//! The `sync` command: fetch, merge, render, write.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use tracing::{info, warn};

use daybrief_core::{AgendaFormatter, SyncIssue, SyncRange, Timeline};
use daybrief_providers::{CalendarSource, SourceSpec, collect_events};

use crate::cli::SyncArgs;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Where the rendered agenda goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Print to stdout.
    Stdout,
    /// Write to this file, creating parent directories.
    File(PathBuf),
}

/// Settings for one sync run, after merging flags over config.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    pub specs: Vec<SourceSpec>,
    pub range: SyncRange,
    /// Render only today in the day layout.
    pub today_only: bool,
    pub destination: Destination,
    pub strict: bool,
    /// Limit for each request to the calendar source.
    pub timeout: Duration,
}

impl SyncPlan {
    /// Builds a plan; flags win over config values.
    pub fn new(args: &SyncArgs, config: &ClientConfig) -> Self {
        let agenda = &config.agenda;

        let specs = if args.calendars.is_empty() {
            agenda.calendars.clone()
        } else {
            SourceSpec::parse_list(&args.calendars)
        };

        let range = if args.today {
            SyncRange::today_only()
        } else {
            let configured = agenda.range();
            SyncRange::new(
                args.days_before.unwrap_or(configured.days_before),
                args.days_ahead.unwrap_or(configured.days_ahead),
            )
        };

        let destination = if args.stdout {
            Destination::Stdout
        } else {
            let dir = args.output.as_ref().unwrap_or(&agenda.output_dir);
            Destination::File(dir.join(&agenda.file_name))
        };

        Self {
            specs,
            range,
            today_only: args.today,
            destination,
            strict: args.strict,
            timeout: Duration::from_secs(args.timeout.unwrap_or(config.source.timeout)),
        }
    }
}

/// A rendered agenda and what went wrong producing it.
#[derive(Debug)]
pub struct AgendaReport {
    pub document: String,
    /// Events fetched across all calendars, including days not rendered.
    pub event_count: usize,
    /// Names of the calendars that were fetched.
    pub calendars: Vec<String>,
    pub issues: Vec<SyncIssue>,
}

impl AgendaReport {
    /// Number of calendars missing from the agenda.
    pub fn dropped_calendars(&self) -> usize {
        self.issues.iter().filter(|issue| issue.drops_source()).count()
    }
}

/// Fetches the planned calendars and renders the agenda as of `now`.
///
/// The days and the generation stamp are taken in `now`'s zone.
pub async fn build_agenda<Tz: TimeZone>(
    source: &dyn CalendarSource,
    plan: &SyncPlan,
    now: DateTime<Tz>,
) -> AgendaReport {
    let tz = now.timezone();
    let today = now.date_naive();
    let generated_at = now.naive_local();
    let window = plan.range.fetch_window(today, &tz);

    let outcome = collect_events(source, &plan.specs, &window, &tz, plan.timeout).await;

    let timeline = Timeline::build(&outcome.events, today, plan.range);
    let formatter = AgendaFormatter::with_defaults();
    let document = if plan.today_only {
        let events = timeline
            .today_entry()
            .map(|entry| entry.events.as_slice())
            .unwrap_or_default();
        formatter.render_day(today, events, generated_at)
    } else {
        formatter.render_agenda(&timeline, generated_at)
    };

    AgendaReport {
        document,
        event_count: outcome.events.len(),
        calendars: outcome
            .sources
            .into_iter()
            .map(|source| source.display_name)
            .collect(),
        issues: outcome.issues,
    }
}

/// Runs `sync`.
pub async fn run(args: &SyncArgs, config: &ClientConfig) -> ClientResult<()> {
    let source = super::open_source(args.snapshot.as_deref(), config)?;
    let plan = SyncPlan::new(args, config);
    info!(
        calendars = plan.specs.len(),
        days_before = plan.range.days_before,
        days_ahead = plan.range.days_ahead,
        "syncing"
    );

    let report = build_agenda(&source, &plan, Local::now()).await;
    info!(calendars = ?report.calendars, events = report.event_count, "fetched");

    match plan.destination {
        Destination::Stdout => print!("{}", report.document),
        Destination::File(ref path) => {
            super::write_document(path, &report.document)?;
            println!("Saved calendar to {}", path.display());
            println!("Sync completed! Found {} events.", report.event_count);
        }
    }

    if !report.issues.is_empty() {
        warn!(
            issues = report.issues.len(),
            dropped_calendars = report.dropped_calendars(),
            "sync finished with issues"
        );
        if plan.strict {
            return Err(ClientError::Issues(report.issues.len()));
        }
    }

    Ok(())
}
