//! Markdown rendering of agendas.
//!
//! Two layouts are provided:
//! - **Agenda**: one section per day of a [`Timeline`], today emphasized and
//!   shown with description excerpts. All-day and timed events interleave in
//!   chronological order (all-day events sort at midnight).
//! - **Day**: a single date split into an `## All Day` section followed by a
//!   `## Schedule` section.
//!
//! Documents are assembled as a list of lines and joined once. Rendering is
//! a pure function of its inputs: the same timeline and generation time
//! always give the same bytes.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use daybrief_core::format::AgendaFormatter;
//! use daybrief_core::{SyncRange, Timeline};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
//! let timeline = Timeline::build(&[], today, SyncRange::today_only());
//! let generated_at = today.and_hms_opt(7, 30, 0).unwrap();
//!
//! let doc = AgendaFormatter::with_defaults().render_agenda(&timeline, generated_at);
//! assert!(doc.contains("## **TODAY** - Wednesday, February 05"));
//! assert!(doc.contains("No events scheduled."));
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::time::EventTime;
use crate::timeline::{Timeline, TimelineEntry};

/// Line shown under a day with nothing scheduled.
pub const NO_EVENTS_TEXT: &str = "No events scheduled.";

/// Marker appended when a description was cut short.
pub const ELLIPSIS: &str = "...";

/// Label used for all-day events in place of a time range.
pub const ALL_DAY_LABEL: &str = "All day";

const DESCRIPTION_INDENT: &str = "  ";

/// How much of a description may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionBudget {
    /// Characters of the raw description considered.
    pub max_chars: usize,
    /// Non-blank lines rendered.
    pub max_lines: usize,
}

impl DescriptionBudget {
    /// Budget for today's events in the multi-day agenda.
    pub const AGENDA: Self = Self {
        max_chars: 200,
        max_lines: 2,
    };

    /// Budget for timed events in the single-day layout.
    pub const SCHEDULE: Self = Self {
        max_chars: 200,
        max_lines: 3,
    };

    /// Budget for all-day events in the single-day layout.
    pub const ALL_DAY: Self = Self {
        max_chars: 100,
        max_lines: 1,
    };
}

/// The visible part of a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    /// Non-blank lines, trimmed, at most `max_lines` of them.
    pub lines: Vec<String>,
    /// Whether anything was cut.
    pub truncated: bool,
}

/// Cuts a description down to a budget.
///
/// Only the first `max_chars` characters are considered. Blank lines are
/// skipped and kept lines are trimmed. The excerpt is marked truncated when
/// the text was longer than `max_chars` or had more non-blank lines than
/// `max_lines`.
pub fn excerpt(description: &str, budget: DescriptionBudget) -> Excerpt {
    let over_chars = description.chars().count() > budget.max_chars;
    let budgeted: String = description.chars().take(budget.max_chars).collect();

    let mut lines: Vec<String> = budgeted
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let over_lines = lines.len() > budget.max_lines;
    lines.truncate(budget.max_lines);

    Excerpt {
        lines,
        truncated: over_chars || over_lines,
    }
}

/// Formats the time part of an event line.
///
/// All-day events read `All day`. Timed events use a 12-hour clock without
/// a leading zero (`9:00 AM - 9:30 AM`), and both ends get a month/day
/// prefix when the event crosses midnight.
pub fn format_time_range(time: &EventTime) -> String {
    match time {
        EventTime::AllDay(_) => ALL_DAY_LABEL.to_string(),
        EventTime::Timed { start, end } => {
            let pattern = if time.spans_days() {
                "%b %d %-I:%M %p"
            } else {
                "%-I:%M %p"
            };
            format!("{} - {}", clock(start, pattern), clock(end, pattern))
        }
    }
}

fn clock(dt: &DateTime<FixedOffset>, pattern: &str) -> String {
    dt.format(pattern).to_string()
}

/// Formats a day heading label, e.g. `Wednesday, February 05`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%A, %B %d").to_string()
}

/// Configuration for agenda rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Description budget for today's events in the agenda layout.
    pub agenda_description: DescriptionBudget,
    /// Description budget for timed events in the day layout.
    pub schedule_description: DescriptionBudget,
    /// Description budget for all-day events in the day layout.
    pub all_day_description: DescriptionBudget,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            agenda_description: DescriptionBudget::AGENDA,
            schedule_description: DescriptionBudget::SCHEDULE,
            all_day_description: DescriptionBudget::ALL_DAY,
        }
    }
}

/// Renders timelines into markdown documents.
#[derive(Debug, Clone)]
pub struct AgendaFormatter {
    options: RenderOptions,
}

impl AgendaFormatter {
    /// Creates a new AgendaFormatter with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Creates a new AgendaFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(RenderOptions::default())
    }

    /// Renders the multi-day agenda as text.
    pub fn render_agenda(&self, timeline: &Timeline<'_>, generated_at: NaiveDateTime) -> String {
        finish(self.agenda_lines(timeline, generated_at))
    }

    /// Builds the multi-day agenda as a list of lines.
    pub fn agenda_lines(
        &self,
        timeline: &Timeline<'_>,
        generated_at: NaiveDateTime,
    ) -> Vec<String> {
        let mut sections = vec![vec![title_line(timeline.today)]];
        sections.extend(timeline.entries.iter().map(|entry| self.day_section(entry)));
        sections.push(footer(generated_at));
        join_sections(sections)
    }

    fn day_section(&self, entry: &TimelineEntry<'_>) -> Vec<String> {
        let heading = if entry.is_today {
            format!("## **TODAY** - {}", day_label(entry.date))
        } else {
            format!("## {}", day_label(entry.date))
        };

        let mut lines = vec![heading, String::new()];
        if entry.is_empty() {
            lines.push(NO_EVENTS_TEXT.to_string());
            return lines;
        }

        for event in &entry.events {
            lines.push(agenda_event_line(event));
            if entry.is_today {
                if let Some(ref description) = event.description {
                    lines.extend(excerpt_lines(&excerpt(
                        description,
                        self.options.agenda_description,
                    )));
                }
            }
        }
        lines
    }

    /// Renders a single day split into all-day and timed sections.
    pub fn render_day(
        &self,
        date: NaiveDate,
        events: &[&Event],
        generated_at: NaiveDateTime,
    ) -> String {
        finish(self.day_lines(date, events, generated_at))
    }

    /// Builds the single-day layout as a list of lines.
    ///
    /// A day with no events is just the title and a placeholder, with no
    /// footer.
    pub fn day_lines(
        &self,
        date: NaiveDate,
        events: &[&Event],
        generated_at: NaiveDateTime,
    ) -> Vec<String> {
        if events.is_empty() {
            return join_sections(vec![
                vec![title_line(date)],
                vec![NO_EVENTS_TEXT.to_string()],
            ]);
        }

        let (all_day, timed): (Vec<&Event>, Vec<&Event>) =
            events.iter().copied().partition(|e| e.is_all_day());

        let mut sections = vec![vec![title_line(date)]];

        if !all_day.is_empty() {
            let mut lines = vec!["## All Day".to_string(), String::new()];
            for event in all_day {
                lines.push(all_day_line(event));
                if let Some(ref description) = event.description {
                    let cut = excerpt(description, self.options.all_day_description);
                    if let Some(first) = cut.lines.first() {
                        let marker = if cut.truncated { ELLIPSIS } else { "" };
                        lines.push(format!("{DESCRIPTION_INDENT}{first}{marker}"));
                    }
                }
            }
            sections.push(lines);
        }

        if !timed.is_empty() {
            let mut lines = vec!["## Schedule".to_string(), String::new()];
            for event in timed {
                lines.push(schedule_line(event));
                if let Some(ref description) = event.description {
                    lines.extend(excerpt_lines(&excerpt(
                        description,
                        self.options.schedule_description,
                    )));
                }
            }
            sections.push(lines);
        }

        sections.push(footer(generated_at));
        join_sections(sections)
    }
}

impl Default for AgendaFormatter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn title_line(date: NaiveDate) -> String {
    format!("# Calendar - {}", date.format("%Y-%m-%d"))
}

fn footer(generated_at: NaiveDateTime) -> Vec<String> {
    vec![
        "---".to_string(),
        format!("*Synced on {}*", generated_at.format("%Y-%m-%d at %H:%M:%S")),
    ]
}

/// `- **<time>**: <summary> [<source>] @ <location>`
fn agenda_event_line(event: &Event) -> String {
    let mut line = schedule_line_head(event);
    if !event.is_primary_source() {
        line.push_str(&format!(" [{}]", event.source_name));
    }
    push_location(&mut line, event);
    line
}

/// `- **<time>**: <summary> @ <location>`
fn schedule_line(event: &Event) -> String {
    let mut line = schedule_line_head(event);
    push_location(&mut line, event);
    line
}

/// `- **<summary>** @ <location>`
fn all_day_line(event: &Event) -> String {
    let mut line = format!("- **{}**", event.summary);
    push_location(&mut line, event);
    line
}

fn schedule_line_head(event: &Event) -> String {
    format!("- **{}**: {}", format_time_range(&event.time), event.summary)
}

fn push_location(line: &mut String, event: &Event) {
    if let Some(ref location) = event.location {
        line.push_str(&format!(" @ {}", location));
    }
}

fn excerpt_lines(cut: &Excerpt) -> Vec<String> {
    cut.lines
        .iter()
        .map(|line| format!("{DESCRIPTION_INDENT}{line}"))
        .chain(cut.truncated.then(|| format!("{DESCRIPTION_INDENT}{ELLIPSIS}")))
        .collect()
}

/// Joins sections with a blank line between each.
fn join_sections(sections: Vec<Vec<String>>) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(section);
    }
    lines
}

fn finish(lines: Vec<String>) -> String {
    let mut doc = lines.join("\n");
    doc.push('\n');
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::SyncRange;
    use chrono::TimeZone;

    fn tz() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn at(d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(2025, 2, d, h, min, 0).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    fn generated_at() -> NaiveDateTime {
        date(5).and_hms_opt(7, 30, 0).unwrap()
    }

    fn timed(title: &str, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Event {
        Event::new(title, EventTime::timed(start, end).unwrap())
    }

    mod excerpt_tests {
        use super::*;

        #[test]
        fn short_text_unchanged() {
            let cut = excerpt("Bring slides", DescriptionBudget::AGENDA);
            assert_eq!(cut.lines, vec!["Bring slides"]);
            assert!(!cut.truncated);
        }

        #[test]
        fn skips_blank_lines_and_trims() {
            let cut = excerpt("  first  \n\n   \n\tsecond\n", DescriptionBudget::AGENDA);
            assert_eq!(cut.lines, vec!["first", "second"]);
            assert!(!cut.truncated);
        }

        #[test]
        fn too_many_lines_is_truncated() {
            let cut = excerpt("one\ntwo\nthree", DescriptionBudget::AGENDA);
            assert_eq!(cut.lines, vec!["one", "two"]);
            assert!(cut.truncated);
        }

        #[test]
        fn too_many_chars_is_truncated() {
            let long = "x".repeat(250);
            let cut = excerpt(&long, DescriptionBudget::AGENDA);
            assert_eq!(cut.lines, vec!["x".repeat(200)]);
            assert!(cut.truncated);
        }

        #[test]
        fn exact_budget_is_not_truncated() {
            let exact = "y".repeat(200);
            let cut = excerpt(&exact, DescriptionBudget::AGENDA);
            assert!(!cut.truncated);
        }

        #[test]
        fn counts_characters_not_bytes() {
            let text = "é".repeat(150);
            let cut = excerpt(&text, DescriptionBudget::AGENDA);
            assert!(!cut.truncated);
            assert_eq!(cut.lines[0].chars().count(), 150);
        }

        #[test]
        fn never_exceeds_budget() {
            let text = format!("{}\n{}\n{}", "a".repeat(90), "b".repeat(90), "c".repeat(90));
            let cut = excerpt(&text, DescriptionBudget::AGENDA);
            let shown: usize = cut.lines.iter().map(|l| l.chars().count()).sum();
            assert!(shown <= 200);
            assert!(cut.lines.len() <= 2);
            assert!(cut.truncated);
        }
    }

    mod time_range {
        use super::*;

        #[test]
        fn all_day() {
            assert_eq!(format_time_range(&EventTime::all_day(date(5))), "All day");
        }

        #[test]
        fn same_day_twelve_hour_clock() {
            let et = EventTime::timed(at(5, 9, 0), at(5, 9, 30)).unwrap();
            assert_eq!(format_time_range(&et), "9:00 AM - 9:30 AM");

            let et = EventTime::timed(at(5, 12, 15), at(5, 13, 5)).unwrap();
            assert_eq!(format_time_range(&et), "12:15 PM - 1:05 PM");

            let et = EventTime::timed(at(5, 0, 0), at(5, 0, 45)).unwrap();
            assert_eq!(format_time_range(&et), "12:00 AM - 12:45 AM");
        }

        #[test]
        fn crossing_midnight_adds_dates() {
            let et = EventTime::timed(at(5, 23, 0), at(6, 1, 30)).unwrap();
            assert_eq!(format_time_range(&et), "Feb 05 11:00 PM - Feb 06 1:30 AM");
        }
    }

    mod agenda {
        use super::*;

        #[test]
        fn event_line_tags_non_primary_sources() {
            let event = timed("Review", at(5, 14, 0), at(5, 15, 0))
                .with_source_name("Team")
                .with_location("Room 4");
            assert_eq!(
                agenda_event_line(&event),
                "- **2:00 PM - 3:00 PM**: Review [Team] @ Room 4"
            );

            let event = timed("Review", at(5, 14, 0), at(5, 15, 0));
            assert_eq!(agenda_event_line(&event), "- **2:00 PM - 3:00 PM**: Review");
        }

        #[test]
        fn descriptions_only_for_today() {
            let events = vec![
                timed("Yesterday", at(4, 9, 0), at(4, 10, 0)).with_description("hidden"),
                timed("Today", at(5, 9, 0), at(5, 10, 0)).with_description("shown"),
            ];
            let timeline = Timeline::build(&events, date(5), SyncRange::new(1, 0));
            let lines = AgendaFormatter::with_defaults().agenda_lines(&timeline, generated_at());

            assert!(lines.contains(&"  shown".to_string()));
            assert!(!lines.iter().any(|l| l.contains("hidden")));
        }

        #[test]
        fn truncated_description_ends_with_marker() {
            let events = vec![
                timed("Today", at(5, 9, 0), at(5, 10, 0)).with_description("a\nb\nc"),
            ];
            let timeline = Timeline::build(&events, date(5), SyncRange::today_only());
            let lines = AgendaFormatter::with_defaults().agenda_lines(&timeline, generated_at());
            let event_at = lines.iter().position(|l| l.starts_with("- **")).unwrap();
            assert_eq!(&lines[event_at + 1..event_at + 4], &["  a", "  b", "  ..."]);
        }

        #[test]
        fn rendering_is_idempotent() {
            let events = vec![
                timed("Standup", at(5, 9, 0), at(5, 9, 30)).with_description("notes"),
                Event::new("Offsite", EventTime::all_day(date(6))).with_source_name("Team"),
            ];
            let timeline = Timeline::build(&events, date(5), SyncRange::new(3, 7));
            let formatter = AgendaFormatter::with_defaults();
            assert_eq!(
                formatter.render_agenda(&timeline, generated_at()),
                formatter.render_agenda(&timeline, generated_at())
            );
        }

        #[test]
        fn every_day_gets_a_heading() {
            let timeline = Timeline::build(&[], date(5), SyncRange::new(3, 7));
            let doc = AgendaFormatter::with_defaults().render_agenda(&timeline, generated_at());
            assert_eq!(doc.matches("\n## ").count(), 11);
            assert_eq!(doc.matches(NO_EVENTS_TEXT).count(), 11);
            assert_eq!(doc.matches("## **TODAY**").count(), 1);
            assert!(doc.ends_with("*Synced on 2025-02-05 at 07:30:00*\n"));
        }
    }

    mod day_layout {
        use super::*;

        #[test]
        fn empty_day_has_no_footer() {
            let doc = AgendaFormatter::with_defaults().render_day(date(5), &[], generated_at());
            assert_eq!(doc, "# Calendar - 2025-02-05\n\nNo events scheduled.\n");
        }

        #[test]
        fn all_day_description_is_cut_inline() {
            let event = Event::new("Conference", EventTime::all_day(date(5)))
                .with_description("z".repeat(120));
            let lines =
                AgendaFormatter::with_defaults().day_lines(date(5), &[&event], generated_at());
            let expected = format!("  {}...", "z".repeat(100));
            assert!(lines.contains(&expected));
        }

        #[test]
        fn only_timed_events_skip_all_day_section() {
            let event = timed("Standup", at(5, 9, 0), at(5, 9, 30));
            let lines =
                AgendaFormatter::with_defaults().day_lines(date(5), &[&event], generated_at());
            assert!(!lines.contains(&"## All Day".to_string()));
            assert!(lines.contains(&"## Schedule".to_string()));
        }
    }
}
