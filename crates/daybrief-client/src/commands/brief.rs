//! The `brief` command: prepare the daily advisory or save its result.
//!
//! Generating the advice and mailing it are done by other tools; this
//! command prints the request for the generator and, given the generated
//! text back, saves the daily update and prints the email to send.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use daybrief_core::{AdvisoryRequest, ContextDocument, ContextDocuments, DailyUpdate};

use crate::cli::BriefArgs;
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Reads one context document. Unset or unreadable paths become
/// placeholders.
fn read_document(setting: &str, path: Option<&Path>) -> ContextDocument {
    let Some(path) = path else {
        return ContextDocument::unavailable(setting, "not configured");
    };

    let origin = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(text) => ContextDocument::loaded(origin, text),
        Err(e) => ContextDocument::unavailable(origin, e.to_string()),
    }
}

/// Reads the advisory context named by the config.
pub fn load_context(config: &ClientConfig) -> ContextDocuments {
    let advisory = &config.advisory;
    let calendar: PathBuf = config.advisory_calendar_path();

    ContextDocuments {
        recent_summary: read_document("recent_summary", advisory.recent_summary.as_deref()),
        master_summary: read_document("master_summary", advisory.master_summary.as_deref()),
        calendar: read_document("calendar", Some(&calendar)),
    }
}

/// Formats a request for display.
pub fn format_request(request: &AdvisoryRequest) -> String {
    format!("# System\n\n{}\n\n# Prompt\n\n{}\n", request.system, request.prompt)
}

/// Runs `brief`.
pub fn run(args: &BriefArgs, config: &ClientConfig) -> ClientResult<()> {
    let now = Local::now();
    let date: NaiveDate = args.date.unwrap_or_else(|| now.date_naive());

    if let Some(ref advice_path) = args.advice {
        let advice = std::fs::read_to_string(advice_path)?;
        let update = DailyUpdate::new(date, advice.trim());

        match config.advisory.output {
            Some(ref output) => {
                super::write_document(output, &update.render(now.naive_local()))?;
                println!("Daily update saved to {}", output.display());
            }
            None => info!("no [advisory] output set, daily update not saved"),
        }

        let email = update.email();
        println!("Subject: {}\n\n{}", email.subject, email.body);
        return Ok(());
    }

    let context = load_context(config);
    for (origin, error) in context.failures() {
        warn!(document = origin, error, "context document unavailable");
    }

    print!("{}", format_request(&AdvisoryRequest::build(date, &context)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_configured_documents() {
        let dir = tempfile::tempdir().unwrap();
        let recent = dir.path().join("recent.md");
        let calendar = dir.path().join("calendar.md");
        std::fs::write(&recent, "Busy week.").unwrap();
        std::fs::write(&calendar, "# Calendar - 2025-02-05\n").unwrap();

        let mut config = ClientConfig::default();
        config.advisory.recent_summary = Some(recent);
        config.advisory.master_summary = Some(dir.path().join("missing.md"));
        config.advisory.calendar = Some(calendar);

        let context = load_context(&config);

        assert_eq!(context.recent_summary.content, Ok("Busy week.".to_string()));
        assert!(context.master_summary.content.is_err());
        assert_eq!(
            context.calendar.prompt_text(),
            "# Calendar - 2025-02-05\n"
        );
        assert_eq!(context.failures().len(), 1);
    }

    #[test]
    fn unset_documents_are_placeholders() {
        let mut config = ClientConfig::default();
        config.advisory.calendar = Some(PathBuf::from("/nonexistent/calendar.md"));

        let context = load_context(&config);

        assert_eq!(
            context.recent_summary.prompt_text(),
            "[Error reading recent_summary]"
        );
        assert_eq!(context.failures().len(), 3);
    }

    #[test]
    fn request_layout() {
        let request = AdvisoryRequest {
            system: "sys".into(),
            prompt: "ask".into(),
        };
        assert_eq!(format_request(&request), "# System\n\nsys\n\n# Prompt\n\nask\n");
    }
}
