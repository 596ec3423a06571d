//! Advisory request and delivery composition.
//!
//! The rendered agenda, together with journal summaries, feeds a generated
//! daily advisory. This module only builds the texts involved: the request
//! sent to the generator, the saved daily update, and the email message.
//! Talking to the generator and the mail server is left to the caller.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One context document, or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocument {
    /// Where the document was expected, used in placeholders.
    pub origin: String,
    /// The document text, or a read error message.
    pub content: Result<String, String>,
}

impl ContextDocument {
    /// A successfully read document.
    pub fn loaded(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            content: Ok(text.into()),
        }
    }

    /// A document that could not be read.
    pub fn unavailable(origin: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            content: Err(error.into()),
        }
    }

    /// The text to embed in a prompt.
    pub fn prompt_text(&self) -> String {
        match self.content {
            Ok(ref text) => text.clone(),
            Err(_) => format!("[Error reading {}]", self.origin),
        }
    }

    /// The read error, if any.
    pub fn error(&self) -> Option<&str> {
        self.content.as_ref().err().map(String::as_str)
    }
}

/// The context an advisory is generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocuments {
    /// Summary of recent journal entries.
    pub recent_summary: ContextDocument,
    /// Long-running life context.
    pub master_summary: ContextDocument,
    /// The rendered agenda.
    pub calendar: ContextDocument,
}

impl ContextDocuments {
    /// Documents that failed to load, as `(origin, error)` pairs.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        [&self.recent_summary, &self.master_summary, &self.calendar]
            .into_iter()
            .filter_map(|doc| doc.error().map(|e| (doc.origin.as_str(), e)))
            .collect()
    }
}

/// A request for a generated daily advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    /// Instructions framing the generator.
    pub system: String,
    /// The user message carrying the context.
    pub prompt: String,
}

impl AdvisoryRequest {
    /// Builds the request for `date` from the given context.
    pub fn build(date: NaiveDate, context: &ContextDocuments) -> Self {
        let system = format!(
            "You are a thoughtful daily advisor. Today is {}.",
            date.format("%A, %B %d, %Y")
        );

        let prompt = [
            "Based on the following information about my journal and calendar, please provide \
             thoughtful daily advice and insights. Focus on what's coming up today and this week, \
             any patterns you notice, and suggestions for making the most of the day ahead."
                .to_string(),
            format!("## Recent Summary\n{}", context.recent_summary.prompt_text()),
            format!(
                "## Calendar Today and This Week\n{}",
                context.calendar.prompt_text()
            ),
            format!(
                "## Current Life Context (Master Summary)\n{}",
                context.master_summary.prompt_text()
            ),
            [
                "Please provide:",
                "1. A brief reflection on recent patterns or themes",
                "2. Specific suggestions for today based on my calendar and current context",
                "3. Any insights about upcoming events or opportunities",
                "4. General advice for maintaining balance and making progress on important goals",
            ]
            .join("\n"),
            "Keep the response conversational, practical, and personally relevant. Focus on \
             actionable insights rather than generic advice."
                .to_string(),
        ]
        .join("\n\n");

        Self { system, prompt }
    }
}

/// An outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
}

/// A generated advisory for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyUpdate {
    /// The date the advisory is for.
    pub date: NaiveDate,
    /// The generated text.
    pub advice: String,
}

impl DailyUpdate {
    /// Wraps generated advice.
    pub fn new(date: NaiveDate, advice: impl Into<String>) -> Self {
        Self {
            date,
            advice: advice.into(),
        }
    }

    /// The document saved alongside the email.
    pub fn render(&self, generated_at: NaiveDateTime) -> String {
        format!(
            "# Daily Update - {}\n\n{}\n\n---\n*Generated on {}*",
            self.date.format("%Y-%m-%d"),
            self.advice,
            generated_at.format("%Y-%m-%d at %H:%M:%S")
        )
    }

    /// The email carrying the advice.
    pub fn email(&self) -> EmailMessage {
        EmailMessage {
            subject: format!("Daily Insights - {}", self.date.format("%Y-%m-%d")),
            body: self.advice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 5).unwrap()
    }

    fn context() -> ContextDocuments {
        ContextDocuments {
            recent_summary: ContextDocument::loaded("recent.md", "Slept well all week."),
            master_summary: ContextDocument::unavailable("master.md", "No such file"),
            calendar: ContextDocument::loaded("calendar.md", "# Calendar - 2025-02-05"),
        }
    }

    #[test]
    fn system_prompt_names_the_date() {
        let request = AdvisoryRequest::build(date(), &context());
        assert_eq!(
            request.system,
            "You are a thoughtful daily advisor. Today is Wednesday, February 05, 2025."
        );
    }

    #[test]
    fn prompt_embeds_each_document_under_its_heading() {
        let request = AdvisoryRequest::build(date(), &context());
        assert!(request
            .prompt
            .contains("## Recent Summary\nSlept well all week."));
        assert!(request
            .prompt
            .contains("## Calendar Today and This Week\n# Calendar - 2025-02-05"));
        assert!(request
            .prompt
            .contains("## Current Life Context (Master Summary)\n[Error reading master.md]"));
        assert!(request.prompt.contains("4. General advice"));
    }

    #[test]
    fn reports_failed_documents() {
        assert_eq!(context().failures(), vec![("master.md", "No such file")]);
    }

    #[test]
    fn daily_update_document_and_email() {
        let update = DailyUpdate::new(date(), "Take a walk at lunch.");
        let generated_at = date().and_hms_opt(6, 0, 5).unwrap();
        assert_eq!(
            update.render(generated_at),
            "# Daily Update - 2025-02-05\n\nTake a walk at lunch.\n\n---\n*Generated on 2025-02-05 at 06:00:05*"
        );

        let email = update.email();
        assert_eq!(email.subject, "Daily Insights - 2025-02-05");
        assert_eq!(email.body, "Take a walk at lunch.");
    }
}
