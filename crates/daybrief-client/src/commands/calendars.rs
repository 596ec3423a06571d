//! The `calendars` command.

use std::path::Path;

use daybrief_providers::{CalendarInfo, CalendarSource};

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// One catalog line: `  - <name> (ID: <id>)`.
pub fn catalog_line(calendar: &CalendarInfo) -> String {
    format!("  - {} (ID: {})", calendar.display_name(), calendar.id)
}

/// Lists the calendars the source offers, in catalog order.
pub async fn run(snapshot: Option<&Path>, config: &ClientConfig) -> ClientResult<()> {
    let source = super::open_source(snapshot, config)?;
    let calendars = source.list_calendars().await?;

    println!("Available calendars:");
    for calendar in &calendars {
        println!("{}", catalog_line(calendar));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_line_format() {
        let named = CalendarInfo::new("team@example.com", "Team");
        assert_eq!(catalog_line(&named), "  - Team (ID: team@example.com)");

        let unnamed = CalendarInfo::new("holidays@example.com", "");
        assert_eq!(
            catalog_line(&unnamed),
            "  - holidays@example.com (ID: holidays@example.com)"
        );
    }
}
