//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/daybrief/config.toml` by default. Every section is optional:
//!
//! ```toml
//! [agenda]
//! days_before = 3
//! days_ahead = 7
//! calendars = ["primary", "Team"]
//! output_dir = "data"
//! file_name = "calendar.md"
//!
//! [source]
//! snapshot = "calendars.json"
//!
//! [advisory]
//! recent_summary = "summaries/recent-summary.md"
//! master_summary = "summaries/master-summary.md"
//! calendar = "data/calendar.md"
//! output = "advice/latest_daily_update.md"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use daybrief_core::SyncRange;
use daybrief_providers::SourceSpec;

use crate::error::{ClientError, ClientResult};

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the daybrief client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// What to sync and where to write it.
    pub agenda: AgendaSettings,

    /// Where calendars are read from.
    pub source: SourceSettings,

    /// Inputs and output of the daily advisory.
    pub advisory: AdvisorySettings,
}

/// Agenda settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaSettings {
    /// Days before today to include.
    pub days_before: u32,

    /// Days after today to include.
    pub days_ahead: u32,

    /// Calendars to merge, by id or name. `primary` is the main calendar.
    pub calendars: Vec<SourceSpec>,

    /// Directory the agenda is written to.
    pub output_dir: PathBuf,

    /// File name of the agenda inside `output_dir`.
    pub file_name: String,
}

impl Default for AgendaSettings {
    fn default() -> Self {
        let range = SyncRange::default();
        Self {
            days_before: range.days_before,
            days_ahead: range.days_ahead,
            calendars: vec![SourceSpec::Primary],
            output_dir: PathBuf::from("data"),
            file_name: "calendar.md".to_string(),
        }
    }
}

impl AgendaSettings {
    /// The configured day range.
    pub fn range(&self) -> SyncRange {
        SyncRange::new(self.days_before, self.days_ahead)
    }

    /// Full path of the agenda file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

/// Calendar source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Path to a JSON calendar snapshot.
    pub snapshot: Option<PathBuf>,

    /// Fetch timeout in seconds.
    pub timeout: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            snapshot: None,
            timeout: 30,
        }
    }
}

/// Daily advisory settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorySettings {
    /// Summary of recent journal entries.
    pub recent_summary: Option<PathBuf>,

    /// Long-running life context.
    pub master_summary: Option<PathBuf>,

    /// Rendered agenda. Defaults to the agenda output path.
    pub calendar: Option<PathBuf>,

    /// Where the daily update document is saved.
    pub output: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> ClientResult<Self> {
        toml::from_str(content)
            .map_err(|e| ClientError::config(format!("failed to parse config: {}", e)))
    }

    /// Checks values that parse but cannot work.
    pub fn validate(&self) -> ClientResult<()> {
        if self.agenda.calendars.is_empty() {
            return Err(ClientError::config(
                "[agenda] calendars must not be empty",
            ));
        }
        if self.agenda.file_name.trim().is_empty() {
            return Err(ClientError::config("[agenda] file_name must not be empty"));
        }
        if self.source.timeout == 0 {
            return Err(ClientError::config("[source] timeout must be positive"));
        }
        if let Some(ref snapshot) = self.source.snapshot {
            if !snapshot.exists() {
                return Err(ClientError::config(format!(
                    "[source] snapshot {} does not exist",
                    snapshot.display()
                )));
            }
        }
        Ok(())
    }

    /// The rendered agenda the advisory reads.
    pub fn advisory_calendar_path(&self) -> PathBuf {
        self.advisory
            .calendar
            .clone()
            .unwrap_or_else(|| self.agenda.output_path())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daybrief")
    }
}
