//! Subcommand implementations.

pub mod brief;
pub mod calendars;
pub mod config;
pub mod sync;

use std::path::Path;

use daybrief_providers::FileSource;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Opens the calendar source, preferring a path given on the command line.
pub(crate) fn open_source(
    override_path: Option<&Path>,
    config: &ClientConfig,
) -> ClientResult<FileSource> {
    let path = override_path
        .or(config.source.snapshot.as_deref())
        .ok_or_else(|| {
            ClientError::config(format!(
                "no calendar source configured. Add to {}:\n  \
                 [source]\n  \
                 snapshot = \"calendars.json\"\n\n  \
                 Or pass --snapshot <path>",
                ClientConfig::default_path().display()
            ))
        })?;

    Ok(FileSource::load(path)?)
}

/// Writes a document, creating its directory if needed.
pub(crate) fn write_document(path: &Path, document: &str) -> ClientResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_document_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/calendar.md");

        write_document(&path, "# Calendar\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Calendar\n");
    }

    #[test]
    fn open_source_needs_a_snapshot() {
        let err = open_source(None, &ClientConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no calendar source configured"));
    }
}
