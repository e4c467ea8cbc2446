//! Append-only log of what was played.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;
use tvs_scheduler::Selection;

/// Writes one line per selection: `<RFC 3339 time>\t<group>\t<item>`.
///
/// Disabled when no path is configured. Write failures are logged and
/// swallowed so they never interfere with playback.
#[derive(Debug, Clone)]
pub(crate) struct HistoryLog {
    path: Option<PathBuf>,
}

impl HistoryLog {
    pub(crate) fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub(crate) fn record(&self, selection: &Selection) {
        self.record_at(Utc::now(), selection);
    }

    pub(crate) fn record_at(&self, at: DateTime<Utc>, selection: &Selection) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = append_line(path, &format_line(at, selection)) {
            warn!("Failed to write history: {e:#}");
        }
    }
}

fn format_line(at: DateTime<Utc>, selection: &Selection) -> String {
    format!(
        "{}\t{}\t{}\n",
        at.to_rfc3339_opts(SecondsFormat::Secs, true),
        selection.group,
        selection.item
    )
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open history file: {}", path.display()))?;
    file.write_all(line.as_bytes())
        .with_context(|| format!("Failed to append to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn selection(item: &str) -> Selection {
        Selection {
            item: item.to_string(),
            group: "shows".to_string(),
            index: 0,
        }
    }

    #[test]
    fn test_appends_lines_and_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("history.log");
        let log = HistoryLog::new(Some(path.clone()));
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        log.record_at(at, &selection("/srv/a.mkv"));
        log.record_at(at, &selection("/srv/b.mkv"));

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "2024-03-01T12:30:00Z\tshows\t/srv/a.mkv\n2024-03-01T12:30:00Z\tshows\t/srv/b.mkv\n"
        );
    }

    #[test]
    fn test_disabled_log_writes_nothing() {
        let dir = tempdir().unwrap();
        HistoryLog::new(None).record(&selection("x"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        let dir = tempdir().unwrap();
        // A directory where the file should be.
        let path = dir.path().join("history.log");
        std::fs::create_dir(&path).unwrap();
        HistoryLog::new(Some(path.clone())).record(&selection("x"));
        assert!(path.is_dir());
    }
}
