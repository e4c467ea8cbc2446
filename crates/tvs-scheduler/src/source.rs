//! Resolve a group's source into a fresh snapshot of item identifiers.

use std::path::Path;
use tracing::{trace, warn};
use tvs_config::SourceSpec;
use tvs_core::ProduceError;

/// Ordered item identifiers read from a source for one selection call.
pub type Snapshot = Vec<String>;

/// Read the current candidates of `source`.
///
/// Directory sources are re-listed on every call. An unreadable directory is
/// [`ProduceError::SourceUnavailable`]; a readable source with no entries is
/// [`ProduceError::Empty`].
pub fn resolve(source: &SourceSpec) -> Result<Snapshot, ProduceError> {
    let snapshot = match source {
        SourceSpec::Directory { path, .. } => list_directory(path)?,
        SourceSpec::Paths { items, .. } => items.clone(),
    };

    if snapshot.is_empty() {
        return Err(ProduceError::Empty {
            location: source.location(),
        });
    }
    Ok(snapshot)
}

/// Directory entries as full paths, ordered by file name.
///
/// Entries whose path is not valid UTF-8 are skipped: they cannot be sent
/// to the player over JSON IPC.
fn list_directory(dir: &Path) -> Result<Snapshot, ProduceError> {
    let unavailable = |source: std::io::Error| ProduceError::SourceUnavailable {
        location: dir.display().to_string(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unavailable)? {
        names.push(entry.map_err(unavailable)?.file_name());
    }
    names.sort();

    trace!(dir = %dir.display(), entries = names.len(), "Listed directory");
    Ok(names
        .into_iter()
        .filter_map(|name| match dir.join(name).into_os_string().into_string() {
            Ok(path) => Some(path),
            Err(raw) => {
                warn!(path = ?raw, "Skipping entry with non UTF-8 path");
                None
            }
        })
        .collect())
}
