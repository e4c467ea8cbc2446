use std::path::{Path, PathBuf};
use tvs_core::{ConfigError, TraversalOrder};

use crate::config::{
    GroupSpec, RawConfig, RawDirectory, RawGroup, RawPaths, SchedulerConfig, SourceSpec,
    UNNAMED_GROUP,
};

impl RawConfig {
    /// Validate every group and stable-sort them by ascending priority.
    ///
    /// `base_dir` anchors relative directory sources and the history file.
    /// The first invalid group aborts validation.
    pub fn validate(self, base_dir: Option<&Path>) -> Result<SchedulerConfig, ConfigError> {
        let mut groups = self
            .groups
            .into_iter()
            .map(|g| validate_group(g, base_dir))
            .collect::<Result<Vec<_>, _>>()?;

        // Stable: equal priorities keep file order.
        groups.sort_by_key(|g| g.priority);

        Ok(SchedulerConfig {
            history_file: self.history_file.map(|p| anchor(p, base_dir)),
            player: self.player,
            groups,
        })
    }
}

fn validate_group(raw: RawGroup, base_dir: Option<&Path>) -> Result<GroupSpec, ConfigError> {
    let name = match raw.name {
        Some(n) if !n.trim().is_empty() => n,
        _ => UNNAMED_GROUP.to_string(),
    };

    let Some(priority) = raw.priority else {
        return Err(ConfigError::MissingPriority { group: name });
    };

    let source = match (raw.dir, raw.paths) {
        (Some(dir), None) => validate_directory(&name, dir, base_dir)?,
        (None, Some(paths)) => validate_paths(&name, paths)?,
        (dir, paths) => {
            return Err(ConfigError::SourceCount {
                group: name,
                found: usize::from(dir.is_some()) + usize::from(paths.is_some()),
            });
        }
    };

    Ok(GroupSpec {
        name,
        priority,
        source,
    })
}

fn validate_directory(
    group: &str,
    dir: RawDirectory,
    base_dir: Option<&Path>,
) -> Result<SourceSpec, ConfigError> {
    Ok(SourceSpec::Directory {
        path: anchor(dir.path, base_dir),
        order: validate_order(group, dir.order.as_deref())?,
    })
}

fn validate_paths(group: &str, paths: RawPaths) -> Result<SourceSpec, ConfigError> {
    Ok(SourceSpec::Paths {
        items: paths.items,
        order: validate_order(group, paths.order.as_deref())?,
    })
}

fn validate_order(group: &str, raw: Option<&str>) -> Result<TraversalOrder, ConfigError> {
    let raw = raw.unwrap_or_default();
    TraversalOrder::parse_keyword(raw).ok_or_else(|| ConfigError::InvalidOrder {
        group: group.to_string(),
        value: raw.to_string(),
    })
}

fn anchor(path: PathBuf, base_dir: Option<&Path>) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() && !base.as_os_str().is_empty() => base.join(path),
        _ => path,
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
