use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tvs_core::TraversalOrder;

/// Name given to groups that do not set one.
pub const UNNAMED_GROUP: &str = "<unnamed group>";

/// On-disk format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Config as written by the user, before validation.
///
/// Every field that validation needs to reject is optional here so that a
/// missing value surfaces as a [`tvs_core::ConfigError`] rather than a
/// generic parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub history_file: Option<PathBuf>,
    #[serde(default)]
    pub player: PlayerConfig,
    /// `configs` is the key used by the legacy JSON layout.
    #[serde(default, alias = "configs")]
    pub groups: Vec<RawGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGroup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default, alias = "directory")]
    pub dir: Option<RawDirectory>,
    #[serde(default)]
    pub paths: Option<RawPaths>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDirectory {
    pub path: PathBuf,
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPaths {
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub order: Option<String>,
}

/// Where a group draws its candidates from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceSpec {
    /// Entries of a directory, read fresh on every selection.
    Directory { path: PathBuf, order: TraversalOrder },
    /// A fixed list of item identifiers (paths or URLs).
    Paths {
        items: Vec<String>,
        order: TraversalOrder,
    },
}

impl SourceSpec {
    pub fn order(&self) -> TraversalOrder {
        match self {
            Self::Directory { order, .. } | Self::Paths { order, .. } => *order,
        }
    }

    /// Human-readable location, used in logs and error messages.
    pub fn location(&self) -> String {
        match self {
            Self::Directory { path, .. } => path.display().to_string(),
            Self::Paths { items, .. } => format!("<{} listed paths>", items.len()),
        }
    }
}

/// A validated group. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSpec {
    pub name: String,
    pub priority: i64,
    pub source: SourceSpec,
}

/// Two groups that share a priority value. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityConflict {
    pub priority: i64,
    pub first: String,
    pub second: String,
}

/// Settings for the external media player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_executable")]
    pub executable: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
    /// Directory that holds the player's IPC socket.
    #[serde(default = "default_socket_dir")]
    pub socket_dir: PathBuf,
}

fn default_player_executable() -> String {
    "mpv".to_string()
}

fn default_socket_dir() -> PathBuf {
    std::env::temp_dir()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            executable: default_player_executable(),
            extra_args: Vec::new(),
            socket_dir: default_socket_dir(),
        }
    }
}

/// Validated configuration: groups are sorted by ascending priority.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
    pub player: PlayerConfig,
    pub groups: Vec<GroupSpec>,
}

impl SchedulerConfig {
    /// Load, validate and priority-sort the config at `path`.
    ///
    /// Relative directory sources and the history file are resolved against
    /// the directory containing `path`. Priority conflicts are logged.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::parse(&content, ConfigFormat::from_path(path), path.parent())
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        config.warn_priority_conflicts();
        debug!(groups = config.groups.len(), "Config loaded");
        Ok(config)
    }

    /// Parse and validate config text without touching the filesystem.
    pub fn parse(content: &str, format: ConfigFormat, base_dir: Option<&Path>) -> Result<Self> {
        let raw: RawConfig = match format {
            ConfigFormat::Toml => toml::from_str(content).context("Failed to parse TOML config")?,
            ConfigFormat::Json => {
                serde_json::from_str(content).context("Failed to parse JSON config")?
            }
        };
        Ok(raw.validate(base_dir)?)
    }

    /// Pairs of adjacent groups (in priority order) sharing a priority.
    pub fn priority_conflicts(&self) -> Vec<PriorityConflict> {
        self.groups
            .windows(2)
            .filter(|pair| pair[0].priority == pair[1].priority)
            .map(|pair| PriorityConflict {
                priority: pair[0].priority,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            })
            .collect()
    }

    fn warn_priority_conflicts(&self) {
        for conflict in self.priority_conflicts() {
            warn!(
                priority = conflict.priority,
                first = %conflict.first,
                second = %conflict.second,
                "Groups share the same priority; keeping file order"
            );
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
