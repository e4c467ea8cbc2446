//! Scheduler configuration loading and validation (config.toml / config.json).

pub mod config;
pub mod paths;
pub mod validate;

pub use config::{
    ConfigFormat, GroupSpec, PlayerConfig, PriorityConflict, RawConfig, RawDirectory, RawGroup,
    RawPaths, SchedulerConfig, SourceSpec, UNNAMED_GROUP,
};
pub use paths::resolve_config_path;
