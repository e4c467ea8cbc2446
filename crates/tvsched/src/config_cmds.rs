use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use tvs_config::{SchedulerConfig, resolve_config_path};
use tvs_core::types::OutputFormat;

/// Resolve and load the config the user asked for.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<(PathBuf, SchedulerConfig)> {
    let cwd = std::env::current_dir()?;
    let path = resolve_config_path(explicit, &cwd)?;
    debug!(path = %path.display(), "Config file");
    let config = SchedulerConfig::load(&path)?;
    Ok((path, config))
}

pub(crate) fn handle_config_validate(explicit: Option<&Path>, format: OutputFormat) -> Result<()> {
    let (path, config) = load_config(explicit)?;
    let conflicts = config.priority_conflicts();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": path,
                "valid": true,
                "groups": config.groups.len(),
                "priority_conflicts": conflicts,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for c in &conflicts {
                eprintln!(
                    "WARNING: groups '{}' and '{}' both have priority {}",
                    c.first, c.second, c.priority
                );
            }
            println!(
                "{}: OK ({} group{})",
                path.display(),
                config.groups.len(),
                if config.groups.len() == 1 { "" } else { "s" }
            );
        }
    }
    Ok(())
}

pub(crate) fn handle_config_show(explicit: Option<&Path>, format: OutputFormat) -> Result<()> {
    let (_, config) = load_config(explicit)?;

    match format {
        OutputFormat::Json => {
            let json_str = serde_json::to_string_pretty(&config)?;
            println!("{}", json_str);
        }
        OutputFormat::Text => {
            let toml_str = toml::to_string_pretty(&config)?;
            print!("{}", toml_str);
        }
    }
    Ok(())
}
