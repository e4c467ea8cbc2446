use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// XDG app name used for the user-level config directory.
pub const APP_NAME: &str = "tvsched";

/// File names probed in the working directory, in order.
const LOCAL_CANDIDATES: &[&str] = &["config.toml", "config.json"];

/// User-level config file (`~/.config/tvsched/config.toml` on Linux).
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Pick the config file to load.
///
/// An explicit path always wins (relative paths are taken from `cwd`).
/// Otherwise `config.toml` then `config.json` in `cwd`, then the user-level
/// config file.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    resolve_with_user_path(explicit, cwd, user_config_path())
}

fn resolve_with_user_path(
    explicit: Option<&Path>,
    cwd: &Path,
    user_path: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        });
    }

    for name in LOCAL_CANDIDATES {
        let candidate = cwd.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    match user_path {
        Some(path) if path.is_file() => Ok(path),
        _ => bail!(
            "No configuration found (looked for {} in {}). Pass --config.",
            LOCAL_CANDIDATES.join(", "),
            cwd.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_relative_path_joins_cwd() {
        let dir = tempdir().unwrap();
        let path =
            resolve_with_user_path(Some(Path::new("my.toml")), dir.path(), None).unwrap();
        assert_eq!(path, dir.path().join("my.toml"));
    }

    #[test]
    fn test_explicit_absolute_path_kept() {
        let dir = tempdir().unwrap();
        let abs = dir.path().join("abs.json");
        let path = resolve_with_user_path(Some(&abs), Path::new("/elsewhere"), None).unwrap();
        assert_eq!(path, abs);
    }

    #[test]
    fn test_prefers_toml_over_json() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        let path = resolve_with_user_path(None, dir.path(), None).unwrap();
        assert_eq!(path, dir.path().join("config.toml"));
    }

    #[test]
    fn test_falls_back_to_json() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        let path = resolve_with_user_path(None, dir.path(), None).unwrap();
        assert_eq!(path, dir.path().join("config.json"));
    }

    #[test]
    fn test_falls_back_to_user_config() {
        let cwd = tempdir().unwrap();
        let home = tempdir().unwrap();
        let user = home.path().join("config.toml");
        std::fs::write(&user, "").unwrap();
        let path = resolve_with_user_path(None, cwd.path(), Some(user.clone())).unwrap();
        assert_eq!(path, user);
    }

    #[test]
    fn test_nothing_found_is_error() {
        let cwd = tempdir().unwrap();
        let err = resolve_with_user_path(None, cwd.path(), None).unwrap_err();
        assert!(err.to_string().contains("No configuration found"));
    }
}
