//! Player process spawning and shutdown.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use tokio::process::{Child, Command};
use tracing::{debug, warn};
use tvs_config::PlayerConfig;

/// Locate the player executable on `PATH` (or accept an explicit path).
pub fn find_player(executable: &str) -> Result<PathBuf> {
    which::which(executable)
        .with_context(|| format!("Player '{executable}' is not installed or not on PATH"))
}

/// A fresh, unpredictable socket path inside `dir`.
pub fn socket_path(dir: &Path) -> PathBuf {
    let nonce: u32 = rand::rng().random();
    dir.join(format!("tvsched-mpv-{}-{nonce:08x}.sock", std::process::id()))
}

/// Build the command line that starts the player idle with IPC enabled.
pub(crate) fn player_command(program: &Path, config: &PlayerConfig, socket: &Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg("--idle")
        .arg(format!("--input-ipc-server={}", socket.display()))
        .args(&config.extra_args);
    cmd
}

/// Run the child in its own session and process group, so terminal
/// signals (Ctrl-C) reach only us and shutdown goes through [`terminate`].
pub(crate) fn isolate(cmd: &mut Command) {
    // SAFETY: setsid() is async-signal-safe and we call it before exec,
    // so no Rust runtime state exists in the child yet.
    #[cfg(unix)]
    unsafe {
        cmd.pre_exec(|| {
            libc::setsid();
            Ok(())
        });
    }
}

/// Spawn the player in idle mode listening on `socket`.
///
/// - Resolves the executable via [`find_player`]
/// - Stdin/stdout/stderr are detached from the terminal
/// - Isolates the player in its own process group (via setsid)
/// - Enables kill_on_drop as safety net
pub async fn spawn_player(config: &PlayerConfig, socket: &Path) -> Result<Child> {
    let program = find_player(&config.executable)?;
    let mut cmd = player_command(&program, config, socket);
    cmd.stdin(std::process::Stdio::null());
    cmd.stdout(std::process::Stdio::null());
    cmd.stderr(std::process::Stdio::null());
    cmd.kill_on_drop(true);
    isolate(&mut cmd);

    debug!(program = %program.display(), socket = %socket.display(), "Starting player");
    cmd.spawn()
        .with_context(|| format!("Failed to spawn player: {}", program.display()))
}

/// Ask the player to exit with SIGTERM, then kill it after `grace`.
pub async fn terminate(child: &mut Child, grace: Duration) -> Result<()> {
    if let Some(pid) = child.id() {
        // SAFETY: `kill` with a pid we spawned and still own; no memory is touched.
        let ret = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if ret != 0 {
            warn!(
                pid,
                "Failed to send SIGTERM: {}",
                std::io::Error::last_os_error()
            );
        }
    }

    match tokio::time::timeout(grace, child.wait()).await {
        Ok(status) => {
            let status = status.context("Failed to wait for player")?;
            debug!(%status, "Player exited");
            Ok(())
        }
        Err(_) => {
            warn!(
                "Player ignored SIGTERM for {}s; killing",
                grace.as_secs()
            );
            child.kill().await.context("Failed to kill player")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_socket_path_in_dir_and_unique() {
        let dir = tempdir().unwrap();
        let a = socket_path(dir.path());
        let b = socket_path(dir.path());
        assert_eq!(a.parent(), Some(dir.path()));
        assert!(
            a.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("tvsched-mpv-")
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_player_command_args() {
        let config = PlayerConfig {
            executable: "mpv".to_string(),
            extra_args: vec!["--fullscreen".to_string(), "--mute=yes".to_string()],
            socket_dir: PathBuf::from("/tmp"),
        };
        let cmd = player_command(Path::new("/usr/bin/mpv"), &config, Path::new("/tmp/x.sock"));
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "/usr/bin/mpv");
        let args: Vec<_> = std_cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "--idle",
                "--input-ipc-server=/tmp/x.sock",
                "--fullscreen",
                "--mute=yes"
            ]
        );
    }

    #[test]
    fn test_find_player_missing() {
        let err = find_player("definitely-not-a-real-player-binary").unwrap_err();
        assert!(err.to_string().contains("not installed"));
    }

    #[tokio::test]
    async fn test_isolated_child_has_own_process_group() {
        let mut cmd = Command::new("sleep");
        cmd.arg("30").kill_on_drop(true);
        isolate(&mut cmd);
        let mut child = cmd.spawn().unwrap();
        let pid = child.id().unwrap() as libc::pid_t;

        // SAFETY: getpgid only reads process attributes.
        let (ours, theirs) = unsafe { (libc::getpgid(0), libc::getpgid(pid)) };
        assert_ne!(theirs, -1);
        assert_ne!(ours, theirs);
        assert_eq!(theirs, pid);

        terminate(&mut child, Duration::from_secs(5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_terminate_stops_child() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        terminate(&mut child, Duration::from_secs(5)).await.unwrap();
        assert!(child.try_wait().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_spawn_player_with_stand_in_binary() {
        let dir = tempdir().unwrap();
        let config = PlayerConfig {
            executable: "true".to_string(),
            extra_args: Vec::new(),
            socket_dir: dir.path().to_path_buf(),
        };
        let mut child = spawn_player(&config, &socket_path(dir.path())).await.unwrap();
        assert!(child.wait().await.unwrap().success());
    }
}
