//! `tvsched play`: supervise mpv and feed it the scheduler's selections.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::process::Child;
use tracing::{debug, error, info, warn};

use tvs_player::{
    EventReactor, MpvConnection, MpvMessage, Reaction, cleanup_socket_file, socket_path,
    spawn_player, terminate, wait_for_socket,
};
use tvs_scheduler::Scheduler;

use crate::config_cmds::load_config;
use crate::history::HistoryLog;

const SOCKET_TIMEOUT: Duration = Duration::from_secs(10);
const TERMINATE_GRACE: Duration = Duration::from_secs(3);

pub(crate) async fn handle_play(explicit: Option<&Path>) -> Result<()> {
    let (config_path, config) = load_config(explicit)?;
    info!(config = %config_path.display(), groups = config.groups.len(), "Starting");

    let mut scheduler = Scheduler::from_config(&config);
    let history = HistoryLog::new(config.history_file.clone());

    let socket = socket_path(&config.player.socket_dir);
    debug!(socket = %socket.display(), "Deleting any existing socket file");
    cleanup_socket_file(&socket).await?;

    let mut child = spawn_player(&config.player, &socket).await?;
    let result = run_session(&mut child, &socket, &mut scheduler, &history).await;
    shutdown(&mut child, &socket).await;
    debug!("Exiting");
    result
}

/// Stop the player if it is still running, then remove its socket.
///
/// Failures are logged rather than returned so the session's own result
/// is what the caller sees, and the socket is removed either way.
async fn shutdown(child: &mut Child, socket: &Path) {
    match child.try_wait() {
        Ok(Some(status)) => debug!(%status, "Player already exited"),
        Ok(None) => {
            if let Err(e) = terminate(child, TERMINATE_GRACE).await {
                warn!("{e:#}");
            }
        }
        Err(e) => warn!("Failed to poll player status: {e}"),
    }
    if let Err(e) = cleanup_socket_file(socket).await {
        warn!("{e:#}");
    }
}

async fn run_session(
    child: &mut Child,
    socket: &Path,
    scheduler: &mut Scheduler,
    history: &HistoryLog,
) -> Result<()> {
    tokio::select! {
        ready = wait_for_socket(socket, SOCKET_TIMEOUT) => ready?,
        status = child.wait() => {
            bail!("player exited before opening its socket ({})", status?);
        }
    }

    let mut conn = MpvConnection::connect(socket).await?;
    let mut feeder = Feeder::new(scheduler, history);

    loop {
        tokio::select! {
            message = conn.next_message() => {
                let Some(message) = message? else {
                    info!("Player closed its socket");
                    return Ok(());
                };
                feeder.on_message(&mut conn, message).await?;
            }
            status = child.wait() => {
                let status = status.context("Failed to wait for player")?;
                info!(%status, "Player exited");
                return Ok(());
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted; stopping player");
                return Ok(());
            }
        }
    }
}

/// Reacts to player messages by loading the next scheduled item.
struct Feeder<'a> {
    scheduler: &'a mut Scheduler,
    history: &'a HistoryLog,
    reactor: EventReactor,
    /// Request id of the last `loadfile` sent, until its reply arrives.
    pending_load: Option<i64>,
}

impl<'a> Feeder<'a> {
    fn new(scheduler: &'a mut Scheduler, history: &'a HistoryLog) -> Self {
        Self {
            scheduler,
            history,
            reactor: EventReactor::new(),
            pending_load: None,
        }
    }

    async fn on_message(&mut self, conn: &mut MpvConnection, message: MpvMessage) -> Result<()> {
        match message {
            MpvMessage::Event { name, .. } => {
                if self.reactor.on_event(&name) == Reaction::LoadNext {
                    self.load_next(conn).await?;
                }
            }
            MpvMessage::Reply {
                request_id, error, ..
            } => {
                let is_pending_load = request_id.is_some() && request_id == self.pending_load;
                if is_pending_load {
                    self.pending_load = None;
                }
                if error != "success" {
                    error!(?request_id, "Error playing next item: {error}");
                    if is_pending_load {
                        self.reactor.load_failed();
                    }
                }
            }
        }
        Ok(())
    }

    async fn load_next(&mut self, conn: &mut MpvConnection) -> Result<()> {
        match self.scheduler.next_item() {
            Ok(selection) => {
                info!(group = %selection.group, item = %selection.item, "Playing next item");
                self.pending_load = Some(conn.loadfile(&selection.item).await?);
                self.history.record(&selection);
            }
            Err(e) => {
                error!("{e}");
                self.reactor.load_failed();
            }
        }
        Ok(())
    }
}
