#[cfg(not(unix))]
compile_error!("tvs-player requires Unix domain sockets; Windows is not supported");

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::UnixStream;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tracing::{debug, warn};

use crate::protocol::{MpvCommand, MpvMessage};

const SOCKET_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Poll until the player has created its IPC socket.
pub async fn wait_for_socket(socket_path: &Path, timeout: Duration) -> Result<()> {
    debug!(socket = %socket_path.display(), "Waiting for player socket");
    let deadline = tokio::time::Instant::now() + timeout;
    while !socket_path.exists() {
        if tokio::time::Instant::now() >= deadline {
            bail!(
                "player did not open its socket within {}s: {}",
                timeout.as_secs(),
                socket_path.display()
            );
        }
        tokio::time::sleep(SOCKET_POLL_INTERVAL).await;
    }
    Ok(())
}

pub async fn cleanup_socket_file(socket_path: &Path) -> Result<()> {
    if socket_path.exists() {
        tokio::fs::remove_file(socket_path)
            .await
            .with_context(|| format!("failed to cleanup socket: {}", socket_path.display()))?;
    }
    Ok(())
}

/// Line-oriented JSON IPC connection to mpv.
pub struct MpvConnection {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
    next_request_id: i64,
}

impl MpvConnection {
    pub async fn connect(socket_path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(socket_path)
            .await
            .with_context(|| format!("failed to connect unix socket: {}", socket_path.display()))?;
        debug!(socket = %socket_path.display(), "Connected to player");
        Ok(Self::from_stream(stream))
    }

    pub fn from_stream(stream: UnixStream) -> Self {
        let (read_half, writer) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            writer,
            next_request_id: 1,
        }
    }

    /// Send a raw command; returns the request id it was tagged with.
    pub async fn send(&mut self, command: Vec<Value>) -> Result<i64> {
        let request_id = self.take_request_id();
        self.write(&MpvCommand::new(command, request_id)).await?;
        Ok(request_id)
    }

    pub async fn loadfile(&mut self, item: &str) -> Result<i64> {
        let request_id = self.take_request_id();
        self.write(&MpvCommand::loadfile(item, request_id)).await?;
        Ok(request_id)
    }

    fn take_request_id(&mut self) -> i64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    async fn write(&mut self, command: &MpvCommand) -> Result<()> {
        let line = command.to_line()?;
        self.writer
            .write_all(line.as_bytes())
            .await
            .context("failed to write to player socket")?;
        self.writer
            .flush()
            .await
            .context("failed to flush player socket")
    }

    /// Next message from the player, or `None` once the socket closes.
    ///
    /// Blank and malformed lines are skipped. Cancel-safe.
    pub async fn next_message(&mut self) -> Result<Option<MpvMessage>> {
        loop {
            let Some(line) = self
                .lines
                .next_line()
                .await
                .context("failed to read from player socket")?
            else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            match MpvMessage::parse(&line) {
                Ok(message) => return Ok(Some(message)),
                Err(e) => warn!("{e:#}"),
            }
        }
    }
}
