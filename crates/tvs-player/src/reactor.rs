//! Decides when a player event should trigger loading the next item.

use tracing::{debug, trace, warn};

/// What the playback loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Ask the scheduler for the next item and load it.
    LoadNext,
    Nothing,
}

/// Events that are expected and carry no meaning for scheduling.
const IGNORED_EVENTS: &[&str] = &[
    "audio-reconfig",
    "file-loaded",
    "video-reconfig",
    "playback-restart",
    "seek",
];

/// Tracks whether a load is already pending.
///
/// mpv emits `end-file` and then `idle` for the same transition; only the
/// first of them requests a new item. `start-file` re-arms the reactor.
#[derive(Debug, Default)]
pub struct EventReactor {
    load_pending: bool,
}

impl EventReactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_pending(&self) -> bool {
        self.load_pending
    }

    /// Re-arm after a load that will never produce `start-file`, so the
    /// next idle or end-of-file event tries again.
    pub fn load_failed(&mut self) {
        self.load_pending = false;
    }

    pub fn on_event(&mut self, name: &str) -> Reaction {
        trace!(event = name, "Player event");
        match name {
            "end-file" | "idle" => {
                if name == "end-file" {
                    debug!("Ended playback");
                }
                if self.load_pending {
                    Reaction::Nothing
                } else {
                    self.load_pending = true;
                    Reaction::LoadNext
                }
            }
            "start-file" => {
                self.load_pending = false;
                Reaction::Nothing
            }
            _ if IGNORED_EVENTS.contains(&name) => Reaction::Nothing,
            _ => {
                warn!(event = name, "Unhandled player event");
                Reaction::Nothing
            }
        }
    }
}
