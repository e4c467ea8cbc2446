//! External media player collaborator: mpv process, JSON IPC, event reactor.

pub mod ipc;
pub mod live;
pub mod process;
pub mod protocol;
pub mod reactor;

pub use ipc::{MpvConnection, cleanup_socket_file, wait_for_socket};
pub use live::{LIVE_MARKER, MarkerScanner, is_livestreaming};
pub use process::{find_player, spawn_player, socket_path, terminate};
pub use protocol::{MpvCommand, MpvMessage};
pub use reactor::{EventReactor, Reaction};
