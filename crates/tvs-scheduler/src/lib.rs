//! Selection engine: prioritized groups, per-group traversal, strict failover.

pub mod group;
pub mod scheduler;
pub mod source;
pub mod traversal;

pub use group::GroupState;
pub use scheduler::{Scheduler, Selection};
pub use source::{Snapshot, resolve};
pub use traversal::advance;
