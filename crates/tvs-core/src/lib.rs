//! Shared types and the error taxonomy for the tvsched workspace.

pub mod error;
pub mod types;

pub use error::{ConfigError, NoItemAvailable, ProduceError};
pub use types::{OutputFormat, TraversalOrder};
