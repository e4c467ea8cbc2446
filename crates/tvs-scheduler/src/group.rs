//! Per-group runtime state.
//!
//! A group's immutable [`GroupSpec`] and its mutable [`GroupState`] are kept
//! apart; the scheduler pairs them by position.

use rand::Rng;
use serde::Serialize;
use tracing::trace;
use tvs_config::GroupSpec;
use tvs_core::ProduceError;

use crate::source::resolve;
use crate::traversal::advance;

/// Remembered traversal position of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupState {
    /// Index of the last produced item; `None` until the first success.
    last_index: Option<usize>,
}

impl GroupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    pub fn is_started(&self) -> bool {
        self.last_index.is_some()
    }

    /// Produce the next item of `spec` and remember its index.
    ///
    /// Returns the item and the index it was taken from. On
    /// [`ProduceError`] the remembered index is left untouched.
    pub fn produce_next<R: Rng + ?Sized>(
        &mut self,
        spec: &GroupSpec,
        rng: &mut R,
    ) -> Result<(String, usize), ProduceError> {
        let mut snapshot = resolve(&spec.source)?;
        let index = advance(spec.source.order(), snapshot.len(), self.last_index, rng);
        self.last_index = Some(index);
        trace!(group = %spec.name, index, len = snapshot.len(), "Advanced group");
        Ok((snapshot.swap_remove(index), index))
    }
}
