//! Strict priority failover across groups.
//!
//! Groups are consulted in ascending priority on every call and the first
//! one that yields an item wins. There is no fairness between groups: a
//! higher-priority group with content always beats a lower-priority one.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, error, warn};
use tvs_config::{GroupSpec, SchedulerConfig};
use tvs_core::{NoItemAvailable, ProduceError};

use crate::group::GroupState;

/// One successful selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Item identifier: a filesystem path or URL.
    pub item: String,
    /// Name of the group that produced it.
    pub group: String,
    /// Index of the item inside that group's snapshot.
    pub index: usize,
}

/// Selection engine. `next_item` takes `&mut self`, so callers are
/// serialized by the borrow checker.
#[derive(Debug)]
pub struct Scheduler {
    specs: Vec<GroupSpec>,
    states: Vec<GroupState>,
    rng: StdRng,
}

impl Scheduler {
    /// Build a scheduler with an OS-seeded random generator.
    pub fn new(groups: Vec<GroupSpec>) -> Self {
        Self::with_rng(groups, StdRng::from_os_rng())
    }

    /// Build a scheduler whose random orders are reproducible.
    pub fn with_seed(groups: Vec<GroupSpec>, seed: u64) -> Self {
        Self::with_rng(groups, StdRng::seed_from_u64(seed))
    }

    /// Build from a validated config. Its groups are already sorted and
    /// their priority conflicts were reported at load, so neither step is
    /// repeated here.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::from_sorted(config.groups.clone(), StdRng::from_os_rng())
    }

    /// [`Scheduler::from_config`] with reproducible random orders.
    pub fn from_config_with_seed(config: &SchedulerConfig, seed: u64) -> Self {
        Self::from_sorted(config.groups.clone(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut groups: Vec<GroupSpec>, rng: StdRng) -> Self {
        groups.sort_by_key(|g| g.priority);
        for pair in groups.windows(2) {
            if pair[0].priority == pair[1].priority {
                warn!(
                    priority = pair[0].priority,
                    first = %pair[0].name,
                    second = %pair[1].name,
                    "Groups share the same priority; keeping given order"
                );
            }
        }
        Self::from_sorted(groups, rng)
    }

    fn from_sorted(groups: Vec<GroupSpec>, rng: StdRng) -> Self {
        let states = vec![GroupState::new(); groups.len()];
        Self {
            specs: groups,
            states,
            rng,
        }
    }

    /// Groups in the order they are consulted.
    pub fn groups(&self) -> &[GroupSpec] {
        &self.specs
    }

    /// Traversal state of each group, parallel to [`Scheduler::groups`].
    pub fn states(&self) -> &[GroupState] {
        &self.states
    }

    /// Select the next item from the highest-priority group that has one.
    ///
    /// Empty and unavailable groups are logged and skipped without touching
    /// their state. Fails only when every group was skipped.
    pub fn next_item(&mut self) -> Result<Selection, NoItemAvailable> {
        for (spec, state) in self.specs.iter().zip(self.states.iter_mut()) {
            match state.produce_next(spec, &mut self.rng) {
                Ok((item, index)) => {
                    debug!(group = %spec.name, index, item = %item, "Next item");
                    return Ok(Selection {
                        item,
                        group: spec.name.clone(),
                        index,
                    });
                }
                Err(e @ ProduceError::Empty { .. }) => {
                    warn!(group = %spec.name, "{e}");
                }
                Err(e @ ProduceError::SourceUnavailable { .. }) => {
                    error!(group = %spec.name, "{e}");
                }
            }
        }
        error!("No next item found");
        Err(NoItemAvailable)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
