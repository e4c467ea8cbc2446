use std::path::Path;

use anyhow::Result;

use tvs_core::types::OutputFormat;
use tvs_scheduler::{Scheduler, Selection};

use crate::config_cmds::load_config;

/// Handle `tvsched next`: run the scheduler `count` times without a player.
///
/// Stops early (with an error) when no group can produce an item. History
/// is not written.
pub(crate) fn handle_next(
    explicit: Option<&Path>,
    count: usize,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let (_, config) = load_config(explicit)?;
    let mut scheduler = match seed {
        Some(seed) => Scheduler::from_config_with_seed(&config, seed),
        None => Scheduler::from_config(&config),
    };

    let selections = take_selections(&mut scheduler, count)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selections)?),
        OutputFormat::Text => {
            for s in &selections {
                println!("{}\t{}", s.group, s.item);
            }
        }
    }
    Ok(())
}

fn take_selections(scheduler: &mut Scheduler, count: usize) -> Result<Vec<Selection>> {
    let mut selections = Vec::with_capacity(count);
    for _ in 0..count {
        selections.push(scheduler.next_item()?);
    }
    Ok(selections)
}
