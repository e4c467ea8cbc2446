use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tvs_core::types::OutputFormat;

#[derive(Parser)]
#[command(name = "tvsched", version)]
#[command(about = "TV Scheduler: unattended, priority-driven playlist for mpv")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./config.toml, ./config.json, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the player and keep it fed with scheduled items
    Play,

    /// Dry run: print the next selections without starting the player
    Next {
        /// Number of selections to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Seed for random orders (reproducible output)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show/validate configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },

    /// Check whether a channel page reports a live stream
    ProbeLive {
        /// Page URL, e.g. https://www.youtube.com/@channel/live
        url: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Load and validate the config, reporting priority conflicts
    Validate,
    /// Print the validated config (groups in priority order)
    Show,
}
