use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config_cmds;
mod history;
mod live_cmd;
mod next_cmd;
mod play_cmd;

use cli::{Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (output to stderr, RUST_LOG wins over -v)
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init()
        .ok();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Play => play_cmd::handle_play(config).await,
        Commands::Next { count, seed } => next_cmd::handle_next(config, count, seed, cli.format),
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Validate => config_cmds::handle_config_validate(config, cli.format),
            ConfigCommands::Show => config_cmds::handle_config_show(config, cli.format),
        },
        Commands::ProbeLive { url } => live_cmd::handle_probe_live(url, cli.format).await,
    }
}
