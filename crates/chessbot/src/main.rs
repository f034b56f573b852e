//! chessbot - play chess against a fixed-depth engine from the terminal.
//!
//! Moves are entered in UCI notation (`e2e4`, `e7e8q`). Typing `go` lets
//! the engine move for the side to move.

mod command;
mod config;
mod session;

use clap::Parser;
use config::ChessbotConfig;
use session::Session;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Play chess against a fixed-depth alpha-beta engine.
#[derive(Parser)]
#[command(name = "chessbot")]
#[command(about = "Minimal UCI-like chess CLI")]
struct Args {
    /// Search depth for the engine (overrides the config file)
    #[arg(long)]
    depth: Option<u32>,

    /// Path to the TOML configuration file
    #[arg(long, default_value_os_t = ChessbotConfig::default_path())]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = Args::parse();

    let mut config = ChessbotConfig::load(&args.config)?;
    if let Some(depth) = args.depth {
        config.depth = depth;
    }

    tracing::info!("Starting chessbot");
    tracing::info!("Config file: {:?}", args.config);
    tracing::info!("Search depth: {}", config.depth);

    let stdin = io::stdin();
    let mut session = Session::new(BufReader::new(stdin.lock()), io::stdout(), config);
    session.run()?;
    tracing::info!("Session ended after {} moves", session.game().history_len());
    Ok(())
}
