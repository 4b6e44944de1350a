//! Actor - chess game runner for the MCTS engine
//!
//! A process that:
//! 1. Loads search and match settings from config.toml, env vars and the CLI
//! 2. Plays games between MCTS and random players from a start position
//! 3. Ends each game on king capture, when a side has no move, or at the ply limit
//! 4. Stops cleanly on Ctrl-C after the current move

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

mod actor;
mod config;
mod mcts_policy;
mod policy;

use crate::actor::Actor;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse and validate configuration
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    info!(
        games = config.games,
        max_plies = config.max_plies,
        "Actor will play {} {} ({} vs {})",
        config.games,
        if config.games == 1 { "game" } else { "games" },
        config.white,
        config.black
    );

    let actor = Arc::new(Actor::new(config)?);

    // Setup graceful shutdown
    let shutdown_actor = Arc::clone(&actor);
    let shutdown_handle = tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, stopping actor...");
                shutdown_actor.shutdown();
            }
            Err(e) => error!("Failed to listen for ctrl+c: {}", e),
        }
    });

    let run_result = actor.run().await;

    shutdown_handle.abort();

    match run_result {
        Ok(summary) => {
            info!(
                games = summary.games,
                white_wins = summary.white_wins,
                black_wins = summary.black_wins,
                "Actor completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!("Actor failed: {}", e);
            Err(e)
        }
    }
}
