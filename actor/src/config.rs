//! Configuration for the Actor service
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use chess_core::{Board, PromotionMode};
use clap::Parser;
use mcts::MctsConfig;
use mcts_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_white() -> String {
    CENTRAL_CONFIG.actor.white.clone()
}

fn default_black() -> String {
    CENTRAL_CONFIG.actor.black.clone()
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.actor.games
}

fn default_max_plies() -> u32 {
    CENTRAL_CONFIG.actor.max_plies
}

fn default_fen() -> String {
    CENTRAL_CONFIG.actor.start_fen.clone()
}

fn default_playouts() -> u32 {
    CENTRAL_CONFIG.search.max_playouts
}

fn default_time_limit_ms() -> u64 {
    if CENTRAL_CONFIG.search.use_time_limit {
        CENTRAL_CONFIG.search.time_limit_ms
    } else {
        0
    }
}

fn default_rollout_depth() -> u32 {
    CENTRAL_CONFIG.search.rollout_depth
}

fn default_exploration_c() -> f64 {
    CENTRAL_CONFIG.search.exploration_c
}

fn default_promotions() -> String {
    CENTRAL_CONFIG.search.promotions.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

/// Who picks the moves for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Mcts,
    Random,
}

impl FromStr for PlayerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mcts" => Ok(PlayerKind::Mcts),
            "random" => Ok(PlayerKind::Random),
            other => Err(anyhow!(
                "unknown player '{}', expected 'mcts' or 'random'",
                other
            )),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Mcts => write!(f, "mcts"),
            PlayerKind::Random => write!(f, "random"),
        }
    }
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "actor")]
#[command(about = "MCTS chess actor - plays games between search and random players")]
#[command(
    long_about = "Actor that plays chess games between an MCTS player and/or a random
player, using king capture as the only decisive result.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Player for White (mcts or random)
    #[arg(long, default_value_t = default_white())]
    pub white: String,

    /// Player for Black (mcts or random)
    #[arg(long, default_value_t = default_black())]
    pub black: String,

    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Plies after which an undecided game is abandoned
    #[arg(long, default_value_t = default_max_plies())]
    pub max_plies: u32,

    /// Starting position in FEN
    #[arg(long, default_value_t = default_fen())]
    pub fen: String,

    /// MCTS iterations per move
    #[arg(long, default_value_t = default_playouts())]
    pub playouts: u32,

    /// Wall-clock limit per move in milliseconds (0 to disable)
    #[arg(long, default_value_t = default_time_limit_ms())]
    pub time_limit_ms: u64,

    /// Maximum plies per random rollout
    #[arg(long, default_value_t = default_rollout_depth())]
    pub rollout_depth: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration_c())]
    pub exploration_c: f64,

    /// Promotion pieces expanded by the search (all, queen_and_knight, queen)
    #[arg(long, default_value_t = default_promotions())]
    pub promotions: String,

    /// Seed for reproducible games (defaults to [search].seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.white_player()?;
        self.black_player()?;

        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.max_plies == 0 {
            return Err(anyhow!("max_plies must be greater than 0"));
        }

        if self.playouts == 0 {
            return Err(anyhow!("playouts must be greater than 0"));
        }

        if !self.exploration_c.is_finite() || self.exploration_c < 0.0 {
            return Err(anyhow!(
                "exploration_c must be a non-negative number, got {}",
                self.exploration_c
            ));
        }

        self.promotion_mode()?;
        self.start_board()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn white_player(&self) -> Result<PlayerKind> {
        self.white.parse()
    }

    pub fn black_player(&self) -> Result<PlayerKind> {
        self.black.parse()
    }

    pub fn promotion_mode(&self) -> Result<PromotionMode> {
        Ok(self.promotions.parse()?)
    }

    pub fn start_board(&self) -> Result<Board> {
        Ok(Board::from_fen(&self.fen)?)
    }

    /// Per-move time budget, if enabled.
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }

    /// Base seed for every player in the run.
    pub fn base_seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.search.seed)
    }

    /// Search settings shared by every MCTS player.
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let mut config = MctsConfig::default()
            .with_playouts(self.playouts)
            .with_rollout_depth(self.rollout_depth)
            .with_exploration_c(self.exploration_c)
            .with_promotions(self.promotion_mode()?);
        if let Some(limit) = self.time_limit() {
            config = config.with_time_limit(limit);
        }
        if let Some(seed) = self.base_seed() {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

#[cfg(test)]
impl Config {
    /// Small, seeded configuration for tests.
    pub fn for_testing() -> Self {
        Config {
            white: "mcts".into(),
            black: "random".into(),
            games: 1,
            max_plies: 10,
            fen: chess_core::STARTING_FEN.into(),
            playouts: 30,
            time_limit_ms: 0,
            rollout_depth: 8,
            exploration_c: 1.0,
            promotions: "all".into(),
            seed: Some(42),
            log_level: "info".into(),
        }
    }
}
