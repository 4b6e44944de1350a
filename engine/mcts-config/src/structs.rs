//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_max_playouts() -> u32 {
    defaults::max_playouts()
}
fn d_use_time_limit() -> bool {
    defaults::use_time_limit()
}
fn d_time_limit_ms() -> u64 {
    defaults::time_limit_ms()
}
fn d_rollout_depth() -> u32 {
    defaults::rollout_depth()
}
fn d_exploration_c() -> f64 {
    defaults::exploration_c()
}
fn d_promotions() -> String {
    defaults::promotions().into()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_white() -> String {
    defaults::white().into()
}
fn d_black() -> String {
    defaults::black().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_max_plies() -> u32 {
    defaults::max_plies()
}
fn d_start_fen() -> String {
    defaults::start_fen().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search budget and tuning
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "d_max_playouts")]
    pub max_playouts: u32,
    #[serde(default = "d_use_time_limit")]
    pub use_time_limit: bool,
    #[serde(default = "d_time_limit_ms")]
    pub time_limit_ms: u64,
    #[serde(default = "d_rollout_depth")]
    pub rollout_depth: u32,
    #[serde(default = "d_exploration_c")]
    pub exploration_c: f64,
    /// One of "all", "queen_and_knight", "queen"
    #[serde(default = "d_promotions")]
    pub promotions: String,
    /// Fixed RNG seed (None = seed from entropy)
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_playouts: defaults::max_playouts(),
            use_time_limit: defaults::use_time_limit(),
            time_limit_ms: defaults::time_limit_ms(),
            rollout_depth: defaults::rollout_depth(),
            exploration_c: defaults::exploration_c(),
            promotions: defaults::promotions().into(),
            seed: defaults::seed(),
        }
    }
}

/// Actor (game runner) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    /// Policy playing White: "mcts" or "random"
    #[serde(default = "d_white")]
    pub white: String,
    #[serde(default = "d_black")]
    pub black: String,
    #[serde(default = "d_games")]
    pub games: u32,
    /// Plies after which an undecided game is abandoned
    #[serde(default = "d_max_plies")]
    pub max_plies: u32,
    #[serde(default = "d_start_fen")]
    pub start_fen: String,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            white: defaults::white().into(),
            black: defaults::black().into(),
            games: defaults::games(),
            max_plies: defaults::max_plies(),
            start_fen: defaults::start_fen().into(),
        }
    }
}
