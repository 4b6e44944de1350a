//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so the binary and the
//! checked-in defaults can never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    max_playouts: u32,
    use_time_limit: bool,
    time_limit_ms: u64,
    rollout_depth: u32,
    exploration_c: f64,
    promotions: String,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    white: String,
    black: String,
    games: u32,
    max_plies: u32,
    start_fen: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn max_playouts() -> u32 {
    DEFAULTS.search.max_playouts
}
pub fn use_time_limit() -> bool {
    DEFAULTS.search.use_time_limit
}
pub fn time_limit_ms() -> u64 {
    DEFAULTS.search.time_limit_ms
}
pub fn rollout_depth() -> u32 {
    DEFAULTS.search.rollout_depth
}
pub fn exploration_c() -> f64 {
    DEFAULTS.search.exploration_c
}
pub fn promotions() -> &'static str {
    &DEFAULTS.search.promotions
}
pub fn seed() -> Option<u64> {
    DEFAULTS.search.seed
}

// Actor
pub fn white() -> &'static str {
    &DEFAULTS.actor.white
}
pub fn black() -> &'static str {
    &DEFAULTS.actor.black
}
pub fn games() -> u32 {
    DEFAULTS.actor.games
}
pub fn max_plies() -> u32 {
    DEFAULTS.actor.max_plies
}
pub fn start_fen() -> &'static str {
    &DEFAULTS.actor.start_fen
}
