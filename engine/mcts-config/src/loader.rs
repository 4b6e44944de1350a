//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from subdirectory)
    "/app/config.toml", // Docker container
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by MCTS_CHESS_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
/// 4. Docker container path (/app/config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("MCTS_CHESS_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from MCTS_CHESS_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "MCTS_CHESS_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
/// Unreadable or malformed files fall back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, bool)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
    // Optional parseable field (Option<u64>)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = Some(v),
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: MCTS_CHESS_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "MCTS_CHESS_COMMON_LOG_LEVEL");

    // Search
    env_override!(
        config,
        search.max_playouts,
        "MCTS_CHESS_SEARCH_MAX_PLAYOUTS",
        parse
    );
    env_override!(
        config,
        search.use_time_limit,
        "MCTS_CHESS_SEARCH_USE_TIME_LIMIT",
        parse
    );
    env_override!(
        config,
        search.time_limit_ms,
        "MCTS_CHESS_SEARCH_TIME_LIMIT_MS",
        parse
    );
    env_override!(
        config,
        search.rollout_depth,
        "MCTS_CHESS_SEARCH_ROLLOUT_DEPTH",
        parse
    );
    env_override!(
        config,
        search.exploration_c,
        "MCTS_CHESS_SEARCH_EXPLORATION_C",
        parse
    );
    env_override!(config, search.promotions, "MCTS_CHESS_SEARCH_PROMOTIONS");
    env_override!(
        config,
        search.seed,
        "MCTS_CHESS_SEARCH_SEED",
        optional_parse
    );

    // Actor
    env_override!(config, actor.white, "MCTS_CHESS_ACTOR_WHITE");
    env_override!(config, actor.black, "MCTS_CHESS_ACTOR_BLACK");
    env_override!(config, actor.games, "MCTS_CHESS_ACTOR_GAMES", parse);
    env_override!(
        config,
        actor.max_plies,
        "MCTS_CHESS_ACTOR_MAX_PLIES",
        parse
    );
    env_override!(config, actor.start_fen, "MCTS_CHESS_ACTOR_START_FEN");

    config
}
