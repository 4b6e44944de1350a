//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! by the engine host and its tooling.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`MCTS_CHESS_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! MCTS_CHESS_<SECTION>_<KEY>=value
//!
//! Examples:
//!     MCTS_CHESS_COMMON_LOG_LEVEL=debug
//!     MCTS_CHESS_SEARCH_MAX_PLAYOUTS=5000
//!     MCTS_CHESS_SEARCH_SEED=42
//!     MCTS_CHESS_ACTOR_BLACK=mcts
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
