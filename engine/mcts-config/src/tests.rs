//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.search.max_playouts, 1000);
    assert_eq!(config.search.promotions, "all");
    assert_eq!(config.actor.white, "mcts");
    assert_eq!(config.actor.black, "random");
}

#[test]
fn test_search_defaults() {
    let config = CentralConfig::default();
    assert!(!config.search.use_time_limit);
    assert_eq!(config.search.time_limit_ms, 1000);
    assert_eq!(config.search.rollout_depth, 50);
    assert!((config.search.exploration_c - 1.0).abs() < f64::EPSILON);
    assert!(config.search.seed.is_none());
}

#[test]
fn test_env_overrides() {
    std::env::set_var("MCTS_CHESS_SEARCH_ROLLOUT_DEPTH", "12");
    std::env::set_var("MCTS_CHESS_SEARCH_SEED", "99");
    std::env::set_var("MCTS_CHESS_ACTOR_BLACK", "mcts");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.search.rollout_depth, 12);
    assert_eq!(config.search.seed, Some(99));
    assert_eq!(config.actor.black, "mcts");

    std::env::remove_var("MCTS_CHESS_SEARCH_ROLLOUT_DEPTH");
    std::env::remove_var("MCTS_CHESS_SEARCH_SEED");
    std::env::remove_var("MCTS_CHESS_ACTOR_BLACK");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("MCTS_CHESS_ACTOR_MAX_PLIES", "lots");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.actor.max_plies, 200);

    std::env::remove_var("MCTS_CHESS_ACTOR_MAX_PLIES");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[search]
max_playouts = 5000
use_time_limit = true
time_limit_ms = 250
promotions = "queen"
seed = 7

[actor]
white = "random"
games = 10
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.search.max_playouts, 5000);
    assert!(config.search.use_time_limit);
    assert_eq!(config.search.time_limit_ms, 250);
    assert_eq!(config.search.promotions, "queen");
    assert_eq!(config.search.seed, Some(7));
    assert_eq!(config.actor.white, "random");
    assert_eq!(config.actor.games, 10);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[search]
rollout_depth = 8
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.search.rollout_depth, 8);
    assert_eq!(config.search.max_playouts, 1000); // Default
    assert_eq!(config.common.log_level, "info"); // Default
    assert_eq!(config.actor.max_plies, 200); // Default
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[search]\nexploration_c = 1.41\n\n[actor]\ngames = 3").unwrap();

    let config = load_from_path(file.path());
    assert!((config.search.exploration_c - 1.41).abs() < f64::EPSILON);
    assert_eq!(config.actor.games, 3);
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[search\nmax_playouts = ").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.search.max_playouts, 1000);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("absent.toml"));
    assert_eq!(config.actor.start_fen, defaults::start_fen());
}
