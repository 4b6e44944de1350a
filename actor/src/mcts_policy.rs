//! MCTS-based policy
//!
//! Each move runs a fresh search from the current board on a blocking worker.
//! With a fixed seed the per-move seed is derived from the search count, so a
//! whole game replays identically.

use anyhow::Result;
use async_trait::async_trait;
use chess_core::{Board, Chess, Move};
use mcts::{start_search, Decision, MaterialEvaluator, MctsConfig, SearchStats};
use std::time::Instant;
use tracing::{debug, warn};

use crate::policy::Policy;

/// Policy that picks the most visited root move of an MCTS search.
#[derive(Debug)]
pub struct MctsPolicy {
    game: Chess,
    config: MctsConfig,
    /// Searches run so far
    searches: u32,
    last_stats: Option<SearchStats>,
}

impl MctsPolicy {
    pub fn new(config: MctsConfig) -> Self {
        Self {
            game: Chess::new(config.promotions),
            config,
            searches: 0,
            last_stats: None,
        }
    }

    /// Config for the next search, with the seed advanced per move.
    fn next_config(&self) -> MctsConfig {
        let mut config = self.config.clone();
        config.seed = self
            .config
            .seed
            .map(|seed| seed.wrapping_add(self.searches as u64));
        config
    }
}

#[async_trait]
impl Policy for MctsPolicy {
    fn name(&self) -> &'static str {
        "mcts"
    }

    async fn choose_move(&mut self, board: &Board) -> Result<Option<Move>> {
        let start = Instant::now();
        let handle = start_search(
            self.game,
            MaterialEvaluator::new(),
            board.clone(),
            self.next_config(),
        );
        let result = handle.wait().await?;
        self.searches += 1;

        debug!(
            side = %board.side_to_move(),
            decision = ?result.decision,
            iterations = result.iterations,
            best_visits = result.best_visits,
            best_win_rate = format!("{:.3}", result.best_win_rate),
            tree_nodes = result.tree.total_nodes,
            max_depth = result.tree.max_depth,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "MCTS search complete"
        );

        let chosen = match result.decision {
            Decision::Move(mv) => Some(mv),
            Decision::NoCandidateMoves => None,
            Decision::Undecided => {
                warn!(
                    fen = %board.to_fen(),
                    iterations = result.iterations,
                    "Search finished without a root child"
                );
                None
            }
        };
        self.last_stats = Some(result.stats);
        Ok(chosen)
    }

    fn search_stats(&self) -> Option<&SearchStats> {
        self.last_stats.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::MoveGenerator;

    fn test_config() -> MctsConfig {
        MctsConfig::for_testing().with_playouts(40).with_seed(11)
    }

    #[tokio::test]
    async fn test_mcts_policy_returns_candidate_move() {
        let board = Board::starting_position();
        let candidates = MoveGenerator::default().generate_moves(&board, board.side_to_move());

        let mut policy = MctsPolicy::new(test_config());
        let mv = policy.choose_move(&board).await.unwrap().unwrap();
        assert!(candidates.contains(&mv));

        let stats = policy.search_stats().unwrap();
        assert_eq!(stats.iterations, 40);
    }

    #[tokio::test]
    async fn test_mcts_policy_deterministic_with_seed() {
        let board = Board::starting_position();
        let mut a = MctsPolicy::new(test_config());
        let mut b = MctsPolicy::new(test_config());

        for _ in 0..2 {
            assert_eq!(
                a.choose_move(&board).await.unwrap(),
                b.choose_move(&board).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_mcts_policy_no_moves() {
        let board = Board::from_fen("k7/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        let mut policy = MctsPolicy::new(test_config());
        assert_eq!(policy.choose_move(&board).await.unwrap(), None);
    }

    #[test]
    fn test_seed_advances_per_search() {
        let mut policy = MctsPolicy::new(test_config());
        assert_eq!(policy.next_config().seed, Some(11));
        policy.searches = 3;
        assert_eq!(policy.next_config().seed, Some(14));

        let unseeded = MctsPolicy::new(MctsConfig::default());
        assert_eq!(unseeded.next_config().seed, None);
    }
}
