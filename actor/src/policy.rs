//! Move selection policies for the actor

use anyhow::Result;
use async_trait::async_trait;
use chess_core::{Board, Move, MoveGenerator};
use mcts::SearchStats;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

/// Something that picks a move for the side to move.
///
/// `Ok(None)` means the policy has nothing to play; the game ends there.
#[async_trait]
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    async fn choose_move(&mut self, board: &Board) -> Result<Option<Move>>;

    /// Statistics from the most recent search, for policies that search.
    fn search_stats(&self) -> Option<&SearchStats> {
        None
    }
}

/// Plays a uniformly random pseudo-legal move.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
    generator: MoveGenerator,
}

impl RandomPolicy {
    pub fn new(generator: MoveGenerator) -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
            generator,
        }
    }

    pub fn with_seed(generator: MoveGenerator, seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            generator,
        }
    }
}

#[async_trait]
impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    async fn choose_move(&mut self, board: &Board) -> Result<Option<Move>> {
        let moves = self.generator.generate_moves(board, board.side_to_move());
        Ok(moves.choose(&mut self.rng).copied())
    }
}
