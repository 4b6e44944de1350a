//! Random rollouts (the simulation phase).
//!
//! A rollout plays uniformly random lightweight moves, alternating sides, until
//! a king is captured, the side to move has no moves, or the depth limit is hit.
//! Rewards are always from the searching side's point of view.

use chess_core::{Color, Game};
use rand::Rng;

use crate::evaluator::Evaluator;
use crate::search::SearchError;

/// Reward for a rollout in which the searching side's king survived.
pub const WIN_REWARD: f64 = 1.0;

/// Reward for a rollout in which the searching side's king was captured.
pub const LOSS_REWARD: f64 = 0.0;

/// Why a rollout stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A king was captured; `winner` is the side whose king survived.
    KingCaptured { winner: Color },
    /// The side to move had no lightweight moves.
    NoMoves,
    /// The ply-depth limit was reached.
    DepthLimit,
}

/// Result of a single rollout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutOutcome {
    pub reward: f64,
    pub plies: u32,
    pub termination: Termination,
}

impl RolloutOutcome {
    /// Whether the reward came from a king capture rather than the evaluator.
    pub fn is_decisive(&self) -> bool {
        matches!(self.termination, Termination::KingCaptured { .. })
    }
}

/// Play one random rollout from `board`.
///
/// # Arguments
/// * `side_to_move` - side to act first on `board`
/// * `searching_side` - side the whole search runs for; fixes the reward perspective
/// * `depth_limit` - maximum number of plies before falling back to `evaluator`
///
/// Evaluator failures propagate; a dead end is never an error.
pub fn rollout<G, E, R>(
    game: &G,
    evaluator: &E,
    mut board: G::Lightweight,
    side_to_move: Color,
    searching_side: Color,
    depth_limit: u32,
    rng: &mut R,
) -> Result<RolloutOutcome, SearchError>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
    R: Rng + ?Sized,
{
    let mut side = side_to_move;
    let mut plies = 0;

    let termination = loop {
        if let Some(winner) = game.king_capture_winner(&board) {
            let reward = if winner == searching_side {
                WIN_REWARD
            } else {
                LOSS_REWARD
            };
            return Ok(RolloutOutcome {
                reward,
                plies,
                termination: Termination::KingCaptured { winner },
            });
        }

        if plies >= depth_limit {
            break Termination::DepthLimit;
        }

        let moves = game.generate_lightweight_moves(&board, side);
        if moves.is_empty() {
            break Termination::NoMoves;
        }

        let mv = moves[rng.gen_range(0..moves.len())];
        game.apply_lightweight_move(&mut board, mv);
        plies += 1;
        side = side.opponent();
    };

    let reward = evaluator.evaluate(&board, searching_side)?;
    Ok(RolloutOutcome {
        reward,
        plies,
        termination,
    })
}
