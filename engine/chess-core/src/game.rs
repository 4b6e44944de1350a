//! The collaborator interface consumed by the search engine.
//!
//! The search only ever talks to a game through this trait, which keeps the tree
//! code independent of board representation and lets tests drive it with
//! scripted games.

use std::fmt::Debug;

use crate::board::Board;
use crate::error::GameError;
use crate::movegen::MoveGenerator;
use crate::moves::{Move, PromotionMode, SimMove};
use crate::piece::Color;
use crate::sim::SimBoard;

/// Two-player game as seen by the search.
///
/// # Type Parameters
///
/// * `State` - full position stored in tree nodes, cloned once per expansion
/// * `Move` - tree move, stored on every node
/// * `Lightweight` - compact board mutated in place during rollouts
/// * `LightweightMove` - rollout move
pub trait Game: Send + Sync + Debug + 'static {
    type State: Clone + Debug + Send + Sync + 'static;
    type Move: Copy + PartialEq + Debug + Send + Sync + 'static;
    type Lightweight: Clone + Debug + Send + 'static;
    type LightweightMove: Copy + Debug + Send + 'static;

    /// Side to act in `state`.
    fn side_to_move(&self, state: &Self::State) -> Color;

    /// Candidate moves for tree expansion, in a deterministic order.
    fn generate_moves(
        &self,
        state: &Self::State,
        side: Color,
    ) -> Result<Vec<Self::Move>, GameError>;

    /// Successor state; `state` itself is left untouched.
    fn apply_move(&self, state: &Self::State, mv: Self::Move) -> Result<Self::State, GameError>;

    /// Whether `mv` lands on either king. Such moves are never expanded.
    fn captures_king(&self, state: &Self::State, mv: Self::Move) -> bool;

    /// Projection used once per rollout.
    fn to_lightweight(&self, state: &Self::State) -> Self::Lightweight;

    fn generate_lightweight_moves(
        &self,
        board: &Self::Lightweight,
        side: Color,
    ) -> Vec<Self::LightweightMove>;

    fn apply_lightweight_move(&self, board: &mut Self::Lightweight, mv: Self::LightweightMove);

    /// The side whose king survives once the other king has been captured.
    fn king_capture_winner(&self, board: &Self::Lightweight) -> Option<Color>;
}

/// Chess with pseudo-legal moves and king capture as the only decisive result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chess {
    generator: MoveGenerator,
}

impl Chess {
    pub fn new(promotions: PromotionMode) -> Self {
        Self {
            generator: MoveGenerator::new(promotions),
        }
    }

    pub fn generator(&self) -> &MoveGenerator {
        &self.generator
    }
}

impl Game for Chess {
    type State = Board;
    type Move = Move;
    type Lightweight = SimBoard;
    type LightweightMove = SimMove;

    #[inline]
    fn side_to_move(&self, state: &Board) -> Color {
        state.side_to_move()
    }

    fn generate_moves(&self, state: &Board, side: Color) -> Result<Vec<Move>, GameError> {
        Ok(self.generator.generate_moves(state, side))
    }

    fn apply_move(&self, state: &Board, mv: Move) -> Result<Board, GameError> {
        state.make_move(mv)
    }

    #[inline]
    fn captures_king(&self, state: &Board, mv: Move) -> bool {
        state.captures_king(mv)
    }

    fn to_lightweight(&self, state: &Board) -> SimBoard {
        state.to_lightweight()
    }

    fn generate_lightweight_moves(&self, board: &SimBoard, side: Color) -> Vec<SimMove> {
        board.generate_moves(side)
    }

    #[inline]
    fn apply_lightweight_move(&self, board: &mut SimBoard, mv: SimMove) {
        board.apply(mv);
    }

    fn king_capture_winner(&self, board: &SimBoard) -> Option<Color> {
        board.king_capture_winner()
    }
}
