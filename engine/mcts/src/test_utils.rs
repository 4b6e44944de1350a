//! Scripted games for driving the search deterministically in tests.

use chess_core::{Color, Game, GameError};

use crate::evaluator::{Evaluator, EvaluatorError};

/// Tree position of a [`ScriptedGame`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptState {
    pub side: Color,
    pub depth: u32,
    /// Set once a tree move has decided the game
    pub decided: Option<Color>,
}

impl ScriptState {
    pub fn root(side: Color) -> Self {
        Self {
            side,
            depth: 0,
            decided: None,
        }
    }
}

/// Rollout board of a [`ScriptedGame`].
#[derive(Debug, Clone)]
pub struct ScriptBoard {
    pub plies: u32,
    pub winner: Option<Color>,
}

/// A game whose move lists and rollout outcomes are fixed up front.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGame {
    /// Moves available from every tree position
    pub tree_moves: Vec<u8>,
    /// Tree moves that count as capturing a king
    pub king_captures: Vec<u8>,
    /// Tree move that decides the game for the given winner
    pub winning_move: Option<(u8, Color)>,
    /// Rollout ply (1-based) on which a king is captured, and who survives
    pub capture_at: Option<(u32, Color)>,
    /// Rollout ply count after which the side to move has no moves
    pub dead_end_at: Option<u32>,
    /// Make every tree move fail to apply
    pub fail_on_apply: bool,
}

impl ScriptedGame {
    pub fn with_moves(moves: &[u8]) -> Self {
        Self {
            tree_moves: moves.to_vec(),
            ..Self::default()
        }
    }
}

impl Game for ScriptedGame {
    type State = ScriptState;
    type Move = u8;
    type Lightweight = ScriptBoard;
    type LightweightMove = u8;

    fn side_to_move(&self, state: &ScriptState) -> Color {
        state.side
    }

    fn generate_moves(&self, _state: &ScriptState, _side: Color) -> Result<Vec<u8>, GameError> {
        Ok(self.tree_moves.clone())
    }

    fn apply_move(&self, state: &ScriptState, mv: u8) -> Result<ScriptState, GameError> {
        if self.fail_on_apply {
            return Err(GameError::IllegalMove {
                mv: mv.to_string(),
                reason: "scripted failure".into(),
            });
        }
        let decided = match self.winning_move {
            Some((winning, winner)) if winning == mv && state.decided.is_none() => Some(winner),
            _ => state.decided,
        };
        Ok(ScriptState {
            side: state.side.opponent(),
            depth: state.depth + 1,
            decided,
        })
    }

    fn captures_king(&self, _state: &ScriptState, mv: u8) -> bool {
        self.king_captures.contains(&mv)
    }

    fn to_lightweight(&self, state: &ScriptState) -> ScriptBoard {
        ScriptBoard {
            plies: 0,
            winner: state.decided,
        }
    }

    fn generate_lightweight_moves(&self, board: &ScriptBoard, _side: Color) -> Vec<u8> {
        match self.dead_end_at {
            Some(limit) if board.plies >= limit => Vec::new(),
            _ => vec![0, 1],
        }
    }

    fn apply_lightweight_move(&self, board: &mut ScriptBoard, _mv: u8) {
        board.plies += 1;
        if let Some((ply, winner)) = self.capture_at {
            if board.plies == ply {
                board.winner = Some(winner);
            }
        }
    }

    fn king_capture_winner(&self, board: &ScriptBoard) -> Option<Color> {
        board.winner
    }
}

/// Evaluator that always fails.
#[derive(Debug, Clone, Default)]
pub struct FailingEvaluator;

impl<G: Game> Evaluator<G> for FailingEvaluator {
    fn evaluate(&self, _board: &G::Lightweight, _side: Color) -> Result<f64, EvaluatorError> {
        Err(EvaluatorError::EvaluationFailed("scripted failure".into()))
    }
}
