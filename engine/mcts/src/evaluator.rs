//! Evaluator trait for rollout boards.
//!
//! The evaluator scores rollouts that stop without a king capture (depth limit
//! reached, or the side to move has no moves). Scores share the [0, 1] scale of
//! decisive rollouts so that backpropagated rewards stay comparable.

use chess_core::{evaluate_sim_board, Chess, Color, Game, SimBoard};
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Score {0} is outside [0, 1]")]
    OutOfRange(f64),
}

/// Trait for rollout board evaluators.
///
/// Implementations could be:
/// - MaterialEvaluator: material balance squashed into (0, 1)
/// - ConstantEvaluator: fixed score (for testing)
pub trait Evaluator<G: Game>: Send + Sync {
    /// Score `board` from `side`'s point of view.
    ///
    /// # Returns
    /// A value in [0, 1]: 1.0 is a certain win for `side`, 0.5 is balanced.
    fn evaluate(&self, board: &G::Lightweight, side: Color) -> Result<f64, EvaluatorError>;
}

/// Material evaluator over the chess rollout board.
#[derive(Debug, Clone, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator<Chess> for MaterialEvaluator {
    fn evaluate(&self, board: &SimBoard, side: Color) -> Result<f64, EvaluatorError> {
        let score = evaluate_sim_board(board, side);
        if !(0.0..=1.0).contains(&score) {
            return Err(EvaluatorError::OutOfRange(score));
        }
        Ok(score)
    }
}

/// Evaluator that returns the same score for every board and side.
/// Useful for testing MCTS without a heuristic.
#[derive(Debug, Clone)]
pub struct ConstantEvaluator {
    pub score: f64,
}

impl ConstantEvaluator {
    pub fn new(score: f64) -> Self {
        Self { score }
    }
}

impl Default for ConstantEvaluator {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl<G: Game> Evaluator<G> for ConstantEvaluator {
    fn evaluate(&self, _board: &G::Lightweight, _side: Color) -> Result<f64, EvaluatorError> {
        Ok(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Board;

    #[test]
    fn test_material_evaluator_balanced() {
        let eval = MaterialEvaluator::new();
        let sim = Board::starting_position().to_lightweight();

        let white = Evaluator::<Chess>::evaluate(&eval, &sim, Color::White).unwrap();
        assert!((white - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_material_evaluator_is_symmetric() {
        let eval = MaterialEvaluator::new();
        let sim = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")
            .unwrap()
            .to_lightweight();

        let white = Evaluator::<Chess>::evaluate(&eval, &sim, Color::White).unwrap();
        let black = Evaluator::<Chess>::evaluate(&eval, &sim, Color::Black).unwrap();

        assert!(white > 0.5);
        assert!((white + black - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_evaluator() {
        let eval = ConstantEvaluator::new(0.3);
        let sim = SimBoard::empty();

        let score = Evaluator::<Chess>::evaluate(&eval, &sim, Color::Black).unwrap();
        assert!((score - 0.3).abs() < 1e-12);
        assert!((ConstantEvaluator::default().score - 0.5).abs() < 1e-12);
    }
}
