//! Static evaluation of rollout boards.

use crate::piece::{Color, PieceKind};
use crate::sim::SimBoard;

/// Centipawn bonus per rank a pawn has advanced from its home rank.
const PAWN_ADVANCE_BONUS: i32 = 5;

/// Centipawn difference that maps to roughly 0.91 on the [0, 1] scale.
const LOGISTIC_SCALE: f64 = 400.0;

/// Material balance in centipawns from `side`'s point of view.
pub fn material_balance(board: &SimBoard, side: Color) -> i32 {
    board
        .pieces()
        .map(|(sq, piece)| {
            let mut value = piece.kind.value();
            if piece.kind == PieceKind::Pawn {
                let advanced = match piece.color {
                    Color::White => sq.rank() as i32 - 1,
                    Color::Black => 6 - sq.rank() as i32,
                };
                value += advanced.max(0) * PAWN_ADVANCE_BONUS;
            }
            if piece.color == side {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// Heuristic score of a non-terminal rollout board for `side`, in the open interval (0, 1).
///
/// 0.5 is a balanced position; the curve is the usual Elo-style logistic over the
/// centipawn balance so it lines up with the 0/1 rewards of decided rollouts.
pub fn evaluate_sim_board(board: &SimBoard, side: Color) -> f64 {
    let diff = material_balance(board, side) as f64;
    1.0 / (1.0 + 10f64.powf(-diff / LOGISTIC_SCALE))
}
