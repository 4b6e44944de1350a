use thiserror::Error;

use crate::piece::Square;

/// Errors raised by the chess collaborators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: String, reason: String },

    #[error("Invalid move notation: {0}")]
    InvalidMove(String),

    #[error("Invalid promotion mode: {0} (expected all, queen_and_knight or queen)")]
    InvalidPromotionMode(String),

    #[error("No piece on {0}")]
    EmptySquare(Square),
}
