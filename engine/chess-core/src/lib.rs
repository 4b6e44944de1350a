//! Chess collaborators for the MCTS engine
//!
//! This crate provides the position model the search runs over:
//! - `Board`: full position stored in tree nodes
//! - `MoveGenerator`: pseudo-legal candidate moves for expansion
//! - `SimBoard`: lightweight per-square board for random rollouts
//! - `evaluate_sim_board`: heuristic score for undecided rollouts
//! - `Game`: the narrow trait the search is generic over, implemented by `Chess`
//!
//! Rules are approximate on purpose: no castling, en passant or check detection.
//! A game is decided when a king is captured.

pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod sim;

pub use board::{Board, STARTING_FEN};
pub use error::GameError;
pub use eval::{evaluate_sim_board, material_balance};
pub use game::{Chess, Game};
pub use movegen::MoveGenerator;
pub use moves::{Move, PromotionMode, SimMove};
pub use piece::{Color, Piece, PieceKind, Square};
pub use sim::SimBoard;
