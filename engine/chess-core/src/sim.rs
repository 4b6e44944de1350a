//! Lightweight rollout board.
//!
//! A bare 8x8 grid with no side-to-move or history, cheap to copy and mutate in
//! place during random playouts.

use crate::board::{kings_present, winner_from_kings};
use crate::movegen::{for_each_pseudo_move, PieceLookup};
use crate::moves::SimMove;
use crate::piece::{Color, Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimBoard {
    /// Indexed `[rank][file]`.
    cells: [[Option<Piece>; 8]; 8],
}

impl SimBoard {
    pub fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.rank() as usize][sq.file() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.rank() as usize][sq.file() as usize] = piece;
    }

    /// Pseudo-legal moves for `side`. Promotions are not expanded.
    pub fn generate_moves(&self, side: Color) -> Vec<SimMove> {
        let mut moves = Vec::with_capacity(48);
        for_each_pseudo_move(self, side, &[], |from, to, _| {
            moves.push(SimMove { from, to })
        });
        moves
    }

    /// Move a piece, capturing whatever stands on the destination.
    /// A pawn reaching the last rank becomes a queen.
    pub fn apply(&mut self, mv: SimMove) {
        let moving = self.get(mv.from).map(|p| {
            if p.kind == PieceKind::Pawn && mv.to.rank() == p.color.promotion_rank() {
                Piece::new(p.color, PieceKind::Queen)
            } else {
                p
            }
        });
        self.set(mv.to, moving);
        self.set(mv.from, None);
    }

    /// The winner if exactly one side has lost its king.
    pub fn king_capture_winner(&self) -> Option<Color> {
        let (white, black) = kings_present(self.pieces().map(|(_, p)| Some(p)));
        winner_from_kings(white, black)
    }

    /// Occupied squares in a1..h8 order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::empty()
    }
}

impl PieceLookup for SimBoard {
    #[inline]
    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.get(sq)
    }
}
