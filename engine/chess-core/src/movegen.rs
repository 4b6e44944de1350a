//! Pseudo-legal move generation.
//!
//! Both the full [`Board`] and the rollout [`SimBoard`](crate::SimBoard) share the
//! same geometry: pawn pushes and captures, knight and king steps, sliding rays.
//! Castling, en passant and check detection are not modelled. A move that lands on
//! a king is generated like any other capture; the search decides what to do with it.

use crate::board::Board;
use crate::moves::{Move, PromotionMode};
use crate::piece::{Color, Piece, PieceKind, Square};

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Read access to square contents, implemented by both board representations.
pub(crate) trait PieceLookup {
    fn piece_at(&self, sq: Square) -> Option<Piece>;
}

/// Walk every pseudo-legal move for `side` in square order, calling `emit` for each.
///
/// With an empty `promotions` slice, pawns reaching the last rank are emitted once
/// with no promotion piece (the rollout board queens them implicitly).
pub(crate) fn for_each_pseudo_move<B, F>(
    board: &B,
    side: Color,
    promotions: &[PieceKind],
    mut emit: F,
) where
    B: PieceLookup,
    F: FnMut(Square, Square, Option<PieceKind>),
{
    for from in Square::all() {
        let piece = match board.piece_at(from) {
            Some(p) if p.color == side => p,
            _ => continue,
        };

        match piece.kind {
            PieceKind::Pawn => pawn_moves(board, from, side, promotions, &mut emit),
            PieceKind::Knight => step_moves(board, from, side, &KNIGHT_STEPS, &mut emit),
            PieceKind::King => step_moves(board, from, side, &KING_STEPS, &mut emit),
            PieceKind::Bishop => ray_moves(board, from, side, &BISHOP_DIRS, &mut emit),
            PieceKind::Rook => ray_moves(board, from, side, &ROOK_DIRS, &mut emit),
            PieceKind::Queen => {
                ray_moves(board, from, side, &ROOK_DIRS, &mut emit);
                ray_moves(board, from, side, &BISHOP_DIRS, &mut emit);
            }
        }
    }
}

fn pawn_moves<B, F>(board: &B, from: Square, side: Color, promotions: &[PieceKind], emit: &mut F)
where
    B: PieceLookup,
    F: FnMut(Square, Square, Option<PieceKind>),
{
    let dir = side.pawn_direction();

    if let Some(one) = from.offset(0, dir) {
        if board.piece_at(one).is_none() {
            pawn_arrival(from, one, side, promotions, emit);
            if from.rank() == side.pawn_home_rank() {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if board.piece_at(two).is_none() {
                        pawn_arrival(from, two, side, promotions, emit);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(target) = from.offset(df, dir) {
            if matches!(board.piece_at(target), Some(p) if p.color != side) {
                pawn_arrival(from, target, side, promotions, emit);
            }
        }
    }
}

fn pawn_arrival<F>(from: Square, to: Square, side: Color, promotions: &[PieceKind], emit: &mut F)
where
    F: FnMut(Square, Square, Option<PieceKind>),
{
    if to.rank() == side.promotion_rank() && !promotions.is_empty() {
        for &kind in promotions {
            emit(from, to, Some(kind));
        }
    } else {
        emit(from, to, None);
    }
}

fn step_moves<B, F>(board: &B, from: Square, side: Color, steps: &[(i8, i8)], emit: &mut F)
where
    B: PieceLookup,
    F: FnMut(Square, Square, Option<PieceKind>),
{
    for &(df, dr) in steps {
        if let Some(to) = from.offset(df, dr) {
            match board.piece_at(to) {
                Some(p) if p.color == side => {}
                _ => emit(from, to, None),
            }
        }
    }
}

fn ray_moves<B, F>(board: &B, from: Square, side: Color, dirs: &[(i8, i8)], emit: &mut F)
where
    B: PieceLookup,
    F: FnMut(Square, Square, Option<PieceKind>),
{
    for &(df, dr) in dirs {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.piece_at(to) {
                None => emit(from, to, None),
                Some(p) => {
                    if p.color != side {
                        emit(from, to, None);
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Generates candidate moves for tree expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveGenerator {
    /// Promotion pieces emitted for pawns reaching the last rank.
    pub promotions: PromotionMode,
}

impl MoveGenerator {
    pub fn new(promotions: PromotionMode) -> Self {
        Self { promotions }
    }

    /// All pseudo-legal moves for `side` on `board`, in deterministic order.
    pub fn generate_moves(&self, board: &Board, side: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for_each_pseudo_move(board, side, self.promotions.pieces(), |from, to, promotion| {
            moves.push(Move {
                from,
                to,
                promotion,
            })
        });
        moves
    }
}
