//! Full game position used by the search tree.

use std::fmt;

use tracing::trace;

use crate::error::GameError;
use crate::movegen::PieceLookup;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind, Square};
use crate::sim::SimBoard;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Chess position: 64-square mailbox plus side to move.
///
/// Once attached to a search node a board is never mutated; [`Board::make_move`]
/// returns a new board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
    side_to_move: Color,
    /// Half-moves played since this board was set up.
    ply: u32,
}

impl Board {
    /// An empty board with the given side to move.
    pub fn empty(side_to_move: Color) -> Self {
        Self {
            squares: [None; Square::COUNT],
            side_to_move,
            ply: 0,
        }
    }

    pub fn starting_position() -> Self {
        Self::from_fen(STARTING_FEN).expect("STARTING_FEN should be valid FEN")
    }

    /// Parse the piece-placement and side-to-move fields of a FEN string.
    ///
    /// Castling, en passant and clock fields are accepted but ignored.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| GameError::InvalidFen("empty string".into()))?;

        let mut board = Board::empty(Color::White);
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(GameError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if c.is_ascii_digit() {
                    let skip = match c {
                        '1'..='8' => c as u8 - b'0',
                        _ => return Err(GameError::InvalidFen(format!("bad empty count '{c}'"))),
                    };
                    if file + skip > 8 {
                        return Err(GameError::InvalidFen(format!(
                            "rank {} overflows",
                            rank + 1
                        )));
                    }
                    file += skip;
                } else {
                    let piece = Piece::from_fen_char(c)
                        .ok_or_else(|| GameError::InvalidFen(format!("bad piece '{c}'")))?;
                    let sq = Square::new(file, rank).ok_or_else(|| {
                        GameError::InvalidFen(format!("rank {} overflows", rank + 1))
                    })?;
                    board.squares[sq.index()] = Some(piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(GameError::InvalidFen(format!(
                    "rank {} has {} files",
                    rank + 1,
                    file
                )));
            }
        }

        board.side_to_move = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(GameError::InvalidFen(format!("bad side to move '{other}'")))
            }
        };

        if fields.next().is_some() {
            trace!(fen, "ignoring castling, en passant and clock fields");
        }

        Ok(board)
    }

    /// Placement and side to move in FEN form (remaining fields are fixed).
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(80);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8usize {
                match self.squares[rank as usize * 8 + file] {
                    None => empty += 1,
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(p.to_fen_char());
                    }
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out.push_str(match self.side_to_move {
            Color::White => " w - - 0 1",
            Color::Black => " b - - 0 1",
        });
        out
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    /// Apply a move and return the resulting position.
    ///
    /// Only ownership of the moving piece is checked; geometry is trusted to the
    /// move generator.
    pub fn make_move(&self, mv: Move) -> Result<Board, GameError> {
        let piece = self.piece_at(mv.from).ok_or(GameError::EmptySquare(mv.from))?;
        if piece.color != self.side_to_move {
            return Err(GameError::IllegalMove {
                mv: mv.to_string(),
                reason: format!("{} piece moved on {} turn", piece.color, self.side_to_move),
            });
        }

        let placed = match mv.promotion {
            Some(kind) if piece.kind == PieceKind::Pawn => Piece::new(piece.color, kind),
            Some(_) => {
                return Err(GameError::IllegalMove {
                    mv: mv.to_string(),
                    reason: "only pawns promote".into(),
                })
            }
            None => piece,
        };

        let mut next = self.clone();
        next.squares[mv.from.index()] = None;
        next.squares[mv.to.index()] = Some(placed);
        next.side_to_move = self.side_to_move.opponent();
        next.ply = self.ply + 1;
        Ok(next)
    }

    /// True iff the move lands on a king of either color.
    #[inline]
    pub fn captures_king(&self, mv: Move) -> bool {
        matches!(self.piece_at(mv.to), Some(p) if p.is_king())
    }

    /// The winner if exactly one side has lost its king.
    pub fn king_capture_winner(&self) -> Option<Color> {
        let (white, black) = kings_present(self.squares.iter().copied());
        winner_from_kings(white, black)
    }

    /// Project onto the lightweight rollout board.
    pub fn to_lightweight(&self) -> SimBoard {
        let mut sim = SimBoard::empty();
        for sq in Square::all() {
            sim.set(sq, self.squares[sq.index()]);
        }
        sim
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl PieceLookup for Board {
    #[inline]
    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square::new(file, rank).ok_or(fmt::Error)?;
                let c = self.squares[sq.index()].map_or('.', Piece::to_fen_char);
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

pub(crate) fn kings_present(pieces: impl Iterator<Item = Option<Piece>>) -> (bool, bool) {
    let mut white = false;
    let mut black = false;
    for piece in pieces.flatten() {
        if piece.is_king() {
            match piece.color {
                Color::White => white = true,
                Color::Black => black = true,
            }
        }
    }
    (white, black)
}

pub(crate) fn winner_from_kings(white_king: bool, black_king: bool) -> Option<Color> {
    match (white_king, black_king) {
        (false, true) => Some(Color::Black),
        (true, false) => Some(Color::White),
        _ => None,
    }
}
