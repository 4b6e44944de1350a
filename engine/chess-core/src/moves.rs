//! Move types for the full board and the rollout board.

use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::piece::{PieceKind, Square};

/// A move on the full board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Piece a pawn turns into on the last rank.
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Parse long algebraic notation (`e2e4`, `a7a8q`).
    pub fn parse(s: &str) -> Result<Move, GameError> {
        let invalid = || GameError::InvalidMove(s.to_string());
        if !(4..=5).contains(&s.len()) || !s.is_ascii() {
            return Err(invalid());
        }
        let from = Square::parse(&s[0..2]).ok_or_else(invalid)?;
        let to = Square::parse(&s[2..4]).ok_or_else(invalid)?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_letter(c) {
                Some(PieceKind::Pawn) | Some(PieceKind::King) | None => return Err(invalid()),
                kind => kind,
            },
        };
        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

/// A move on the lightweight rollout board. Promotion is implicit (always a queen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimMove {
    pub from: Square,
    pub to: Square,
}

impl fmt::Display for SimMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Which promotion pieces the move generator emits for a pawn reaching the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionMode {
    #[default]
    All,
    QueenAndKnight,
    QueenOnly,
}

impl PromotionMode {
    pub(crate) fn pieces(self) -> &'static [PieceKind] {
        match self {
            PromotionMode::All => &[
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight,
            ],
            PromotionMode::QueenAndKnight => &[PieceKind::Queen, PieceKind::Knight],
            PromotionMode::QueenOnly => &[PieceKind::Queen],
        }
    }
}

impl FromStr for PromotionMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PromotionMode::All),
            "queen_and_knight" | "queen-and-knight" => Ok(PromotionMode::QueenAndKnight),
            "queen" | "queen_only" | "queen-only" => Ok(PromotionMode::QueenOnly),
            other => Err(GameError::InvalidPromotionMode(other.to_string())),
        }
    }
}

impl fmt::Display for PromotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PromotionMode::All => "all",
            PromotionMode::QueenAndKnight => "queen_and_knight",
            PromotionMode::QueenOnly => "queen",
        };
        write!(f, "{s}")
    }
}
