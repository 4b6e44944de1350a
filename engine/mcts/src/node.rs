//! MCTS tree node representation.
//!
//! Each node represents a game state reached by playing a move from the parent.
//! Rewards are accumulated from the searching side's fixed point of view; the
//! perspective flip happens at selection time, never at backpropagation.

use chess_core::Color;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
///
/// `children` and `untried_moves` together hold every move generated for
/// `state` at creation time, minus those discarded for capturing a king.
#[derive(Debug, Clone)]
pub struct MctsNode<S, M> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move applied to the parent's state to reach this node (None for root)
    pub move_leading_here: Option<M>,

    /// Side to act from `state`
    pub side_to_move: Color,

    /// Position snapshot, never mutated once attached
    pub state: S,

    /// Expanded children, in expansion order
    pub children: Vec<NodeId>,

    /// Moves from `state` not yet expanded into children
    pub untried_moves: Vec<M>,

    /// Number of backpropagation passes through this node
    pub visit_count: u32,

    /// Sum of rewards backpropagated through this node
    pub win_count: f64,
}

impl<S, M> MctsNode<S, M> {
    /// Create a new root node.
    pub fn new_root(state: S, side_to_move: Color, untried_moves: Vec<M>) -> Self {
        Self {
            parent: NodeId::NONE,
            move_leading_here: None,
            side_to_move,
            state,
            children: Vec::new(),
            untried_moves,
            visit_count: 0,
            win_count: 0.0,
        }
    }

    /// Create a new child node.
    pub fn new_child(
        parent: NodeId,
        mv: M,
        side_to_move: Color,
        state: S,
        untried_moves: Vec<M>,
    ) -> Self {
        Self {
            parent,
            move_leading_here: Some(mv),
            side_to_move,
            state,
            children: Vec::new(),
            untried_moves,
            visit_count: 0,
            win_count: 0.0,
        }
    }

    /// Mean reward, complemented when scored for the opponent of the searching side.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self, perspective_is_opponent: bool) -> f64 {
        if self.visit_count == 0 {
            return 0.0;
        }
        let rate = self.win_count / self.visit_count as f64;
        if perspective_is_opponent {
            1.0 - rate
        } else {
            rate
        }
    }

    /// UCB1 score for child selection.
    /// UCB(child) = win_rate + c * sqrt(ln(N_parent) / N_child)
    ///
    /// Unvisited nodes score `f64::MAX` so that every child is tried once
    /// before its statistics are trusted.
    ///
    /// Takes pre-computed ln(parent_visits) to avoid redundant log calls
    /// when comparing siblings.
    #[inline]
    pub fn ucb_score(&self, parent_visits_ln: f64, c: f64, perspective_is_opponent: bool) -> f64 {
        if self.visit_count == 0 {
            return f64::MAX;
        }
        let exploration = c * (parent_visits_ln / self.visit_count as f64).sqrt();
        self.win_rate(perspective_is_opponent) + exploration
    }

    /// Record one backpropagation pass.
    #[inline]
    pub fn update(&mut self, reward: f64) {
        self.visit_count += 1;
        self.win_count += reward;
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    /// Check if this node has no expanded children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
