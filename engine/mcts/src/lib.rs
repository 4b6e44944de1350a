//! Monte Carlo Tree Search (MCTS) with UCB1 selection and random rollouts.
//!
//! This crate provides an MCTS implementation that works with any game
//! implementing the `chess-core` [`Game`](chess_core::Game) trait. Chess is the
//! production game; tests drive the engine with scripted games.
//!
//! # Overview
//!
//! MCTS is a search algorithm that builds a search tree by running simulations.
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: Descend through fully expanded nodes using UCB1 to
//!    balance exploration and exploitation
//! 2. **Expansion**: Attach one untried move as a new child, skipping moves
//!    that capture a king
//! 3. **Simulation**: Play random moves on a lightweight board until a king is
//!    captured, nobody can move, or the depth limit is reached
//! 4. **Backpropagation**: Add the rollout reward to every node on the path
//!    back to the root
//!
//! Rewards are stored from the searching side's point of view. When the side
//! choosing at a node is the opponent, selection scores the complement of the
//! stored win rate instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chess_core::{Board, Chess};
//! use mcts::{run_mcts, search_rng, MaterialEvaluator, MctsConfig};
//!
//! let config = MctsConfig::default().with_playouts(2000).with_seed(42);
//! let mut rng = search_rng(&config);
//!
//! let result = run_mcts(
//!     &Chess::default(),
//!     &MaterialEvaluator::new(),
//!     config,
//!     Board::starting_position(),
//!     &mut rng,
//! )?;
//!
//! println!("Decision: {:?}", result.decision);
//! println!("Best visits: {}", result.best_visits);
//! ```
//!
//! From async code, [`start_search`] runs the same search on a blocking worker
//! and returns a [`SearchHandle`] that can be aborted or awaited.
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `max_playouts`: Number of iterations per search (default: 1000)
//! - `use_time_limit` / `time_limit`: Optional wall-clock budget (default: off, 1s)
//! - `rollout_depth`: Maximum plies per rollout (default: 50)
//! - `promotions`: Promotion pieces considered during expansion (default: all)
//! - `exploration_c`: Exploration constant for UCB1 (default: 1.0)
//! - `seed`: Rollout RNG seed for reproducible searches
//!
//! # Evaluators
//!
//! Rollouts that end without a king capture are scored by an [`Evaluator`]:
//!
//! - [`MaterialEvaluator`]: Material balance mapped onto (0, 1)
//! - [`ConstantEvaluator`]: Fixed score (for testing)

pub mod cancel;
pub mod config;
pub mod evaluator;
pub mod handle;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

#[cfg(test)]
mod test_utils;

// Re-export main types
pub use cancel::CancelToken;
pub use config::MctsConfig;
pub use evaluator::{ConstantEvaluator, Evaluator, EvaluatorError, MaterialEvaluator};
pub use handle::{start_search, SearchHandle};
pub use node::{MctsNode, NodeId};
pub use rollout::{rollout, RolloutOutcome, Termination};
pub use search::{
    run_mcts, search_rng, Decision, MctsSearch, SearchError, SearchResult, SearchStats,
};
pub use tree::{MctsTree, TreeStats};
