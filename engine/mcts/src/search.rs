//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse fully expanded nodes using UCB1
//! 2. Expansion: Attach one untried move as a new child
//! 3. Simulation: Random rollout from the new child
//! 4. Backpropagation: Add the rollout reward to every node on the path

use std::time::Instant;

use chess_core::{Color, Game, GameError};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::cancel::CancelToken;
use crate::config::MctsConfig;
use crate::evaluator::{Evaluator, EvaluatorError};
use crate::node::NodeId;
use crate::rollout::{rollout, RolloutOutcome};
use crate::tree::{MctsTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game error: {0}")]
    GameError(#[from] GameError),

    #[error("Evaluator error: {0}")]
    EvaluatorError(#[from] EvaluatorError),

    #[error("Search worker exited without a result")]
    WorkerLost,
}

/// What the search decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<M> {
    /// The most visited root move.
    Move(M),
    /// The root position has no candidate moves.
    NoCandidateMoves,
    /// The budget ran out before the root gained a child.
    Undecided,
}

impl<M: Copy> Decision<M> {
    pub fn best_move(&self) -> Option<M> {
        match self {
            Decision::Move(mv) => Some(*mv),
            _ => None,
        }
    }
}

/// Counters and per-phase timings for a single search.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Completed select/expand/simulate/backpropagate passes
    pub iterations: u32,
    pub nodes_created: u32,
    /// Candidate moves dropped at expansion because they capture a king
    pub king_captures_skipped: u32,
    pub decisive_rollouts: u32,
    pub heuristic_rollouts: u32,
    pub rollout_plies: u64,
    /// Whether the loop stopped on the cancel token
    pub cancelled: bool,
    /// Whether the loop stopped on the time limit
    pub timed_out: bool,
    /// Total search time (microseconds)
    pub total_time_us: u64,
    pub selection_time_us: u64,
    pub expansion_time_us: u64,
    pub simulation_time_us: u64,
    pub backprop_time_us: u64,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    pub decision: Decision<M>,

    /// Number of iterations performed
    pub iterations: u32,

    pub root_visits: u32,

    /// Visits of the chosen child (0 without a decision)
    pub best_visits: u32,

    /// Mean reward of the chosen child for the searching side
    pub best_win_rate: f64,

    pub stats: SearchStats,

    pub tree: TreeStats,
}

/// MCTS search state.
///
/// One tree per search call, rooted at the position handed to [`MctsSearch::new`].
pub struct MctsSearch<'a, G: Game, E: Evaluator<G> + ?Sized> {
    tree: MctsTree<G::State, G::Move>,
    game: &'a G,
    evaluator: &'a E,
    config: MctsConfig,
    searching_side: Color,
    cancel: CancelToken,
    stats: SearchStats,
}

impl<'a, G: Game, E: Evaluator<G> + ?Sized> MctsSearch<'a, G, E> {
    /// Create a new MCTS search from the given game state.
    /// The side to move in `state` becomes the searching side.
    pub fn new(
        game: &'a G,
        evaluator: &'a E,
        config: MctsConfig,
        state: G::State,
    ) -> Result<Self, SearchError> {
        let searching_side = game.side_to_move(&state);
        let moves = game.generate_moves(&state, searching_side)?;
        let tree = MctsTree::new(state, searching_side, moves);

        Ok(Self {
            tree,
            game,
            evaluator,
            config,
            searching_side,
            cancel: CancelToken::new(),
            stats: SearchStats::default(),
        })
    }

    /// Replace the search's cancel token with a shared one.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn searching_side(&self) -> Color {
        self.searching_side
    }

    /// Run until `max_playouts` iterations have completed, the token is cancelled,
    /// or the time limit (when enabled) has elapsed.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<G::Move>, SearchError> {
        let start = Instant::now();
        let root_id = self.tree.root();

        let root_has_moves = !self.tree.get(root_id).untried_moves.is_empty();
        if root_has_moves {
            while self.stats.iterations < self.config.max_playouts {
                if self.cancel.is_cancelled() {
                    self.stats.cancelled = true;
                    break;
                }
                if self.config.use_time_limit && start.elapsed() >= self.config.time_limit {
                    self.stats.timed_out = true;
                    break;
                }
                self.iterate(rng)?;
                self.stats.iterations += 1;
            }
        }
        self.stats.total_time_us = start.elapsed().as_micros() as u64;

        let best = self.tree.best_child();
        let decision = match best.and_then(|id| self.tree.get(id).move_leading_here) {
            Some(mv) => Decision::Move(mv),
            None if !root_has_moves => Decision::NoCandidateMoves,
            None => Decision::Undecided,
        };
        let (best_visits, best_win_rate) = best
            .map(|id| {
                let node = self.tree.get(id);
                (node.visit_count, node.win_rate(false))
            })
            .unwrap_or((0, 0.0));

        let tree = self.tree.stats();
        debug!(
            decision = ?decision,
            side = %self.searching_side,
            iterations = self.stats.iterations,
            nodes = tree.total_nodes,
            max_depth = tree.max_depth,
            best_visits,
            best_win_rate = format!("{:.3}", best_win_rate),
            cancelled = self.stats.cancelled,
            timed_out = self.stats.timed_out,
            total_ms = self.stats.total_time_us / 1000,
            "MCTS search complete"
        );

        Ok(SearchResult {
            decision,
            iterations: self.stats.iterations,
            root_visits: self.tree.get(root_id).visit_count,
            best_visits,
            best_win_rate,
            stats: self.stats.clone(),
            tree,
        })
    }

    /// Run a single iteration (select -> expand -> simulate -> backpropagate).
    fn iterate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        let phase = Instant::now();
        let selected = self.select();
        self.stats.selection_time_us += phase.elapsed().as_micros() as u64;

        let phase = Instant::now();
        let leaf_id = self.expand(selected)?;
        self.stats.expansion_time_us += phase.elapsed().as_micros() as u64;

        let phase = Instant::now();
        let outcome = self.simulate(leaf_id, rng)?;
        self.stats.simulation_time_us += phase.elapsed().as_micros() as u64;

        let phase = Instant::now();
        self.tree.backpropagate(leaf_id, outcome.reward);
        self.stats.backprop_time_us += phase.elapsed().as_micros() as u64;

        trace!(
            iteration = self.stats.iterations,
            leaf = leaf_id.0,
            plies = outcome.plies,
            termination = ?outcome.termination,
            reward = outcome.reward,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Descend from the root through fully expanded nodes using UCB1.
    ///
    /// Stops at the first node with untried moves, or at a node with neither
    /// untried moves nor children.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if !node.is_fully_expanded() || node.is_leaf() {
                return current;
            }

            // The side choosing here is the opponent unless it is the searching side
            let perspective_is_opponent = node.side_to_move != self.searching_side;
            match self
                .tree
                .select_child(current, perspective_is_opponent, self.config.exploration_c)
            {
                Some(child_id) => current = child_id,
                None => return current,
            }
        }
    }

    /// Expand one untried move of `node_id`, taken from the end of the list.
    ///
    /// Moves capturing a king are dropped without creating a child. Returns the
    /// new child, or `node_id` itself once nothing is left to expand.
    fn expand(&mut self, node_id: NodeId) -> Result<NodeId, SearchError> {
        loop {
            let node = self.tree.get(node_id);
            let Some(&mv) = node.untried_moves.last() else {
                return Ok(node_id);
            };

            if self.game.captures_king(&node.state, mv) {
                trace!(node = node_id.0, mv = ?mv, "Skipping king capture");
                self.tree.get_mut(node_id).untried_moves.pop();
                self.stats.king_captures_skipped += 1;
                continue;
            }

            let child_side = node.side_to_move.opponent();
            let state = self.game.apply_move(&node.state, mv)?;
            let moves = self.game.generate_moves(&state, child_side)?;
            let child_id = self.tree.add_child(node_id, mv, state, moves);
            self.stats.nodes_created += 1;
            return Ok(child_id);
        }
    }

    /// Random rollout from a node's position.
    fn simulate(
        &mut self,
        node_id: NodeId,
        rng: &mut ChaCha20Rng,
    ) -> Result<RolloutOutcome, SearchError> {
        let node = self.tree.get(node_id);
        let board = self.game.to_lightweight(&node.state);

        let outcome = rollout(
            self.game,
            self.evaluator,
            board,
            node.side_to_move,
            self.searching_side,
            self.config.rollout_depth,
            rng,
        )?;

        if outcome.is_decisive() {
            self.stats.decisive_rollouts += 1;
        } else {
            self.stats.heuristic_rollouts += 1;
        }
        self.stats.rollout_plies += outcome.plies as u64;

        Ok(outcome)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::State, G::Move> {
        &self.tree
    }
}

/// Rollout RNG for a search: seeded from `config.seed` when set, otherwise from entropy.
pub fn search_rng(config: &MctsConfig) -> ChaCha20Rng {
    match config.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<G: Game, E: Evaluator<G> + ?Sized>(
    game: &G,
    evaluator: &E,
    config: MctsConfig,
    state: G::State,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<G::Move>, SearchError> {
    let mut search = MctsSearch::new(game, evaluator, config, state)?;
    search.run(rng)
}
