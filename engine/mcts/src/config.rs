//! MCTS configuration parameters.

use std::time::Duration;

use chess_core::PromotionMode;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per search.
    pub max_playouts: u32,

    /// Whether the search is additionally bounded by `time_limit`.
    /// The limit is enforced by cancelling the search's token, so it only
    /// takes effect when the search runs through `start_search`.
    pub use_time_limit: bool,

    /// Wall-clock budget, checked between iterations.
    pub time_limit: Duration,

    /// Maximum number of plies played in a single random rollout before
    /// falling back to the heuristic evaluation.
    pub rollout_depth: u32,

    /// Which promotion pieces the tree expands. Rollouts always auto-queen.
    pub promotions: PromotionMode,

    /// Exploration constant `c` in UCB1.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration_c: f64,

    /// Seed for the rollout RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_playouts: 1000,
            use_time_limit: false,
            time_limit: Duration::from_millis(1000),
            rollout_depth: 50,
            promotions: PromotionMode::All,
            exploration_c: 1.0,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create a small, deterministic config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_playouts: 50,
            rollout_depth: 10,
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Builder pattern: set the playout budget.
    pub fn with_playouts(mut self, n: u32) -> Self {
        self.max_playouts = n;
        self
    }

    /// Builder pattern: enable the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.use_time_limit = true;
        self.time_limit = limit;
        self
    }

    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }

    pub fn with_promotions(mut self, promotions: PromotionMode) -> Self {
        self.promotions = promotions;
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration_c(mut self, c: f64) -> Self {
        self.exploration_c = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
