//! Game runner: plays games between two policies from a fixed start position

use anyhow::{anyhow, Result};
use chess_core::{Board, Color, Move, MoveGenerator};
use indicatif::{ProgressBar, ProgressStyle};
use mcts::{MctsConfig, SearchStats};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::config::{Config, PlayerKind};
use crate::mcts_policy::MctsPolicy;
use crate::policy::{Policy, RandomPolicy};

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    KingCaptured { winner: Color },
    /// The side to move had nothing to play
    NoMove { side: Color },
    PlyLimit,
    Interrupted,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::KingCaptured { winner } => write!(f, "{} captured the king", winner),
            GameOutcome::NoMove { side } => write!(f, "{} had no move", side),
            GameOutcome::PlyLimit => write!(f, "ply limit reached"),
            GameOutcome::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Aggregated MCTS stats for a game.
#[derive(Debug, Default, Clone)]
pub struct GameStats {
    /// Number of MCTS searches performed
    pub search_count: u32,
    pub iterations: u64,
    pub nodes_created: u64,
    pub king_captures_skipped: u64,
    pub decisive_rollouts: u64,
    pub heuristic_rollouts: u64,
    /// Total wall-clock time across all searches (microseconds)
    pub total_time_us: u64,
    pub selection_time_us: u64,
    pub expansion_time_us: u64,
    pub simulation_time_us: u64,
    pub backprop_time_us: u64,
}

impl GameStats {
    /// Add stats from a single MCTS search.
    fn add(&mut self, stats: &SearchStats) {
        self.search_count += 1;
        self.iterations += stats.iterations as u64;
        self.nodes_created += stats.nodes_created as u64;
        self.king_captures_skipped += stats.king_captures_skipped as u64;
        self.decisive_rollouts += stats.decisive_rollouts as u64;
        self.heuristic_rollouts += stats.heuristic_rollouts as u64;
        self.total_time_us += stats.total_time_us;
        self.selection_time_us += stats.selection_time_us;
        self.expansion_time_us += stats.expansion_time_us;
        self.simulation_time_us += stats.simulation_time_us;
        self.backprop_time_us += stats.backprop_time_us;
    }

    /// Log a summary of the game's search stats.
    fn log_summary(&self, game: u32) {
        if self.search_count == 0 || self.total_time_us == 0 {
            return;
        }

        let pct = |part: u64| (part as f64 / self.total_time_us as f64) * 100.0;
        let total_ms = self.total_time_us as f64 / 1000.0;

        info!(
            game,
            searches = self.search_count,
            iterations = self.iterations,
            nodes = self.nodes_created,
            total_ms = format!("{:.1}", total_ms),
            selection_pct = format!("{:.1}%", pct(self.selection_time_us)),
            expansion_pct = format!("{:.1}%", pct(self.expansion_time_us)),
            simulation_pct = format!("{:.1}%", pct(self.simulation_time_us)),
            backprop_pct = format!("{:.1}%", pct(self.backprop_time_us)),
            decisive_rollouts = self.decisive_rollouts,
            heuristic_rollouts = self.heuristic_rollouts,
            king_captures_skipped = self.king_captures_skipped,
            "MCTS game stats"
        );
    }
}

/// Everything recorded about one finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub index: u32,
    pub outcome: GameOutcome,
    pub moves: Vec<Move>,
    pub final_fen: String,
    pub stats: GameStats,
    pub duration: Duration,
}

impl GameRecord {
    pub fn plies(&self) -> u32 {
        self.moves.len() as u32
    }
}

/// Tally of outcomes across a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub games: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub no_move: u32,
    pub ply_limit: u32,
    pub interrupted: u32,
    pub failed: u32,
}

impl MatchSummary {
    fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::KingCaptured {
                winner: Color::White,
            } => self.white_wins += 1,
            GameOutcome::KingCaptured {
                winner: Color::Black,
            } => self.black_wins += 1,
            GameOutcome::NoMove { .. } => self.no_move += 1,
            GameOutcome::PlyLimit => self.ply_limit += 1,
            GameOutcome::Interrupted => self.interrupted += 1,
        }
    }
}

/// Derive a per-player seed so each game and side gets its own stream.
fn player_seed(base: u64, game: u32, side: Color) -> u64 {
    let side_offset = match side {
        Color::White => 0,
        Color::Black => 1,
    };
    base.wrapping_add(((game as u64) * 2 + side_offset) << 32)
}

pub struct Actor {
    config: Config,
    start: Board,
    mcts_config: MctsConfig,
    white: PlayerKind,
    black: PlayerKind,
    games_played: AtomicU32,
    shutdown_signal: AtomicBool,
}

impl Actor {
    pub fn new(config: Config) -> Result<Self> {
        let start = config.start_board()?;
        if let Some(winner) = start.king_capture_winner() {
            return Err(anyhow!(
                "start position is already decided in favour of {}",
                winner
            ));
        }

        let white = config.white_player()?;
        let black = config.black_player()?;
        let mcts_config = config.mcts_config()?;

        info!(
            white = %white,
            black = %black,
            fen = %start.to_fen(),
            "Actor initialized"
        );
        info!(
            playouts = mcts_config.max_playouts,
            time_limit_ms = config.time_limit_ms,
            rollout_depth = mcts_config.rollout_depth,
            exploration_c = mcts_config.exploration_c,
            promotions = %mcts_config.promotions,
            seed = ?mcts_config.seed,
            "MCTS config"
        );

        Ok(Self {
            config,
            start,
            mcts_config,
            white,
            black,
            games_played: AtomicU32::new(0),
            shutdown_signal: AtomicBool::new(false),
        })
    }

    /// Ask the actor to stop; the current game ends before its next move.
    pub fn shutdown(&self) {
        self.shutdown_signal.store(true, Ordering::Relaxed);
    }

    pub fn games_played(&self) -> u32 {
        self.games_played.load(Ordering::Relaxed)
    }

    pub async fn run(&self) -> Result<MatchSummary> {
        info!(games = self.config.games, "Actor starting main loop");

        // Progress bar only when stderr is a TTY
        let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(self.config.games as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut summary = MatchSummary::default();

        while self.games_played() < self.config.games {
            if self.shutdown_signal.load(Ordering::Relaxed) {
                info!("Shutdown signal received, stopping actor");
                break;
            }

            let index = self.games_played.fetch_add(1, Ordering::Relaxed) + 1;
            match self.play_game(index).await {
                Ok(record) => {
                    summary.record(record.outcome);
                    if let Some(ref pb) = progress {
                        pb.inc(1);
                    }

                    let log = || {
                        info!(
                            game = record.index,
                            outcome = %record.outcome,
                            plies = record.plies(),
                            duration = format!("{:.2}s", record.duration.as_secs_f64()),
                            final_fen = %record.final_fen,
                            "Game finished"
                        );
                        record.stats.log_summary(record.index);
                    };
                    // Suspend progress bar while logging to avoid visual glitches
                    match progress {
                        Some(ref pb) => pb.suspend(log),
                        None => log(),
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    error!("Game {} failed: {}", index, e);
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!(
            games = summary.games,
            white_wins = summary.white_wins,
            black_wins = summary.black_wins,
            no_move = summary.no_move,
            ply_limit = summary.ply_limit,
            interrupted = summary.interrupted,
            failed = summary.failed,
            "Actor finished"
        );

        Ok(summary)
    }

    fn make_policy(&self, kind: PlayerKind, game: u32, side: Color) -> Box<dyn Policy> {
        let seed = self
            .config
            .base_seed()
            .map(|base| player_seed(base, game, side));
        match kind {
            PlayerKind::Random => {
                let generator = MoveGenerator::new(self.mcts_config.promotions);
                match seed {
                    Some(seed) => Box::new(RandomPolicy::with_seed(generator, seed)),
                    None => Box::new(RandomPolicy::new(generator)),
                }
            }
            PlayerKind::Mcts => {
                let mut config = self.mcts_config.clone();
                config.seed = seed;
                Box::new(MctsPolicy::new(config))
            }
        }
    }

    /// Play one game to completion.
    pub async fn play_game(&self, index: u32) -> Result<GameRecord> {
        let started = Instant::now();
        let mut white = self.make_policy(self.white, index, Color::White);
        let mut black = self.make_policy(self.black, index, Color::Black);

        let mut board = self.start.clone();
        let mut moves = Vec::new();
        let mut stats = GameStats::default();

        let outcome = loop {
            if moves.len() as u32 >= self.config.max_plies {
                break GameOutcome::PlyLimit;
            }
            if self.shutdown_signal.load(Ordering::Relaxed) {
                break GameOutcome::Interrupted;
            }

            let side = board.side_to_move();
            let policy = match side {
                Color::White => &mut white,
                Color::Black => &mut black,
            };

            let Some(mv) = policy.choose_move(&board).await? else {
                break GameOutcome::NoMove { side };
            };
            if let Some(search) = policy.search_stats() {
                stats.add(search);
            }

            board = board.make_move(mv)?;
            moves.push(mv);
            debug!(
                game = index,
                ply = moves.len(),
                side = %side,
                player = policy.name(),
                mv = %mv,
                "Move played"
            );

            if let Some(winner) = board.king_capture_winner() {
                break GameOutcome::KingCaptured { winner };
            }
        };

        Ok(GameRecord {
            index,
            outcome,
            moves,
            final_fen: board.to_fen(),
            stats,
            duration: started.elapsed(),
        })
    }
}
