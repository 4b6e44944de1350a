//! Running a search off the caller's task.
//!
//! [`start_search`] moves the whole search onto a Tokio blocking worker and hands
//! back a [`SearchHandle`]. The result is delivered exactly once through a oneshot
//! channel; aborting only flips the shared [`CancelToken`], so the worker still
//! reports whatever it decided before stopping.

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use chess_core::Game;

use crate::cancel::CancelToken;
use crate::config::MctsConfig;
use crate::evaluator::Evaluator;
use crate::search::{search_rng, MctsSearch, SearchError, SearchResult};

type SearchOutcome<M> = Result<SearchResult<M>, SearchError>;

/// Handle to a search running on a blocking worker.
#[derive(Debug)]
pub struct SearchHandle<M> {
    cancel: CancelToken,
    result: oneshot::Receiver<SearchOutcome<M>>,
    timer: Option<JoinHandle<()>>,
}

impl<M> SearchHandle<M> {
    /// Ask the search to stop after its current iteration.
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Wait for the search to finish and take its result.
    pub async fn wait(self) -> SearchOutcome<M> {
        let SearchHandle { result, timer, .. } = self;
        let outcome = result.await;
        if let Some(timer) = timer {
            timer.abort();
        }
        outcome.map_err(|_| SearchError::WorkerLost)?
    }
}

/// Start a search from `state` on a Tokio blocking worker.
///
/// When `config.use_time_limit` is set, a timer task also cancels the token after
/// `config.time_limit`, so other holders of the token see the stop; the playout
/// budget still applies.
///
/// Must be called from within a Tokio runtime.
pub fn start_search<G, E>(
    game: G,
    evaluator: E,
    state: G::State,
    config: MctsConfig,
) -> SearchHandle<G::Move>
where
    G: Game,
    E: Evaluator<G> + 'static,
{
    let cancel = CancelToken::new();
    let (tx, rx) = oneshot::channel();

    let timer = config.use_time_limit.then(|| {
        let token = cancel.clone();
        let limit = config.time_limit;
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            debug!(limit_ms = limit.as_millis() as u64, "Search time limit reached");
            token.cancel();
        })
    });

    let token = cancel.clone();
    tokio::task::spawn_blocking(move || {
        let mut rng = search_rng(&config);
        let outcome = MctsSearch::new(&game, &evaluator, config, state)
            .map(|search| search.with_cancel_token(token))
            .and_then(|mut search| search.run(&mut rng));
        // The receiver is gone if the handle was dropped; nobody is waiting
        let _ = tx.send(outcome);
    });

    SearchHandle {
        cancel,
        result: rx,
        timer,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::evaluator::{ConstantEvaluator, MaterialEvaluator};
    use crate::search::Decision;
    use crate::test_utils::{FailingEvaluator, ScriptState, ScriptedGame};
    use chess_core::{Board, Chess, Color};

    #[tokio::test]
    async fn test_search_completes() {
        let config = MctsConfig::for_testing().with_playouts(40);
        let handle = start_search(
            Chess::default(),
            MaterialEvaluator::new(),
            Board::starting_position(),
            config,
        );

        let result = handle.wait().await.unwrap();
        assert!(result.decision.best_move().is_some());
        assert_eq!(result.iterations, 40);
        assert!(!result.stats.cancelled);
    }

    #[tokio::test]
    async fn test_abort_stops_unbounded_search() {
        let config = MctsConfig::for_testing().with_playouts(u32::MAX);
        let handle = start_search(
            ScriptedGame::with_moves(&[0, 1, 2]),
            ConstantEvaluator::new(0.5),
            ScriptState::root(Color::White),
            config,
        );

        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.abort();
        let result = handle.wait().await.unwrap();

        assert!(result.stats.cancelled);
        assert!(result.iterations < u32::MAX);
    }

    #[tokio::test]
    async fn test_time_limit_cancels_search() {
        let config = MctsConfig::for_testing()
            .with_playouts(u32::MAX)
            .with_time_limit(Duration::from_millis(30));
        let handle = start_search(
            ScriptedGame::with_moves(&[0, 1, 2]),
            ConstantEvaluator::new(0.5),
            ScriptState::root(Color::White),
            config,
        );

        // Either the timer task or the loop's own clock check stops it first
        let result = handle.wait().await.unwrap();
        assert!(result.stats.cancelled || result.stats.timed_out);
        assert!(result.iterations < u32::MAX);
        assert_eq!(result.iterations, result.root_visits);
    }

    #[tokio::test]
    async fn test_no_candidate_moves_is_reported() {
        let handle = start_search(
            ScriptedGame::with_moves(&[]),
            ConstantEvaluator::new(0.5),
            ScriptState::root(Color::Black),
            MctsConfig::for_testing(),
        );
        let result = handle.wait().await.unwrap();
        assert_eq!(result.decision, Decision::NoCandidateMoves);
    }

    #[tokio::test]
    async fn test_worker_errors_reach_the_caller() {
        let handle = start_search(
            ScriptedGame::with_moves(&[0]),
            FailingEvaluator,
            ScriptState::root(Color::White),
            MctsConfig::for_testing(),
        );
        let err = handle.wait().await.unwrap_err();
        assert!(matches!(err, SearchError::EvaluatorError(_)));
    }
}
