use std::cmp::{max, min};
use std::fmt::Debug;

use log::debug;
use thiserror::Error;

use crate::game::{GameMove, GameState, MoveCollection, MoveError, MoveGenerator, MoveGuard};
use crate::instrument::{Search, SearchEngine, Window};
use crate::search_tree::AnnotateError;

#[derive(Error, Debug)]
pub enum SearchError<E: Debug> {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("rules engine rejected a move: {0:?}")]
    Rules(E),
    #[error("{0}")]
    Annotate(AnnotateError<E>),
}

impl<E: Debug> From<AnnotateError<E>> for SearchError<E> {
    fn from(err: AnnotateError<E>) -> Self {
        SearchError::Annotate(err)
    }
}

/// Evaluates a game position and returns a score.
pub trait Evaluator<S: GameState> {
    /// Evaluates the given state. Higher scores favor White.
    fn evaluate(&self, state: &mut S, remaining_depth: u8) -> i16;
}

/// Search configuration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub depth: u8,
    /// Exposes the quiescence slot and extends leaves with tactical moves.
    pub quiescence: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            quiescence: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MinimaxEngine<G, V> {
    config: EngineConfig,
    move_generator: G,
    evaluator: V,
}

impl<G, V> MinimaxEngine<G, V> {
    pub fn new(config: EngineConfig, move_generator: G, evaluator: V) -> Self {
        Self {
            config,
            move_generator,
            evaluator,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn move_generator(&self) -> &G {
        &self.move_generator
    }
}

/// Applies a move, executes a closure with the new state, then undoes the move.
fn with_move_applied<S, F, R>(
    game_move: &S::Move,
    state: &mut S,
    f: F,
) -> Result<R, SearchError<MoveError<S>>>
where
    S: GameState,
    F: FnOnce(&mut S) -> Result<R, SearchError<MoveError<S>>>,
{
    let mut guard = MoveGuard::apply(game_move, state).map_err(SearchError::Rules)?;
    let result = f(guard.state());
    guard.finish().map_err(SearchError::Rules)?;
    result
}

impl<G, V> MinimaxEngine<G, V> {
    fn quiesce<S, D>(
        &self,
        search: &mut D,
        state: &mut S,
        window: Window,
    ) -> Result<i16, SearchError<MoveError<S>>>
    where
        S: GameState,
        G: MoveGenerator<S>,
        V: Evaluator<S>,
        D: Search<S, Error = SearchError<MoveError<S>>>,
    {
        let Window { mut alpha, mut beta } = window;
        let maximizing_player = state.side_to_move().maximize_score();
        let stand_pat = self.evaluator.evaluate(state, 0);

        if maximizing_player {
            if stand_pat >= beta {
                return Ok(stand_pat);
            }
            alpha = max(alpha, stand_pat);
        } else {
            if stand_pat <= alpha {
                return Ok(stand_pat);
            }
            beta = min(beta, stand_pat);
        }

        let candidates = self
            .move_generator
            .generate_moves(state)
            .map_err(SearchError::Rules)?;
        let tactical_moves: Vec<S::Move> = candidates
            .as_ref()
            .iter()
            .filter(|game_move| game_move.is_tactical(state))
            .cloned()
            .collect();

        let mut best_score = stand_pat;
        for game_move in tactical_moves.iter() {
            let child_window = Window::new(alpha, beta);
            let score = with_move_applied(game_move, state, |state| {
                match search.quiescence(state, child_window) {
                    Some(score) => score,
                    None => Ok(self.evaluator.evaluate(state, 0)),
                }
            })?;

            if maximizing_player {
                best_score = max(best_score, score);
                alpha = max(alpha, score);
            } else {
                best_score = min(best_score, score);
                beta = min(beta, score);
            }
            if beta <= alpha {
                break;
            }
        }

        Ok(best_score)
    }

    fn score_root_moves<S, D>(
        &self,
        search: &mut D,
        state: &mut S,
    ) -> Result<Vec<(S::Move, i16)>, SearchError<MoveError<S>>>
    where
        S: GameState,
        G: MoveGenerator<S>,
        D: Search<S, Error = SearchError<MoveError<S>>>,
    {
        let depth = self.config.depth;
        if depth < 1 {
            return Err(SearchError::DepthTooLow);
        }

        let candidates = self
            .move_generator
            .generate_moves(state)
            .map_err(SearchError::Rules)?;
        if candidates.is_empty() {
            return Err(SearchError::NoAvailableMoves);
        }

        let mut scored = Vec::with_capacity(candidates.len());
        for game_move in candidates.as_ref() {
            let score = with_move_applied(game_move, state, |state| {
                search.node_value(state, depth - 1, Some(Window::FULL))
            })?;
            scored.push((game_move.clone(), score));
        }
        Ok(scored)
    }

    fn search_best_move<S, D>(
        &self,
        search: &mut D,
        state: &mut S,
    ) -> Result<S::Move, SearchError<MoveError<S>>>
    where
        S: GameState,
        G: MoveGenerator<S>,
        D: Search<S, Error = SearchError<MoveError<S>>>,
    {
        let target_depth = self.config.depth;
        if target_depth < 1 {
            return Err(SearchError::DepthTooLow);
        }

        let mut candidates: Vec<S::Move> = self
            .move_generator
            .generate_moves(state)
            .map_err(SearchError::Rules)?
            .as_ref()
            .to_vec();
        if candidates.is_empty() {
            return Err(SearchError::NoAvailableMoves);
        }

        let maximizing_player = state.side_to_move().maximize_score();
        let mut best_move: Option<S::Move> = None;

        // Iterative deepening: the best move of each pass is searched first in the next
        for depth in 1..=target_depth {
            if let Some(ref prev_best) = best_move {
                if let Some(pos) = candidates.iter().position(|m| m == prev_best) {
                    candidates[0..=pos].rotate_right(1);
                }
            }
            debug!("iterative deepening pass at depth {}", depth);

            let mut window = Window::FULL;
            let mut best_score = if maximizing_player {
                i16::MIN
            } else {
                i16::MAX
            };
            let mut pass_best = None;

            for game_move in candidates.iter() {
                let child_window = window;
                let score = with_move_applied(game_move, state, |state| {
                    search.node_value(state, depth - 1, Some(child_window))
                })?;

                let is_better = if maximizing_player {
                    score > best_score
                } else {
                    score < best_score
                };
                if is_better {
                    best_score = score;
                    pass_best = Some(game_move.clone());
                }

                if maximizing_player {
                    window.alpha = max(window.alpha, score);
                } else {
                    window.beta = min(window.beta, score);
                }
            }

            if pass_best.is_some() {
                best_move = pass_best;
            }
        }

        best_move.ok_or(SearchError::NoAvailableMoves)
    }
}

impl<S, G, V> SearchEngine<S> for MinimaxEngine<G, V>
where
    S: GameState,
    G: MoveGenerator<S>,
    V: Evaluator<S>,
{
    type Error = SearchError<MoveError<S>>;

    fn node_value<D>(
        &self,
        search: &mut D,
        state: &mut S,
        depth: u8,
        window: Option<Window>,
    ) -> Result<i16, Self::Error>
    where
        D: Search<S, Error = Self::Error>,
    {
        let Window { mut alpha, mut beta } = window.unwrap_or(Window::FULL);

        if depth == 0 {
            return match search.quiescence(state, Window::new(alpha, beta)) {
                Some(score) => score,
                None => Ok(self.evaluator.evaluate(state, 0)),
            };
        }

        let candidates = self
            .move_generator
            .generate_moves(state)
            .map_err(SearchError::Rules)?;
        if candidates.is_empty() {
            return Ok(self.evaluator.evaluate(state, depth));
        }

        let maximizing_player = state.side_to_move().maximize_score();
        let mut best_score = if maximizing_player {
            i16::MIN
        } else {
            i16::MAX
        };

        for game_move in candidates.as_ref() {
            let child_window = Window::new(alpha, beta);
            let score = with_move_applied(game_move, state, |state| {
                search.node_value(state, depth - 1, Some(child_window))
            })?;

            if maximizing_player {
                best_score = max(best_score, score);
                alpha = max(alpha, score);
            } else {
                best_score = min(best_score, score);
                beta = min(beta, score);
            }
            if beta <= alpha {
                break;
            }
        }

        Ok(best_score)
    }

    fn quiescence<D>(
        &self,
        search: &mut D,
        state: &mut S,
        window: Window,
    ) -> Option<Result<i16, Self::Error>>
    where
        D: Search<S, Error = Self::Error>,
    {
        if !self.config.quiescence {
            return None;
        }
        Some(self.quiesce(search, state, window))
    }

    fn evaluate_moves<D>(
        &self,
        search: &mut D,
        state: &mut S,
    ) -> Option<Result<Vec<(S::Move, i16)>, Self::Error>>
    where
        D: Search<S, Error = Self::Error>,
    {
        Some(self.score_root_moves(search, state))
    }

    fn find_best_move<D>(
        &self,
        search: &mut D,
        state: &mut S,
    ) -> Option<Result<S::Move, Self::Error>>
    where
        D: Search<S, Error = Self::Error>,
    {
        Some(self.search_best_move(search, state))
    }
}
