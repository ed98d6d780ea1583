use std::str::FromStr;

use log::debug;

use super::engine::{Search, SearchEngine, Window};
use crate::game::{GameState, MoveError, MoveGenerator};
use crate::search_tree::{AnnotateError, Evaluation, SearchTree};

/// Whose point of view an engine's scores are expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScorePerspective {
    /// Scores are White-positive (minimax engines).
    Absolute,
    /// Scores favour the side to move (negamax engines). At positions where Black
    /// is to move, recorded scores are negated and windows recorded as `(-beta, -alpha)`.
    SideToMove,
}

impl Default for ScorePerspective {
    fn default() -> Self {
        ScorePerspective::Absolute
    }
}

impl FromStr for ScorePerspective {
    type Err = &'static str;
    fn from_str(perspective: &str) -> Result<Self, Self::Err> {
        match perspective {
            "absolute" => Ok(ScorePerspective::Absolute),
            "side-to-move" => Ok(ScorePerspective::SideToMove),
            _ => Err("invalid perspective; options are: absolute, side-to-move"),
        }
    }
}

/// A [`Search`] handle that records every evaluation into a caller-owned tree.
///
/// Return values and errors of the wrapped engine pass through unchanged. The
/// top-level entry points reset the tree before calling through and annotate it
/// afterwards.
pub struct Instrumented<'a, S: GameState, E, G> {
    engine: &'a E,
    move_generator: &'a G,
    tree: &'a mut SearchTree<S>,
    perspective: ScorePerspective,
    quiescence_entry: Option<usize>,
    recorded: usize,
}

impl<'a, S, E, G> Instrumented<'a, S, E, G>
where
    S: GameState,
    E: SearchEngine<S>,
    G: MoveGenerator<S>,
{
    pub fn new(engine: &'a E, move_generator: &'a G, tree: &'a mut SearchTree<S>) -> Self {
        Self {
            engine,
            move_generator,
            tree,
            perspective: ScorePerspective::default(),
            quiescence_entry: None,
            recorded: 0,
        }
    }

    pub fn with_perspective(mut self, perspective: ScorePerspective) -> Self {
        self.perspective = perspective;
        self
    }

    pub fn tree(&self) -> &SearchTree<S> {
        &*self.tree
    }

    /// Number of evaluations recorded since the last top-level entry point began.
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn evaluate_moves(
        &mut self,
        state: &mut S,
    ) -> Option<Result<Vec<(S::Move, i16)>, E::Error>>
    where
        E::Error: From<AnnotateError<MoveError<S>>>,
    {
        self.begin(state);
        let engine = self.engine;
        let result = engine.evaluate_moves(self, state);
        self.complete(result)
    }

    pub fn find_best_move(&mut self, state: &mut S) -> Option<Result<S::Move, E::Error>>
    where
        E::Error: From<AnnotateError<MoveError<S>>>,
    {
        self.begin(state);
        let engine = self.engine;
        let result = engine.find_best_move(self, state);
        self.complete(result)
    }

    fn begin(&mut self, state: &S) {
        self.tree.init(state);
        self.quiescence_entry = None;
        self.recorded = 0;
    }

    fn complete<T>(&mut self, result: Option<Result<T, E::Error>>) -> Option<Result<T, E::Error>>
    where
        E::Error: From<AnnotateError<MoveError<S>>>,
    {
        match result {
            Some(Ok(value)) => {
                debug!("search finished after {} evaluations", self.recorded);
                let annotated = self.tree.complete(self.move_generator);
                Some(annotated.map(|()| value).map_err(Into::into))
            }
            other => other,
        }
    }

    fn record(&mut self, state: &S, evaluation: Evaluation) {
        self.tree.record(state, evaluation);
        self.recorded += 1;
    }

    /// True when scores at `state` are Black-positive and need flipping.
    fn flips(&self, state: &S) -> bool {
        self.perspective == ScorePerspective::SideToMove && !state.side_to_move().maximize_score()
    }

    fn absolute(&self, state: &S, score: i16) -> i16 {
        if self.flips(state) {
            score.saturating_neg()
        } else {
            score
        }
    }

    /// The window in the same frame as [`Self::absolute`] scores.
    fn absolute_window(&self, state: &S, window: Window) -> Window {
        if self.flips(state) {
            window.negated()
        } else {
            window
        }
    }
}

impl<'a, S, E, G> Search<S> for Instrumented<'a, S, E, G>
where
    S: GameState,
    E: SearchEngine<S>,
    G: MoveGenerator<S>,
{
    type Error = E::Error;

    fn node_value(
        &mut self,
        state: &mut S,
        depth: u8,
        window: Option<Window>,
    ) -> Result<i16, Self::Error> {
        self.tree.check_reset(state, i16::from(depth));

        let engine = self.engine;
        let score = engine.node_value(self, state, depth, window)?;

        let mut evaluation =
            Evaluation::new(self.absolute(state, score)).with_depth(i16::from(depth));
        if let Some(window) = window {
            let Window { alpha, beta } = self.absolute_window(state, window);
            evaluation = evaluation.with_window(alpha, beta);
        }
        self.record(state, evaluation);
        Ok(score)
    }

    /// Quiescence nodes record their distance past the ply where the outermost
    /// quiescence call began, as a non-positive depth.
    fn quiescence(&mut self, state: &mut S, window: Window) -> Option<Result<i16, Self::Error>> {
        let ply = state.move_history().len();
        let outermost = self.quiescence_entry.is_none();
        let entry_ply = *self.quiescence_entry.get_or_insert(ply);

        let engine = self.engine;
        let result = engine.quiescence(self, state, window);
        if outermost {
            self.quiescence_entry = None;
        }

        let score = match result? {
            Ok(score) => score,
            Err(err) => return Some(Err(err)),
        };

        let depth = -(ply.saturating_sub(entry_ply) as i16);
        let Window { alpha, beta } = self.absolute_window(state, window);
        let evaluation = Evaluation::new(self.absolute(state, score))
            .with_depth(depth)
            .with_window(alpha, beta)
            .quiescence();
        self.record(state, evaluation);
        Some(Ok(score))
    }
}
