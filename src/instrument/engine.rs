use crate::game::GameState;

/// The alpha-beta bounds in effect when a position is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub alpha: i16,
    pub beta: i16,
}

impl Window {
    /// Widest window whose bounds can both be negated.
    pub const FULL: Window = Window {
        alpha: -i16::MAX,
        beta: i16::MAX,
    };

    pub fn new(alpha: i16, beta: i16) -> Self {
        Self { alpha, beta }
    }

    /// The same window seen from the other side.
    pub fn negated(&self) -> Self {
        Self {
            alpha: self.beta.saturating_neg(),
            beta: self.alpha.saturating_neg(),
        }
    }
}

/// Handle through which a search engine evaluates positions, including its own
/// recursive calls.
pub trait Search<S: GameState> {
    type Error;

    fn node_value(
        &mut self,
        state: &mut S,
        depth: u8,
        window: Option<Window>,
    ) -> Result<i16, Self::Error>;

    /// `None` when the engine has no quiescence slot.
    fn quiescence(&mut self, state: &mut S, window: Window) -> Option<Result<i16, Self::Error>>;
}

/// The evaluation slots an alpha-beta engine exposes.
///
/// `node_value` is mandatory. The other slots are optional: their default
/// implementations return `None`, which marks the slot as absent.
pub trait SearchEngine<S: GameState> {
    type Error;

    /// Scores `state` searched to `depth`, with or without an explicit window.
    fn node_value<D>(
        &self,
        search: &mut D,
        state: &mut S,
        depth: u8,
        window: Option<Window>,
    ) -> Result<i16, Self::Error>
    where
        D: Search<S, Error = Self::Error>;

    /// Scores `state` with an extension search past the nominal depth.
    fn quiescence<D>(
        &self,
        _search: &mut D,
        _state: &mut S,
        _window: Window,
    ) -> Option<Result<i16, Self::Error>>
    where
        D: Search<S, Error = Self::Error>,
    {
        None
    }

    /// Top-level entry point scoring every legal move at `state`.
    fn evaluate_moves<D>(
        &self,
        _search: &mut D,
        _state: &mut S,
    ) -> Option<Result<Vec<(S::Move, i16)>, Self::Error>>
    where
        D: Search<S, Error = Self::Error>,
    {
        None
    }

    /// Top-level entry point choosing a move at `state`.
    fn find_best_move<D>(
        &self,
        _search: &mut D,
        _state: &mut S,
    ) -> Option<Result<S::Move, Self::Error>>
    where
        D: Search<S, Error = Self::Error>,
    {
        None
    }
}

/// Runs an engine without recording anything.
pub struct Direct<'e, E> {
    engine: &'e E,
}

impl<'e, E> Direct<'e, E> {
    pub fn new(engine: &'e E) -> Self {
        Self { engine }
    }

    pub fn evaluate_moves<S>(
        &mut self,
        state: &mut S,
    ) -> Option<Result<Vec<(S::Move, i16)>, E::Error>>
    where
        S: GameState,
        E: SearchEngine<S>,
    {
        let engine = self.engine;
        engine.evaluate_moves(self, state)
    }

    pub fn find_best_move<S>(&mut self, state: &mut S) -> Option<Result<S::Move, E::Error>>
    where
        S: GameState,
        E: SearchEngine<S>,
    {
        let engine = self.engine;
        engine.find_best_move(self, state)
    }
}

impl<'e, S, E> Search<S> for Direct<'e, E>
where
    S: GameState,
    E: SearchEngine<S>,
{
    type Error = E::Error;

    fn node_value(
        &mut self,
        state: &mut S,
        depth: u8,
        window: Option<Window>,
    ) -> Result<i16, Self::Error> {
        let engine = self.engine;
        engine.node_value(self, state, depth, window)
    }

    fn quiescence(&mut self, state: &mut S, window: Window) -> Option<Result<i16, Self::Error>> {
        let engine = self.engine;
        engine.quiescence(self, state, window)
    }
}
