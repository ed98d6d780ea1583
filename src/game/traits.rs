//! Core traits consumed from an external rules engine.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use super::Side;

/// Represents a position of a two-player game together with the moves that led to it.
pub trait GameState: Clone {
    type Move: GameMove<State = Self>;

    /// Returns the player whose turn it is.
    fn side_to_move(&self) -> Side;

    /// Returns every move applied so far, oldest first.
    ///
    /// The recorder slices this stack to find a position's path from the tree root,
    /// so `apply` must push onto it and `undo` must pop from it.
    fn move_history(&self) -> &[Self::Move];
}

/// Represents an action that can be applied to and undone from a game state.
///
/// `Display` is the move's standard notation; it labels edges when a tree is drawn.
pub trait GameMove: Clone + Eq + Hash + Debug + Display {
    type State: GameState<Move = Self>;
    type Error: Debug;

    /// Applies this move to the given state.
    fn apply(&self, state: &mut Self::State) -> Result<(), Self::Error>;

    /// Undoes this move on the given state. It must be the last move applied.
    fn undo(&self, state: &mut Self::State) -> Result<(), Self::Error>;

    /// Returns true if this move should be searched in quiescence.
    /// Default implementation returns false.
    fn is_tactical(&self, _state: &Self::State) -> bool {
        false
    }
}

/// The error a rules engine reports for positions of type `S`.
pub type MoveError<S> = <<S as GameState>::Move as GameMove>::Error;

/// Generates all legal moves from a given game state.
pub trait MoveGenerator<S: GameState> {
    type MoveList: MoveCollection<S::Move>;

    /// Generates all legal moves for the side to move. The list must be exhaustive
    /// and free of duplicates; its order is up to the implementation.
    fn generate_moves(&self, state: &mut S) -> Result<Self::MoveList, MoveError<S>>;
}

/// Abstraction over move collections (Vec, SmallVec, etc.)
pub trait MoveCollection<M>: AsRef<[M]> + AsMut<[M]> {
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M> MoveCollection<M> for Vec<M> {}

impl<A: smallvec::Array> MoveCollection<A::Item> for smallvec::SmallVec<A> {}
