use log::error;

use super::GameMove;

/// Keeps a move applied to a position for as long as the guard lives.
///
/// `finish` undoes the move and reports a failed undo. A guard dropped without
/// `finish` (an early return, a propagated error) still undoes the move, logging
/// the failure since `Drop` cannot return it.
#[must_use]
pub struct MoveGuard<'a, M: GameMove> {
    state: &'a mut M::State,
    game_move: &'a M,
    applied: bool,
}

impl<'a, M: GameMove> MoveGuard<'a, M> {
    pub fn apply(game_move: &'a M, state: &'a mut M::State) -> Result<Self, M::Error> {
        game_move.apply(state)?;
        Ok(Self {
            state,
            game_move,
            applied: true,
        })
    }

    pub fn state(&mut self) -> &mut M::State {
        &mut *self.state
    }

    pub fn game_move(&self) -> &M {
        self.game_move
    }

    pub fn finish(mut self) -> Result<(), M::Error> {
        self.applied = false;
        self.game_move.undo(&mut *self.state)
    }
}

impl<'a, M: GameMove> Drop for MoveGuard<'a, M> {
    fn drop(&mut self) {
        if self.applied {
            if let Err(err) = self.game_move.undo(&mut *self.state) {
                error!("failed to undo {} on scope exit: {:?}", self.game_move, err);
            }
        }
    }
}
