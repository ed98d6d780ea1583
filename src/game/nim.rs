//! Nim as a test game: players take 1-3 objects, last to take wins. White moves
//! first.

use std::fmt;

use super::{GameMove, GameState, MoveGenerator, Side};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NimState {
    pub pile: u8,
    pub history: Vec<NimMove>,
}

impl NimState {
    pub fn new(pile: u8) -> Self {
        Self {
            pile,
            history: Vec::new(),
        }
    }
}

impl GameState for NimState {
    type Move = NimMove;

    fn side_to_move(&self) -> Side {
        if self.history.len() % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }

    fn move_history(&self) -> &[NimMove] {
        &self.history
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NimMove {
    pub take: u8,
}

impl fmt::Display for NimMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take{}", self.take)
    }
}

impl GameMove for NimMove {
    type State = NimState;
    type Error = &'static str;

    fn apply(&self, state: &mut NimState) -> Result<(), Self::Error> {
        if self.take > state.pile || self.take == 0 || self.take > 3 {
            return Err("Invalid move");
        }
        state.pile -= self.take;
        state.history.push(*self);
        Ok(())
    }

    fn undo(&self, state: &mut NimState) -> Result<(), Self::Error> {
        state.history.pop();
        state.pile += self.take;
        Ok(())
    }
}

#[derive(Clone)]
pub(crate) struct NimMoveGenerator;

impl MoveGenerator<NimState> for NimMoveGenerator {
    type MoveList = Vec<NimMove>;

    fn generate_moves(&self, state: &mut NimState) -> Result<Vec<NimMove>, &'static str> {
        Ok((1..=std::cmp::min(3, state.pile))
            .map(|take| NimMove { take })
            .collect())
    }
}
