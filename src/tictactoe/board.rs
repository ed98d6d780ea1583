use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use super::Cell;
use crate::game::{GameMove, GameState, MoveGenerator, Side};

/// Rows, columns and diagonals.
pub(crate) const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("cell {0} is already occupied")]
    Occupied(Cell),
    #[error("the game is already over")]
    GameOver,
    #[error("cannot undo {0}, it is not the last move played")]
    NotLastMove(Cell),
}

/// A tic-tac-toe position. White moves first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Side>; 9],
    history: Vec<Cell>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays `moves` in order from the empty board.
    pub fn from_moves(moves: &[Cell]) -> Result<Self, GameError> {
        let mut board = Self::new();
        for cell in moves {
            cell.apply(&mut board)?;
        }
        Ok(board)
    }

    pub fn get(&self, cell: Cell) -> Option<Side> {
        self.cells[cell.index()]
    }

    pub fn winner(&self) -> Option<Side> {
        LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Some(side) if self.cells[b] == Some(side) && self.cells[c] == Some(side) => Some(side),
            _ => None,
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// True if playing `cell` would complete a line for either side.
    pub fn completes_line(&self, cell: Cell) -> bool {
        LINES
            .iter()
            .filter(|line| line.contains(&cell.index()))
            .any(|line| {
                let others: SmallVec<[Option<Side>; 2]> = line
                    .iter()
                    .filter(|&&index| index != cell.index())
                    .map(|&index| self.cells[index])
                    .collect();
                others[0].is_some() && others[0] == others[1]
            })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..3).rev() {
            let row: String = (0..3)
                .filter_map(|file| Cell::new(file, rank))
                .map(|cell| match self.get(cell) {
                    Some(Side::White) => 'X',
                    Some(Side::Black) => 'O',
                    None => '.',
                })
                .collect();
            writeln!(f, "{} {}", rank + 1, row)?;
        }
        write!(f, "  abc")
    }
}

impl GameState for Board {
    type Move = Cell;

    fn side_to_move(&self) -> Side {
        if self.history.len() % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }

    fn move_history(&self) -> &[Cell] {
        &self.history
    }
}

impl GameMove for Cell {
    type State = Board;
    type Error = GameError;

    fn apply(&self, state: &mut Board) -> Result<(), GameError> {
        if state.winner().is_some() {
            return Err(GameError::GameOver);
        }
        if state.get(*self).is_some() {
            return Err(GameError::Occupied(*self));
        }
        state.cells[self.index()] = Some(state.side_to_move());
        state.history.push(*self);
        Ok(())
    }

    fn undo(&self, state: &mut Board) -> Result<(), GameError> {
        if state.history.last() != Some(self) {
            return Err(GameError::NotLastMove(*self));
        }
        state.history.pop();
        state.cells[self.index()] = None;
        Ok(())
    }

    fn is_tactical(&self, state: &Board) -> bool {
        state.completes_line(*self)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToeMoveGenerator;

impl MoveGenerator<Board> for TicTacToeMoveGenerator {
    type MoveList = SmallVec<[Cell; 9]>;

    fn generate_moves(&self, state: &mut Board) -> Result<Self::MoveList, GameError> {
        if state.winner().is_some() {
            return Ok(SmallVec::new());
        }
        Ok(Cell::ALL
            .iter()
            .copied()
            .filter(|&cell| state.get(cell).is_none())
            .collect())
    }
}
