//! Tic-tac-toe as a complete rules collaborator.
//!
//! Small enough to search exhaustively, which makes it the game the command line,
//! the benches and most tree tests run against.

mod board;
mod cell;
mod evaluate;


pub use board::{Board, GameError, TicTacToeMoveGenerator};
pub use cell::{Cell, ParseCellError};
pub use evaluate::TicTacToeEvaluator;
