use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A square of the 3x3 board, written `a1`..`c3` (file then rank).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(u8);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCellError {
    #[error("invalid cell `{0}`; expected a file a-c followed by a rank 1-3")]
    InvalidCell(String),
}

impl Cell {
    pub const ALL: [Cell; 9] = [
        Cell(0),
        Cell(1),
        Cell(2),
        Cell(3),
        Cell(4),
        Cell(5),
        Cell(6),
        Cell(7),
        Cell(8),
    ];

    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 3 && rank < 3 {
            Some(Cell(rank * 3 + file))
        } else {
            None
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn file(&self) -> u8 {
        self.0 % 3
    }

    pub fn rank(&self) -> u8 {
        self.0 / 3
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCellError::InvalidCell(input.to_string());
        let bytes = input.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }

        let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Cell::new(file, rank).ok_or_else(invalid)
    }
}
