use std::fmt;
use std::str::FromStr;

/// The player whose turn it is at a position.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Black = 0,
    White = 1,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Black, Side::White];

    pub fn opposite(&self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Scores recorded in a search tree are White-positive.
    pub fn maximize_score(&self) -> bool {
        match self {
            Side::White => true,
            Side::Black => false,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side_str = match self {
            Side::Black => "black",
            Side::White => "white",
        };
        write!(f, "{}", side_str)
    }
}

// used for parsing cli args
type ParseError = &'static str;
impl FromStr for Side {
    type Err = ParseError;
    fn from_str(side: &str) -> Result<Self, Self::Err> {
        match side {
            "black" => Ok(Side::Black),
            "white" => Ok(Side::White),
            _ => Err("invalid side; options are: black, white"),
        }
    }
}
