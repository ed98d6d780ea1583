use super::board::LINES;
use super::{Board, Cell};
use crate::game::Side;
use crate::minimax::Evaluator;

const WIN_SCORE: i16 = 100;

/// Scores a won board as ±(100 + remaining depth) so faster wins rank higher, and an
/// open board as the number of lines still open for White minus those open for Black.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToeEvaluator;

impl Evaluator<Board> for TicTacToeEvaluator {
    fn evaluate(&self, state: &mut Board, remaining_depth: u8) -> i16 {
        match state.winner() {
            Some(Side::White) => WIN_SCORE + i16::from(remaining_depth),
            Some(Side::Black) => -(WIN_SCORE + i16::from(remaining_depth)),
            None => open_lines(state, Side::White) - open_lines(state, Side::Black),
        }
    }
}

/// Lines holding at least one mark of `side` and none of its opponent.
fn open_lines(state: &Board, side: Side) -> i16 {
    LINES
        .iter()
        .filter(|line| {
            let owners = line.iter().map(|&index| state.get(Cell::ALL[index]));
            let mut has_own_mark = false;
            for owner in owners {
                match owner {
                    Some(owner) if owner == side => has_own_mark = true,
                    Some(_) => return false,
                    None => {}
                }
            }
            has_own_mark
        })
        .count() as i16
}
