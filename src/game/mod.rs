//! Rules collaborator contract.
//!
//! The search tree never understands game rules on its own. Everything it needs
//! (side to move, the move stack, reversible move application and legal move
//! enumeration) is consumed through the traits in this module.

mod move_guard;
mod side;
mod traits;

#[cfg(test)]
pub(crate) mod nim;

pub use move_guard::MoveGuard;
pub use side::Side;
pub use traits::{GameMove, GameState, MoveCollection, MoveError, MoveGenerator};
