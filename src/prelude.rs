//! Common types re-exported for convenience.

pub use crate::game::{GameMove, GameState, MoveGenerator, Side};
pub use crate::instrument::{Direct, Instrumented, ScorePerspective, Search, SearchEngine, Window};
pub use crate::render::{ExportOptions, TreeGraph};
pub use crate::search_tree::{Evaluation, Node, SearchTree, TreeStats};
