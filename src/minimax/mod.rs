//! Reference alpha-beta engine exposing every instrumentation slot.
//!
//! The engine is generic over the rules traits and an [`Evaluator`]. All scores are
//! White-positive; White maximizes and Black minimizes.
//!
//! - `node_value` is a fail-soft alpha-beta minimax. At depth 0 it defers to the
//!   quiescence slot when enabled, otherwise to the static evaluator.
//! - `quiescence` stands pat and then searches tactical moves only.
//! - `evaluate_moves` scores every legal root move with a full window.
//! - `find_best_move` deepens iteratively from depth 1, searching the previous best
//!   move first at every pass.

mod engine;


pub use engine::{EngineConfig, Evaluator, MinimaxEngine, SearchError};
