//! Command-line interface for exploring instrumented searches.
//! This module is not part of the public library API.

pub mod args;
pub mod commands;

pub use args::MinimaxTree;
