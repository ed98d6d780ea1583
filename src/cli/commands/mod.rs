//! CLI command implementations.

pub trait Command {
    fn execute(self);
}

pub mod draw;
pub mod stats;

// Shared utilities for commands
pub(crate) mod util;
