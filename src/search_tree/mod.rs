//! Reconstruction of the tree explored by a minimax/alpha-beta search.
//!
//! A [`SearchTree`] is fed one evaluation at a time while the search runs, then
//! annotated once it finishes: the principal variation is marked, and every legal
//! move the search skipped is added as a pruned child of the node it was skipped at.

mod annotate;
mod node;
mod stats;
mod tree;

#[cfg(test)]
mod tests;

pub use annotate::AnnotateError;
pub use node::{Evaluation, Node};
pub use stats::TreeStats;
pub use tree::SearchTree;
