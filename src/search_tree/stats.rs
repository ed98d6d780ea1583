use std::fmt;
use std::hash::Hash;

use super::node::Node;

/// Aggregate node counts of a search tree. Collecting them never mutates the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Main-search nodes the search evaluated.
    pub visited: usize,
    /// Main-search moves the search never tried.
    pub pruned: usize,
    /// Quiescence nodes the search evaluated.
    pub quiescence_visited: usize,
    /// Quiescence moves the search never tried.
    pub quiescence_pruned: usize,
}

impl TreeStats {
    pub fn collect<M: Clone + Eq + Hash>(node: &Node<M>) -> Self {
        let mut stats = Self::default();
        stats.add(node);
        stats
    }

    fn add<M: Clone + Eq + Hash>(&mut self, node: &Node<M>) {
        match (node.is_quiescence(), node.is_pruned()) {
            (false, false) => self.visited += 1,
            (false, true) => self.pruned += 1,
            (true, false) => self.quiescence_visited += 1,
            (true, true) => self.quiescence_pruned += 1,
        }
        for (_, child) in node.children() {
            self.add(child);
        }
    }

    pub fn total(&self) -> usize {
        self.visited + self.pruned + self.quiescence_visited + self.quiescence_pruned
    }

    /// Human readable report, optionally with the quiescence counts.
    pub fn summary(&self, include_quiescence: bool) -> String {
        let mut summary = format!(
            "Tree Statistics\n{} nodes visited\n{} paths pruned",
            self.visited, self.pruned
        );
        if include_quiescence {
            summary.push_str(&format!(
                "\n{} quiescence nodes visited\n{} quiescence paths pruned",
                self.quiescence_visited, self.quiescence_pruned
            ));
        }
        summary
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary(true))
    }
}
