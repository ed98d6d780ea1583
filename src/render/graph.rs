use std::fmt::Display;
use std::hash::Hash;

use crate::game::{GameState, Side};
use crate::search_tree::{Node, SearchTree};

/// Depth bound used when none is given.
pub const DEFAULT_EXPORT_DEPTH: usize = 10;

/// Outline of a node, keyed by whether it has children and whether it lies on the
/// principal variation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
    BranchPrincipal,
    Branch,
    LeafPrincipal,
    Leaf,
}

impl NodeShape {
    pub fn of(has_children: bool, is_principal_variation: bool) -> Self {
        match (has_children, is_principal_variation) {
            (true, true) => NodeShape::BranchPrincipal,
            (true, false) => NodeShape::Branch,
            (false, true) => NodeShape::LeafPrincipal,
            (false, false) => NodeShape::Leaf,
        }
    }

    /// Graphviz shape name.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::BranchPrincipal => "doublecircle",
            NodeShape::Branch => "circle",
            NodeShape::LeafPrincipal => "doubleoctagon",
            NodeShape::Leaf => "octagon",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub id: usize,
    /// `root`, `?` for pruned nodes, the score, or empty for unscored placeholders.
    pub label: String,
    /// Side to move at the node.
    pub fill: Side,
    pub shape: NodeShape,
    pub tooltip: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDescriptor {
    pub from: usize,
    pub to: usize,
    /// The move in its standard notation.
    pub label: String,
    /// Side to move at the parent.
    pub color: Side,
}

/// Which part of a tree to export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions<M> {
    /// Moves from the root to the first exported node.
    pub path: Vec<M>,
    /// Number of plies exported below that node.
    pub depth: usize,
}

impl<M> Default for ExportOptions<M> {
    fn default() -> Self {
        Self {
            path: Vec::new(),
            depth: DEFAULT_EXPORT_DEPTH,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeGraph {
    nodes: Vec<NodeDescriptor>,
    edges: Vec<EdgeDescriptor>,
}

impl TreeGraph {
    /// Walks `node` and its descendants down to `depth` plies. Identities are
    /// assigned in walk order, starting at 0 for `node`.
    pub fn from_node<M>(node: &Node<M>, depth: usize) -> Self
    where
        M: Clone + Eq + Hash + Display,
    {
        let mut graph = Self::default();
        graph.walk(node, depth);
        graph
    }

    fn walk<M>(&mut self, node: &Node<M>, depth: usize) -> usize
    where
        M: Clone + Eq + Hash + Display,
    {
        let id = self.nodes.len();
        self.nodes.push(describe(id, node));

        if depth == 0 {
            return id;
        }

        for (game_move, child) in node.children() {
            let child_id = self.walk(child, depth - 1);
            self.edges.push(EdgeDescriptor {
                from: id,
                to: child_id,
                label: game_move.to_string(),
                color: node.side_to_move(),
            });
        }
        id
    }

    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeDescriptor] {
        &self.edges
    }
}

fn describe<M: Clone + Eq + Hash>(id: usize, node: &Node<M>) -> NodeDescriptor {
    let label = if node.is_root() {
        "root".to_string()
    } else if node.is_pruned() {
        "?".to_string()
    } else {
        node.score().map(|score| score.to_string()).unwrap_or_default()
    };

    let tooltip = match (node.alpha(), node.beta(), node.depth()) {
        (Some(alpha), Some(beta), Some(depth)) => Some(format!(
            "alpha = {}, beta = {}, depth = {}",
            alpha, beta, depth
        )),
        _ => None,
    };

    NodeDescriptor {
        id,
        label,
        fill: node.side_to_move(),
        shape: NodeShape::of(node.has_children(), node.is_principal_variation()),
        tooltip,
    }
}

impl<S: GameState> SearchTree<S> {
    /// Exports the node at `path`, creating placeholders for missing nodes along it.
    pub fn graph(&mut self, path: &[S::Move], depth: usize) -> TreeGraph {
        TreeGraph::from_node(self.resolve(path), depth)
    }

    pub fn export(&mut self, options: &ExportOptions<S::Move>) -> TreeGraph {
        self.graph(&options.path, options.depth)
    }
}
